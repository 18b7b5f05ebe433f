use std::env;
use std::path::PathBuf;
use std::process;

use atty::Stream;
use docopt::Docopt;
use log::{debug, error, LevelFilter};
use nix::unistd::Pid;
use serde::Deserialize;

use minishell::{Shell, ShellConfig};

const LOG_FILE_NAME: &str = ".minishell_log";

const USAGE: &str = "
minishell.

Usage:
    minishell [options]
    minishell [options] -c <command>
    minishell [options] <file>
    minishell (-h | --help)
    minishell --version

Options:
    -h --help            Show this screen.
    --version            Show version.
    -c                   If the -c option is present, then the command is read from the first
                             non-option argument command_string.
    --log=<path>         File to write log to, defaults to ~/.minishell_log
    --log-level=<level>  One of off, error, warn, info, debug, trace [default: debug].
    --max-args=<n>       Maximum number of arguments kept per command [default: 64].
";

/// Docopts input arguments.
#[derive(Debug, Deserialize)]
struct Args {
    arg_command: Option<String>,
    arg_file: Option<String>,
    flag_version: bool,
    flag_c: bool,
    flag_log: Option<String>,
    flag_log_level: String,
    flag_max_args: usize,
}

fn main() {
    let args: Args = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());

    if args.flag_version {
        println!("minishell version {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    let level = args.flag_log_level.parse::<LevelFilter>().unwrap_or_else(|_| {
        eprintln!("minishell: invalid log level: {}", args.flag_log_level);
        process::exit(2);
    });
    if args.flag_max_args == 0 {
        eprintln!("minishell: --max-args must be at least 1");
        process::exit(2);
    }

    if let Err(e) = init_logger(&args.flag_log, level) {
        eprintln!("minishell: logging disabled: {}", e);
    }
    debug!("{:?}", args);

    if args.flag_c || args.arg_file.is_some() {
        execute_from_command_string_or_file(&args);
    } else {
        execute_from_stdin(&args);
    }
}

fn init_logger(path: &Option<String>, level: LevelFilter) -> Result<(), fern::InitError> {
    let log_path = path
        .clone()
        .map(PathBuf::from)
        .unwrap_or_else(default_log_path);

    let pid = Pid::this();
    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{} [{}] {}: {}",
                pid,
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(fern::log_file(log_path)?)
        .apply()?;
    Ok(())
}

fn default_log_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(env::temp_dir)
        .join(LOG_FILE_NAME)
}

fn execute_from_command_string_or_file(args: &Args) -> ! {
    let config = ShellConfig::noninteractive().with_max_args(args.flag_max_args);
    let mut shell = Shell::new(config);

    if let Some(ref command) = args.arg_command {
        shell.execute_command_string(command);
    } else if let Some(ref file_path) = args.arg_file {
        if let Err(e) = shell.execute_commands_from_file(file_path) {
            error!("failed to run {}: {}", file_path, e);
            eprintln!("minishell: {}: {}", file_path, e);
            shell.exit(Some(1));
        }
    }

    shell.exit(None)
}

fn execute_from_stdin(args: &Args) -> ! {
    // prompts and job messages only make sense on a terminal
    let config = if atty::is(Stream::Stdin) {
        ShellConfig::interactive()
    } else {
        ShellConfig::noninteractive()
    };
    let config = config.with_max_args(args.flag_max_args);
    let mut shell = Shell::new(config);
    shell.execute_from_stdin();
    shell.exit(None)
}
