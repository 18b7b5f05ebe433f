use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::os::unix::process::ExitStatusExt;
use std::path::Path;
use std::process::{self, ExitStatus};

use atty::{self, Stream};
use log::{error, info, warn};

use super::ShellConfig;
use crate::{
    builtins,
    core::{command::Command, tokenizer},
    editor::{self, Editor},
    errors::{ErrorKind, Result},
    execute_command::{spawn_process, Spawned},
    job_control::{BackgroundJob, BackgroundJobs},
    util::ShellExitStatusExt,
};

/// Minishell Shell
#[derive(Debug)]
pub struct Shell {
    config: ShellConfig,
    background_jobs: BackgroundJobs,
    /// Exit status of last command executed.
    last_exit_status: ExitStatus,
    /// Is `false` if stdin is not a terminal.
    is_interactive: bool,
}

impl Shell {
    pub fn new(config: ShellConfig) -> Shell {
        let shell = Shell {
            config,
            background_jobs: BackgroundJobs::default(),
            last_exit_status: ExitStatus::from_success(),
            is_interactive: atty::is(Stream::Stdin),
        };
        info!("minishell started up: {:?}", shell.config);
        shell
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn is_interactive(&self) -> bool {
        self.is_interactive
    }

    /// Exit status of the last command executed.
    pub fn last_exit_status(&self) -> ExitStatus {
        self.last_exit_status
    }

    pub fn background_jobs(&self) -> &BackgroundJobs {
        &self.background_jobs
    }

    /// Splits a line into a command using the configured argument capacity.
    pub fn parse(&self, line: &str) -> Result<Command> {
        tokenizer::tokenize(line, self.config.max_args())
    }

    /// Runs a command: builtins in-process, anything else as a child process.
    ///
    /// An empty command succeeds without doing anything. Errors are reported
    /// on stderr and turned into a failing status.
    pub fn execute(&mut self, command: &Command) -> ExitStatus {
        if command.is_empty() {
            return ExitStatus::from_success();
        }

        if let Some(status) = builtins::run(self, command, &mut io::stdout()) {
            return status;
        }

        match spawn_process(command) {
            Ok(Spawned::Foreground(status)) => status,
            Ok(Spawned::Background(pid)) => {
                let job = self.background_jobs.add(pid, command);
                println!("{}", job);
                ExitStatus::from_success()
            }
            Err(e) => {
                error!("failed to run '{}': {}", command, e);
                eprintln!("minishell: {}", e);
                ExitStatus::from_failure()
            }
        }
    }

    /// Runs a single line of input.
    ///
    /// Returns `None` if the line could not be parsed and was skipped.
    pub fn execute_command_string(&mut self, input: &str) -> Option<ExitStatus> {
        let command = match self.parse(input) {
            Ok(command) => command,
            Err(e) => {
                error!("skipping line: {}", e);
                eprintln!("minishell: {}", e);
                return None;
            }
        };

        let status = self.execute(&command);
        self.last_exit_status = status;
        Some(status)
    }

    /// Runs a minishell script from a file, one line at a time.
    ///
    /// Lines that are not valid UTF-8 are reported and skipped. Finished
    /// background jobs are reaped after every line.
    pub fn execute_commands_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let reader = BufReader::new(File::open(path)?);

        for (index, line) in reader.split(b'\n').enumerate() {
            match editor::decode_line(line?) {
                Ok(line) => {
                    self.execute_command_string(&line);
                }
                Err(e) => {
                    warn!("skipping line {}: {}", index + 1, e);
                    eprintln!("minishell: line {}: {}", index + 1, e);
                }
            }
            self.report_finished_jobs();
        }

        Ok(())
    }

    /// Runs commands from stdin until EOF is received.
    pub fn execute_from_stdin(&mut self) {
        let mut editor = match Editor::new(self.is_interactive) {
            Ok(editor) => editor,
            Err(e) => {
                error!("failed to initialize line editor: {}", e);
                eprintln!("minishell: {}", e);
                return;
            }
        };

        loop {
            self.report_finished_jobs();

            let input = match editor.readline(self.config.prompt()) {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => {
                    eprintln!("minishell: {}", e);
                    if let ErrorKind::InvalidUtf8 = *e.kind() {
                        warn!("skipping line: {}", e);
                        continue;
                    }
                    error!("failed to read line: {}", e);
                    break;
                }
            };

            self.execute_command_string(&input);
        }

        self.report_finished_jobs();
        if self.background_jobs.has_jobs() {
            warn!(
                "leaving {} background job(s) running",
                self.background_jobs.len()
            );
        }
    }

    /// Collects finished background jobs without blocking.
    pub fn reap_background_jobs(&mut self) -> Vec<(BackgroundJob, ExitStatus)> {
        self.background_jobs.reap()
    }

    fn report_finished_jobs(&mut self) {
        let finished = self.reap_background_jobs();
        if !self.config.display_messages() {
            return;
        }

        for (job, status) in finished {
            println!(
                "[{}]+  {}\t{}",
                job.id(),
                describe_status(status),
                job.command()
            );
        }
    }

    /// Exit the shell.
    ///
    /// Background jobs that already finished are reaped first; ones still
    /// running are left behind.
    ///
    /// Valid exit codes are between 0 and 255. Like bash and its descendents, it automatically
    /// converts exit codes to a u8 such that positive n becomes n % 256 and negative n becomes
    /// (256 + n) % 256.
    ///
    /// Exit the shell with a status of n. If n is None, then the exit status is that of the last
    /// command executed.
    pub fn exit(&mut self, n: Option<i32>) -> ! {
        self.report_finished_jobs();
        if self.config.display_messages() {
            eprintln!("exit");
        }

        let code = n.unwrap_or_else(|| self.last_exit_status.status_code());
        let code_like_u8 = code.rem_euclid(256);

        log_if_err!(io::stdout().flush(), "failed to flush stdout during shutdown");

        info!("minishell has shut down with status {}", code_like_u8);
        log::logger().flush();
        process::exit(code_like_u8);
    }
}

fn describe_status(status: ExitStatus) -> String {
    match (status.code(), status.signal()) {
        (Some(0), _) => "Done".to_string(),
        (Some(code), _) => format!("Exit {}", code),
        (None, Some(signal)) => format!("Terminated (signal {})", signal),
        (None, None) => status.to_string(),
    }
}
