//! Minishell builtins
//!
//! This module includes the implementations of the commands the shell runs
//! in-process instead of launching a program.

use std::process::ExitStatus;

use log::warn;

use self::prelude::*;

use self::dirs::{Cd, Pwd};
use self::exit::Exit;
use self::help::Help;
use crate::core::command::Command;

pub mod prelude {
    pub use std::io::Write;

    pub use super::BuiltinCommand;
    pub use crate::errors::{Error, ErrorKind, Result};
    pub use crate::shell::Shell;
    pub use crate::util::ShellExitStatusExt;
}

mod dirs;
mod exit;
mod help;

const CD_NAME: &str = "cd";
const EXIT_NAME: &str = "exit";
const HELP_NAME: &str = "help";
const PWD_NAME: &str = "pwd";

/// The closed set of commands handled by the shell itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Builtin {
    Cd,
    Exit,
    Help,
    Pwd,
}

impl Builtin {
    /// Matches `name` case-sensitively against the builtin names.
    pub fn from_name(name: &str) -> Option<Builtin> {
        match name {
            CD_NAME => Some(Builtin::Cd),
            EXIT_NAME => Some(Builtin::Exit),
            HELP_NAME => Some(Builtin::Help),
            PWD_NAME => Some(Builtin::Pwd),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Cd => Cd::NAME,
            Builtin::Exit => Exit::NAME,
            Builtin::Help => Help::NAME,
            Builtin::Pwd => Pwd::NAME,
        }
    }

    pub fn usage(self) -> &'static str {
        match self {
            Builtin::Cd => Cd::usage(),
            Builtin::Exit => Exit::usage(),
            Builtin::Help => Help::usage(),
            Builtin::Pwd => Pwd::usage(),
        }
    }

    pub fn all() -> &'static [Builtin] {
        &[Builtin::Cd, Builtin::Exit, Builtin::Help, Builtin::Pwd]
    }
}

/// Represents a Minishell builtin command such as cd or help.
pub trait BuiltinCommand {
    /// The NAME of the command.
    const NAME: &'static str;
    /// The help string to display to the user.
    const HELP: &'static str;
    /// The usage string to display to the user.
    fn usage() -> &'static str {
        Self::HELP.lines().next().unwrap_or(Self::HELP)
    }
    /// Runs the command with the given arguments in the `shell` environment.
    fn run(shell: &mut Shell, args: &[String], stdout: &mut dyn Write) -> Result<()>;
}

/// Runs `command` if it names a builtin.
///
/// Returns `None` when the command is not a builtin, otherwise the builtin's
/// exit status. Failures are reported on stderr.
pub fn run(shell: &mut Shell, command: &Command, stdout: &mut dyn Write) -> Option<ExitStatus> {
    let builtin = command.program().and_then(Builtin::from_name)?;
    let args = command.args();

    let result = match builtin {
        Builtin::Cd => Cd::run(shell, args, stdout),
        Builtin::Exit => Exit::run(shell, args, stdout),
        Builtin::Help => Help::run(shell, args, stdout),
        Builtin::Pwd => Pwd::run(shell, args, stdout),
    };

    if let Err(ref e) = result {
        warn!("builtin {} failed: {}", builtin.name(), e);
        eprintln!("minishell: {}", e);
    }

    Some(get_builtin_exit_status(&result))
}

fn get_builtin_exit_status(result: &Result<()>) -> ExitStatus {
    let status = match *result {
        Ok(()) => 0,
        Err(ref e) => match *e.kind() {
            ErrorKind::BuiltinCommand(_, code) => code,
            _ => 1,
        },
    };

    ExitStatus::from_status(status)
}
