//! Minishell - a minimal command line shell
//!
//! A line of input is split into a [`Command`], which the [`Shell`] either runs
//! itself (the `cd`, `exit`, `help` and `pwd` builtins) or launches as a child
//! process, in the foreground or, when the line ends with `&`, in the
//! background.

#![deny(missing_debug_implementations)]

#[macro_use]
extern crate error_chain;

/// Logs an error if `$result` is `Err`, otherwise does nothing.
macro_rules! log_if_err {
    ($result:expr, $msg:expr) => {{
        if let Err(e) = $result {
            ::log::error!("{}: {}", $msg, e);
        }
    }};
    ($result:expr, $fmt:expr, $($arg:tt)+) => {{
        if let Err(e) = $result {
            ::log::error!("{}: {}", format_args!($fmt, $($arg)+), e);
        }
    }};
}

pub mod builtins;
pub mod core;
mod editor;
pub mod errors;
pub mod execute_command;
pub mod job_control;
pub mod shell;
mod util;

pub use crate::core::command::Command;
pub use crate::shell::{Shell, ShellConfig};
pub use crate::util::ShellExitStatusExt;
