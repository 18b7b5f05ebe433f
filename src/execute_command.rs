//! Launches external programs with fork/exec and waits on them.

use std::io::{self, Write};
use std::process::ExitStatus;
use std::ptr;

use log::{debug, info};
use nix::errno::Errno;
use nix::libc::{self, c_char};
use nix::sys::signal::{self, SigHandler, Signal};
use nix::sys::wait::{self, WaitPidFlag, WaitStatus};
use nix::unistd::{self, ForkResult, Pid};

use crate::core::command::Command;
use crate::errors::{ErrorKind, Result, ResultExt};
use crate::util::ShellExitStatusExt;

pub const COMMAND_NOT_FOUND_EXIT_STATUS: i32 = 127;
pub const COMMAND_NOT_EXECUTABLE_EXIT_STATUS: i32 = 126;

/// Outcome of launching an external command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Spawned {
    /// The command ran in the foreground and finished with this status.
    Foreground(ExitStatus),
    /// The command was left running in the background.
    Background(Pid),
}

/// Runs `command` as a child process.
///
/// Foreground commands are waited on; background commands are returned as soon
/// as the child exists. The caller is responsible for eventually reaping
/// background children.
///
/// # Panics
/// Panics if `command` is empty.
pub fn spawn_process(command: &Command) -> Result<Spawned> {
    let argv = command.argv()?;
    assert!(!argv.is_empty(), "cannot spawn an empty command");

    // Everything the child needs is allocated up front: between fork and exec
    // the child only calls signal, execvp, write and _exit.
    let diagnostic = format!("minishell: {}: ", command.program().unwrap_or_default());
    let argv_ptrs: Vec<*const c_char> = argv
        .iter()
        .map(|arg| arg.as_ptr())
        .chain(Some(ptr::null()))
        .collect();

    io::stdout().flush()?;
    io::stderr().flush()?;

    match unsafe { unistd::fork() }.chain_err(|| ErrorKind::Fork)? {
        ForkResult::Child => exec_child(&argv_ptrs, diagnostic.as_bytes()),
        ForkResult::Parent { child } => {
            info!(
                "spawned {} ({}) for '{}'",
                child,
                if command.is_background() {
                    "background"
                } else {
                    "foreground"
                },
                command
            );

            if command.is_background() {
                Ok(Spawned::Background(child))
            } else {
                wait_for_process(child).map(Spawned::Foreground)
            }
        }
    }
}

/// Signals whose disposition the shell may have changed. The Rust runtime
/// ignores SIGPIPE, and ignored signals stay ignored across exec.
const RESET_SIGNALS: [Signal; 7] = [
    Signal::SIGPIPE,
    Signal::SIGINT,
    Signal::SIGQUIT,
    Signal::SIGTSTP,
    Signal::SIGTTIN,
    Signal::SIGTTOU,
    Signal::SIGCHLD,
];

/// Replaces the child's image with the requested program. If that fails the
/// child reports the error and terminates; it never returns to the caller.
///
/// `argv` must be null-terminated and point into strings that outlive the call.
fn exec_child(argv: &[*const c_char], diagnostic: &[u8]) -> ! {
    for &sig in RESET_SIGNALS.iter() {
        // Only fails for invalid signals, and these are all valid.
        let _ = unsafe { signal::signal(sig, SigHandler::SigDfl) };
    }

    unsafe { libc::execvp(argv[0], argv.as_ptr()) };
    let errno = Errno::last();

    let (reason, code) = match errno {
        Errno::ENOENT => ("command not found", COMMAND_NOT_FOUND_EXIT_STATUS),
        _ => (errno.desc(), COMMAND_NOT_EXECUTABLE_EXIT_STATUS),
    };
    let _ = unistd::write(libc::STDERR_FILENO, diagnostic);
    let _ = unistd::write(libc::STDERR_FILENO, reason.as_bytes());
    let _ = unistd::write(libc::STDERR_FILENO, b"\n");

    unsafe { libc::_exit(code) }
}

/// Blocks until `pid` terminates, retrying if the wait is interrupted.
pub fn wait_for_process(pid: Pid) -> Result<ExitStatus> {
    loop {
        match wait::waitpid(pid, None) {
            Ok(WaitStatus::Exited(_, code)) => return Ok(ExitStatus::from_status(code)),
            Ok(WaitStatus::Signaled(_, signal, _)) => {
                return Ok(ExitStatus::from_signal(signal as i32));
            }
            Ok(status) => debug!("ignoring wait status {:?}", status),
            Err(Errno::EINTR) => debug!("wait for {} interrupted, retrying", pid),
            Err(e) => return Err(e).chain_err(|| ErrorKind::Wait(pid)),
        }
    }
}

/// Collects the status of `pid` if it has terminated, without blocking.
pub fn try_wait_for_process(pid: Pid) -> Result<Option<ExitStatus>> {
    loop {
        match wait::waitpid(pid, Some(WaitPidFlag::WNOHANG)) {
            Ok(WaitStatus::Exited(_, code)) => return Ok(Some(ExitStatus::from_status(code))),
            Ok(WaitStatus::Signaled(_, signal, _)) => {
                return Ok(Some(ExitStatus::from_signal(signal as i32)));
            }
            Ok(_) => return Ok(None),
            Err(Errno::EINTR) => continue,
            Err(e) => return Err(e).chain_err(|| ErrorKind::Wait(pid)),
        }
    }
}
