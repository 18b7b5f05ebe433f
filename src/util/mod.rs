use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;

/// Offset added to a signal number to form the status of a signal-terminated child.
const SIGNAL_STATUS_OFFSET: i32 = 128;

/// Minishell Utility Extensions for `ExitStatus`
pub trait ShellExitStatusExt {
    /// Create an ExitStatus to indicate *successful* program execution.
    fn from_success() -> Self;

    /// Create an ExitStatus to indicate *unsuccessful* program execution.
    fn from_failure() -> Self;

    /// Create an ExitStatus from a status code
    fn from_status(code: i32) -> Self;

    /// Create an ExitStatus for a process terminated by `signal`.
    fn from_signal(signal: i32) -> Self;

    /// The numeric status a shell reports: the exit code, or 128 plus the
    /// signal number when the process was killed by a signal.
    fn status_code(&self) -> i32;
}

impl ShellExitStatusExt for ExitStatus {
    /// # Examples
    /// ```rust
    /// use minishell::ShellExitStatusExt;
    /// use std::process::ExitStatus;
    /// assert!(ExitStatus::from_success().success());
    /// ```
    fn from_success() -> Self {
        ExitStatus::from_status(0)
    }

    /// # Examples
    /// ```rust
    /// use minishell::ShellExitStatusExt;
    /// use std::process::ExitStatus;
    /// assert!(!ExitStatus::from_failure().success());
    /// ```
    fn from_failure() -> Self {
        ExitStatus::from_status(1)
    }

    /// # Examples
    /// ```rust
    /// use minishell::ShellExitStatusExt;
    /// use std::process::ExitStatus;
    /// assert!(ExitStatus::from_status(0).success());
    /// assert_eq!(ExitStatus::from_status(3).code(), Some(3));
    /// ```
    fn from_status(code: i32) -> Self {
        ExitStatus::from_raw((code & 0xff) << 8)
    }

    fn from_signal(signal: i32) -> Self {
        ExitStatus::from_raw(signal & 0x7f)
    }

    fn status_code(&self) -> i32 {
        match (self.code(), self.signal()) {
            (Some(code), _) => code,
            (None, Some(signal)) => SIGNAL_STATUS_OFFSET + signal,
            (None, None) => SIGNAL_STATUS_OFFSET,
        }
    }
}
