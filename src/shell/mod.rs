//! Minishell - Shell Module
//!
//! The Shell routes parsed commands to builtins or external programs and owns
//! the background processes it launches.

pub use self::shell::Shell;

use crate::core::tokenizer::DEFAULT_MAX_ARGS;

#[allow(clippy::module_inception)]
mod shell;

const PROMPT: &str = "<minishell> ";

/// Policy object to control a Shell's behavior
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    /// Maximum number of arguments kept per command. Input beyond it is
    /// dropped.
    max_args: usize,

    /// Determines if some messages (e.g. "exit", finished background jobs)
    /// should be displayed.
    display_messages: bool,

    /// Text displayed before reading each line.
    prompt: &'static str,
}

impl ShellConfig {
    /// Creates an interactive shell, e.g. prompt and job notices
    ///
    /// # Complete List
    /// - The prompt is displayed
    /// - Finished background jobs are reported before each prompt
    /// - "exit" is displayed when the shell exits
    pub fn interactive() -> ShellConfig {
        ShellConfig {
            display_messages: true,
            prompt: PROMPT,
            ..Default::default()
        }
    }

    /// Creates a noninteractive shell, e.g. for running a script
    ///
    /// # Complete List
    /// - No prompt is displayed
    /// - Fewer messages are displayed
    pub fn noninteractive() -> ShellConfig {
        Default::default()
    }

    /// Sets the maximum number of arguments kept per command.
    ///
    /// # Panics
    /// Panics if `max_args` is zero.
    pub fn with_max_args(self, max_args: usize) -> ShellConfig {
        assert!(max_args > 0, "max_args must be positive");
        ShellConfig { max_args, ..self }
    }

    pub fn max_args(&self) -> usize {
        self.max_args
    }

    pub fn display_messages(&self) -> bool {
        self.display_messages
    }

    pub fn prompt(&self) -> &'static str {
        self.prompt
    }
}

impl Default for ShellConfig {
    fn default() -> ShellConfig {
        ShellConfig {
            max_args: DEFAULT_MAX_ARGS,
            display_messages: false,
            prompt: "",
        }
    }
}
