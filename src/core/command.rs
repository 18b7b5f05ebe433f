use std::ffi::CString;
use std::fmt;

use crate::errors::{Error, ErrorKind, Result};

/// One parsed, ready-to-run instruction.
///
/// `arguments[0]` is the program or builtin name. A command with no arguments
/// is valid and executes as a no-op.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Command {
    arguments: Vec<String>,
    background: bool,
}

impl Command {
    pub fn new<I, S>(arguments: I, background: bool) -> Command
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Command {
            arguments: arguments.into_iter().map(Into::into).collect(),
            background,
        }
    }

    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    pub fn argc(&self) -> usize {
        self.arguments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }

    /// The program or builtin name, `None` for an empty command.
    pub fn program(&self) -> Option<&str> {
        self.arguments.first().map(String::as_str)
    }

    /// Arguments following the program name.
    pub fn args(&self) -> &[String] {
        self.arguments.get(1..).unwrap_or(&[])
    }

    /// `true` if the line ended with a `&` token.
    pub fn is_background(&self) -> bool {
        self.background
    }

    /// Converts the arguments into an argument vector suitable for exec.
    pub fn argv(&self) -> Result<Vec<CString>> {
        self.arguments
            .iter()
            .map(|arg| {
                CString::new(arg.as_bytes())
                    .map_err(|_| Error::from(ErrorKind::InvalidArgument(arg.clone())))
            })
            .collect()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.arguments.join(" "))?;
        if self.background {
            write!(f, " &")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_command() {
        let command = Command::default();
        assert!(command.is_empty());
        assert_eq!(command.argc(), 0);
        assert_eq!(command.program(), None);
        assert!(command.args().is_empty());
        assert!(command.argv().unwrap().is_empty());
    }

    #[test]
    fn program_and_args() {
        let command = Command::new(vec!["ls", "-l", "/tmp"], false);
        assert_eq!(command.argc(), 3);
        assert_eq!(command.program(), Some("ls"));
        assert_eq!(command.args(), &["-l".to_string(), "/tmp".to_string()]);
    }

    #[test]
    fn argv_matches_arguments() {
        let command = Command::new(vec!["echo", "a", "b"], false);
        let argv = command.argv().unwrap();
        let argv: Vec<&str> = argv.iter().map(|a| a.to_str().unwrap()).collect();
        assert_eq!(argv, vec!["echo", "a", "b"]);
    }

    #[test]
    fn argv_rejects_nul_bytes() {
        let command = Command::new(vec!["echo", "a\0b"], false);
        let err = command.argv().unwrap_err();
        match *err.kind() {
            ErrorKind::InvalidArgument(ref arg) => assert_eq!(arg, "a\0b"),
            ref kind => panic!("unexpected error kind: {:?}", kind),
        }
    }

    #[test]
    fn display() {
        assert_eq!(
            Command::new(vec!["sleep", "5"], true).to_string(),
            "sleep 5 &"
        );
        assert_eq!(Command::new(vec!["pwd"], false).to_string(), "pwd");
    }
}
