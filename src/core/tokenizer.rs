//! Splits a line of input into a `Command`.
//!
//! Tokens are separated by runs of whitespace. A token consisting of a single
//! `&` ends the command and marks it for background execution; anything after
//! it is discarded. At most `max_args` arguments are kept and the rest of the
//! line is dropped without error.

use log::{debug, warn};

use crate::core::command::Command;
use crate::errors::{ErrorKind, Result, ResultExt};

/// Default capacity of a command's argument vector.
pub const DEFAULT_MAX_ARGS: usize = 64;

const BACKGROUND_TOKEN: &str = "&";

fn is_delimiter(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n' | '\x07')
}

/// Tokenizes `line` into a `Command` holding at most `max_args` arguments.
///
/// Returns an `Allocation` error if memory for the arguments cannot be
/// reserved; callers skip such lines instead of executing them.
pub fn tokenize(line: &str, max_args: usize) -> Result<Command> {
    let mut arguments: Vec<String> = Vec::new();
    let mut background = false;

    for token in line.split(is_delimiter).filter(|t| !t.is_empty()) {
        if token == BACKGROUND_TOKEN {
            background = true;
            break;
        }

        if arguments.len() >= max_args {
            warn!(
                "command exceeds {} arguments, dropping input from '{}'",
                max_args, token
            );
            break;
        }

        arguments
            .try_reserve(1)
            .chain_err(|| ErrorKind::Allocation)?;
        arguments.push(copy_token(token)?);
    }

    let command = Command::new(arguments, background);
    debug!("tokenized command: {:?}", command);
    Ok(command)
}

fn copy_token(token: &str) -> Result<String> {
    let mut copy = String::new();
    copy.try_reserve_exact(token.len())
        .chain_err(|| ErrorKind::Allocation)?;
    copy.push_str(token);
    Ok(copy)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Command {
        tokenize(line, DEFAULT_MAX_ARGS).unwrap()
    }

    #[test]
    fn whitespace_only_lines_are_empty() {
        for line in &["", " ", "\t\t", "\r\n", "  \t \n", "\x07"] {
            let command = parse(line);
            assert!(command.is_empty(), "line {:?}", line);
            assert!(!command.is_background());
        }
    }

    #[test]
    fn consecutive_delimiters_collapse() {
        assert_eq!(
            parse("echo  a   b\n"),
            Command::new(vec!["echo", "a", "b"], false)
        );
        assert_eq!(
            parse("\tls\r\n-l \t /tmp "),
            Command::new(vec!["ls", "-l", "/tmp"], false)
        );
    }

    #[test]
    fn trailing_ampersand_sets_background() {
        assert_eq!(parse("sleep 5 &"), Command::new(vec!["sleep", "5"], true));
        assert_eq!(parse("sleep 5 &\n"), Command::new(vec!["sleep", "5"], true));
    }

    #[test]
    fn tokens_after_ampersand_are_discarded() {
        assert_eq!(parse("a & b c"), Command::new(vec!["a"], true));
    }

    #[test]
    fn lone_ampersand_is_an_empty_background_command() {
        let command = parse("&");
        assert!(command.is_empty());
        assert!(command.is_background());
    }

    #[test]
    fn attached_ampersand_is_an_ordinary_token() {
        assert_eq!(parse("a&"), Command::new(vec!["a&"], false));
        assert_eq!(parse("a &&"), Command::new(vec!["a", "&&"], false));
    }

    #[test]
    fn arguments_beyond_capacity_are_dropped() {
        let command = tokenize("a b c d e", 3).unwrap();
        assert_eq!(command, Command::new(vec!["a", "b", "c"], false));
    }

    #[test]
    fn ampersand_does_not_count_against_capacity() {
        let command = tokenize("a b &", 2).unwrap();
        assert_eq!(command, Command::new(vec!["a", "b"], true));
    }

    #[test]
    fn ampersand_past_dropped_input_is_dropped_too() {
        let command = tokenize("a b c &", 2).unwrap();
        assert_eq!(command, Command::new(vec!["a", "b"], false));
    }

    #[test]
    fn large_input_is_truncated_to_default_capacity() {
        let line = (0..200).map(|i| i.to_string()).collect::<Vec<_>>().join(" ");
        let command = parse(&line);
        assert_eq!(command.argc(), DEFAULT_MAX_ARGS);
        assert_eq!(command.program(), Some("0"));
        assert_eq!(command.arguments().last().unwrap(), "63");
    }

    #[test]
    fn non_ascii_tokens() {
        assert_eq!(
            parse("echo héllo wörld"),
            Command::new(vec!["echo", "héllo", "wörld"], false)
        );
    }
}
