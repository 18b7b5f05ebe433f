use crate::builtins::{self, prelude::*};

pub struct Exit;

impl BuiltinCommand for Exit {
    const NAME: &'static str = builtins::EXIT_NAME;

    const HELP: &'static str = "\
exit: exit [n]
    Exit the shell with a status of N. If N is omitted or is not a number,
    the exit status is 0.";

    fn run(shell: &mut Shell, args: &[String], _stdout: &mut dyn Write) -> Result<()> {
        let code = parse_exit_code(args.first().map(String::as_str));
        shell.exit(Some(code));
    }
}

/// A missing or non-numeric argument exits with 0.
fn parse_exit_code(arg: Option<&str>) -> i32 {
    arg.and_then(|arg| arg.parse::<i32>().ok()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_code_from_argument() {
        assert_eq!(parse_exit_code(Some("7")), 7);
        assert_eq!(parse_exit_code(Some("0")), 0);
        assert_eq!(parse_exit_code(Some("-1")), -1);
        assert_eq!(parse_exit_code(Some("300")), 300);
    }

    #[test]
    fn missing_or_invalid_exit_code_is_zero() {
        assert_eq!(parse_exit_code(None), 0);
        assert_eq!(parse_exit_code(Some("abc")), 0);
        assert_eq!(parse_exit_code(Some("7abc")), 0);
        assert_eq!(parse_exit_code(Some("")), 0);
        assert_eq!(parse_exit_code(Some("99999999999999999999")), 0);
    }
}
