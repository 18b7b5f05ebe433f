//! Error module. See the [error-chain](https://crates.io/crates/error-chain) crate for details.

use nix::unistd::Pid;

error_chain! {
    foreign_links {
        Io(::std::io::Error);
        Nix(::nix::Error);
        Readline(::rustyline::error::ReadlineError);
    }

    errors {
        // `code` is the status the builtin reports
        BuiltinCommand(message: String, code: i32) {
            description("builtin command failed")
            display("{}", message)
        }
        Allocation {
            description("allocation failed")
            display("cannot allocate memory for command")
        }
        InvalidUtf8 {
            description("invalid UTF-8")
            display("input line is not valid UTF-8")
        }
        InvalidArgument(arg: String) {
            description("invalid argument")
            display("{}: argument contains a NUL byte", arg.escape_debug())
        }
        Fork {
            description("fork failed")
            display("fork failed")
        }
        Wait(pid: Pid) {
            description("wait failed")
            display("failed to wait for process {}", pid)
        }
    }
}

impl Error {
    pub(crate) fn builtin_command<T: AsRef<str>>(message: T, code: i32) -> Error {
        Error::from(ErrorKind::BuiltinCommand(message.as_ref().to_string(), code))
    }
}
