use crate::builtins::{self, prelude::*, Builtin};

pub struct Help;

impl BuiltinCommand for Help {
    const NAME: &'static str = builtins::HELP_NAME;

    const HELP: &'static str = "\
help: help
    Display a summary of the builtin commands.";

    fn run(_shell: &mut Shell, _args: &[String], stdout: &mut dyn Write) -> Result<()> {
        writeln!(stdout, "minishell, version {}", env!("CARGO_PKG_VERSION"))?;
        writeln!(stdout, "Type a program name and its arguments, and hit enter.")?;
        writeln!(
            stdout,
            "End a line with '&' to run the program in the background."
        )?;
        writeln!(stdout)?;
        writeln!(stdout, "These commands are built in:")?;
        for builtin in Builtin::all() {
            writeln!(stdout, "  {}", builtin.usage())?;
        }
        Ok(())
    }
}
