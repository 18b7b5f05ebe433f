use std::fmt;
use std::io::{self, BufRead, Write};

use rustyline::{error::ReadlineError, DefaultEditor};

use crate::errors::{ErrorKind, Result, ResultExt};

/// Reads input lines, with line editing when attached to a terminal.
pub struct Editor {
    /// `None` when reading from a pipe or file.
    internal: Option<DefaultEditor>,
}

impl Editor {
    pub fn new(interactive: bool) -> Result<Editor> {
        let internal = if interactive {
            Some(DefaultEditor::new()?)
        } else {
            None
        };
        Ok(Editor { internal })
    }

    /// Reads one line without its trailing newline.
    /// Returns `None` when end of file is reached.
    pub fn readline(&mut self, prompt: &str) -> Result<Option<String>> {
        let internal = match self.internal {
            Some(ref mut internal) => internal,
            None => return read_plain_line(),
        };

        match internal.readline(prompt) {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Eof) => Ok(None),
            // ^C abandons the current line
            Err(ReadlineError::Interrupted) => Ok(Some(String::new())),
            Err(ReadlineError::Io(ref e)) if e.kind() == io::ErrorKind::InvalidData => {
                Err(ErrorKind::InvalidUtf8.into())
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn read_plain_line() -> Result<Option<String>> {
    io::stdout().flush()?;
    let mut line = Vec::new();
    if io::stdin().lock().read_until(b'\n', &mut line)? == 0 {
        return Ok(None);
    }
    decode_line(line).map(Some)
}

/// Strips the line terminator and checks the rest is UTF-8.
pub(crate) fn decode_line(mut line: Vec<u8>) -> Result<String> {
    if line.last() == Some(&b'\n') {
        line.pop();
    }
    if line.last() == Some(&b'\r') {
        line.pop();
    }
    String::from_utf8(line).chain_err(|| ErrorKind::InvalidUtf8)
}

impl fmt::Debug for Editor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Editor {{ interactive: {} }}", self.internal.is_some())
    }
}
