//! The line-based console boundary the drill engine talks through.
//!
//! [`IoConsole`] wraps any reader/writer pair (stdin/stdout in the binary);
//! [`ScriptedConsole`] replays canned input and captures output for tests.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Blocking line-oriented input and output.
pub trait Console {
    /// Read one line without its trailing newline. `None` means input is closed.
    fn read_line(&mut self) -> io::Result<Option<String>>;

    /// Write one line of output.
    fn say(&mut self, message: &str) -> io::Result<()>;
}

/// Console over a buffered reader and a writer.
pub struct IoConsole<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> IoConsole<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

impl<R: BufRead, W: Write> Console for IoConsole<R, W> {
    /// Bytes that are not valid UTF-8 are replaced, so a garbled line reads as
    /// unrecognised input instead of an error.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        if self.reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        let mut line = String::from_utf8_lossy(&buf).into_owned();
        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    fn say(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.writer, "{message}")?;
        self.writer.flush()
    }
}

/// A console that replays a fixed script of input lines.
///
/// Once the script runs out, reads report closed input.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    input: VecDeque<String>,
    output: Vec<String>,
    reads: usize,
}

impl ScriptedConsole {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: lines.into_iter().map(Into::into).collect(),
            output: Vec::new(),
            reads: 0,
        }
    }

    /// Everything written so far, one entry per `say` call.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// All output joined with newlines.
    pub fn transcript(&self) -> String {
        self.output.join("\n")
    }

    /// Number of lines consumed from the script.
    pub fn reads(&self) -> usize {
        self.reads
    }

    /// Script lines not yet consumed.
    pub fn remaining(&self) -> usize {
        self.input.len()
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let line = self.input.pop_front();
        if line.is_some() {
            self.reads += 1;
        }
        Ok(line)
    }

    fn say(&mut self, message: &str) -> io::Result<()> {
        self.output.push(message.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_console_strips_line_endings() {
        let input = io::Cursor::new("first\r\nsecond\n");
        let mut console = IoConsole::new(input, Vec::new());

        assert_eq!(console.read_line().unwrap().as_deref(), Some("first"));
        assert_eq!(console.read_line().unwrap().as_deref(), Some("second"));
        assert_eq!(console.read_line().unwrap(), None);

        console.say("hello").unwrap();
        let (_, out) = console.into_inner();
        assert_eq!(String::from_utf8(out).unwrap(), "hello\n");
    }

    #[test]
    fn io_console_replaces_invalid_utf8() {
        let input = io::Cursor::new(b"\xff\xfe\nq\n".to_vec());
        let mut console = IoConsole::new(input, Vec::new());

        let garbled = console.read_line().unwrap().unwrap();
        assert!(garbled.contains('\u{FFFD}'));
        assert_eq!(console.read_line().unwrap().as_deref(), Some("q"));
        assert_eq!(console.read_line().unwrap(), None);
    }

    #[test]
    fn scripted_console_replays_then_closes() {
        let mut console = ScriptedConsole::new(["a", ""]);
        assert_eq!(console.read_line().unwrap().as_deref(), Some("a"));
        assert_eq!(console.read_line().unwrap().as_deref(), Some(""));
        assert_eq!(console.read_line().unwrap(), None);
        assert_eq!(console.reads(), 2);

        console.say("x").unwrap();
        console.say("y").unwrap();
        assert_eq!(console.transcript(), "x\ny");
    }
}
