//! Operator-facing I/O seams.
//!
//! The engine never touches stdin/stdout directly; it talks to an `Operator`
//! for line prompts and a `Presenter` for tables. `Console` implements both over
//! any reader/writer pair, which is how the binary drives a real terminal and
//! how tests script a session.

use std::io::{BufRead, Write};

use crate::engine::format::format_table;
use crate::error::{EntryError, Result};
use crate::types::Row;

const AFFIRMATIVE: [&str; 3] = ["1", "y", "yes"];
const NEGATIVE: [&str; 3] = ["0", "n", "no"];
const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

/// Maps a response onto the yes/no vocabulary, ignoring case and surrounding
/// whitespace. Anything outside the vocabulary is `None`.
pub fn parse_affirmation(response: &str) -> Option<bool> {
    let response = response.trim().to_lowercase();
    if AFFIRMATIVE.contains(&response.as_str()) {
        Some(true)
    } else if NEGATIVE.contains(&response.as_str()) {
        Some(false)
    } else {
        None
    }
}

/// Line-oriented operator dialogue.
pub trait Operator {
    /// Shows `message` and returns the trimmed reply.
    ///
    /// Fails with `EntryError::InputClosed` once input is exhausted.
    fn prompt(&mut self, message: &str) -> Result<String>;

    /// Shows `message` without waiting for a reply.
    fn notify(&mut self, message: &str) -> Result<()>;

    fn clear_screen(&mut self) -> Result<()> {
        Ok(())
    }

    /// Shows an optional message and waits for any line.
    fn pause(&mut self, message: Option<&str>) -> Result<()> {
        let text = match message {
            Some(message) => format!("{message}\nEnter any key to continue"),
            None => "Enter any key to continue".to_string(),
        };
        self.prompt(&text)?;
        Ok(())
    }

    /// Asks a yes/no question until the reply is in the vocabulary.
    fn confirm(&mut self, message: &str) -> Result<bool> {
        loop {
            let reply = self.prompt(message)?;
            match parse_affirmation(&reply) {
                Some(answer) => return Ok(answer),
                None => self.pause(Some("Invalid response. Please enter 0, 1, n, y, no, yes"))?,
            }
        }
    }
}

/// Renders a result set for the operator.
pub trait Presenter {
    fn present(&mut self, columns: &[String], rows: &[Row]) -> Result<()>;
}

/// Everything the entry workflow needs from the terminal.
pub trait Terminal: Operator + Presenter {}

impl<T: Operator + Presenter> Terminal for T {}

/// `Operator` and `Presenter` over a reader/writer pair.
#[derive(Debug)]
pub struct Console<R, W> {
    input: R,
    output: W,
    clear: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            clear: false,
        }
    }

    /// Emit ANSI clear-screen sequences when the workflow asks for a fresh screen.
    pub fn with_clear_screen(mut self, clear: bool) -> Self {
        self.clear = clear;
        self
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Operator for Console<R, W> {
    fn prompt(&mut self, message: &str) -> Result<String> {
        writeln!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(EntryError::InputClosed);
        }
        Ok(line.trim().to_string())
    }

    fn notify(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    fn clear_screen(&mut self) -> Result<()> {
        if self.clear {
            write!(self.output, "{CLEAR_SCREEN}")?;
            self.output.flush()?;
        }
        Ok(())
    }
}

impl<R: BufRead, W: Write> Presenter for Console<R, W> {
    fn present(&mut self, columns: &[String], rows: &[Row]) -> Result<()> {
        writeln!(self.output, "{}", format_table(columns, rows))?;
        Ok(())
    }
}
