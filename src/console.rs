//! Operator-facing line source and output sink.

use anyhow::Result;
use colored::{Color, Colorize};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::{self, Write};

/// Where the interpreter reads operator input from.
pub trait LineSource {
    /// Read one line, showing `prompt` if the source is interactive.
    ///
    /// `Ok(None)` means input is exhausted and the session should end.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// Interactive terminal input with line editing and history.
pub struct RustylineSource {
    editor: DefaultEditor,
}

impl RustylineSource {
    /// Editor with an empty in-memory history.
    pub fn new() -> Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl LineSource for RustylineSource {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                self.editor.add_history_entry(line.as_str())?;
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

/// Text sink with optional foreground colors.
pub struct Console {
    out: Box<dyn Write>,
    color: bool,
}

impl Console {
    /// Console over any writer; `color` enables ANSI colors.
    pub fn new(out: Box<dyn Write>, color: bool) -> Self {
        Self { out, color }
    }

    /// Console over standard output.
    pub fn stdout(color: bool) -> Self {
        Self::new(Box::new(io::stdout()), color)
    }

    /// Raw sink handed to action handlers.
    pub fn sink(&mut self) -> &mut dyn Write {
        &mut *self.out
    }

    /// Write `message` followed by a newline.
    pub fn write_line(&mut self, message: &str, color: Option<Color>) -> io::Result<()> {
        let text = self.paint(message, color);
        writeln!(self.out, "{text}")
    }

    /// Write `message` trimmed and followed by a single space, without a newline.
    pub fn write_inline(&mut self, message: &str, color: Option<Color>) -> io::Result<()> {
        let text = self.paint(message.trim(), color);
        write!(self.out, "{text} ")?;
        self.out.flush()
    }

    /// `message` in `color`, or unchanged when colors are off.
    pub fn paint(&self, message: &str, color: Option<Color>) -> String {
        match color {
            Some(c) if self.color => message.color(c).to_string(),
            _ => message.to_string(),
        }
    }
}
