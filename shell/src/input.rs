//! Where command lines come from.
//!
//! A terminal gets a `rustyline` editor. Anything else, or `--plain`, gets
//! [`RawSource`], which reads with a bare `read` so that SIGINT interrupts the
//! wait for input.

use anyhow::{Context, Result};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::{ErrorKind, Read, Write};

use crate::tokenizer::COMMAND_LENGTH;

/// Result of waiting for one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// A line of input, possibly still ending in `\n`.
    Line(String),
    /// The read was cut short by Ctrl-C; whatever was typed is discarded.
    Interrupted,
    /// No more input.
    Eof,
}

/// Shows a prompt and blocks until a line, an interrupt or end of input.
///
/// Errors are fatal to the shell.
pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome>;
}

/// Interactive line editor with its own recall history.
pub struct EditorSource {
    editor: DefaultEditor,
}

impl EditorSource {
    pub fn new() -> rustyline::Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl LineSource for EditorSource {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    if let Err(err) = self.editor.add_history_entry(line.as_str()) {
                        tracing::debug!(%err, "editor refused history entry");
                    }
                }
                Ok(ReadOutcome::Line(line))
            }
            Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadOutcome::Eof),
            Err(err) => Err(err).context("Unable to read command. Terminating."),
        }
    }
}

/// Unbuffered reader that hands out one line per call.
///
/// Several lines arriving in one `read` (piped input) are queued and returned
/// one at a time. An `Interrupted` error from the reader drops the partial
/// line and reports [`ReadOutcome::Interrupted`].
///
/// At most [`COMMAND_LENGTH`] bytes of an unterminated line are kept; the
/// rest of that line is dropped up to its newline.
pub struct RawSource<R, W> {
    input: R,
    prompt_out: W,
    pending: Vec<u8>,
    overflow: bool,
}

impl<R: Read, W: Write> RawSource<R, W> {
    pub fn new(input: R, prompt_out: W) -> Self {
        Self {
            input,
            prompt_out,
            pending: Vec::new(),
            overflow: false,
        }
    }

    fn append(&mut self, chunk: &[u8]) {
        let chunk = if self.overflow {
            match chunk.iter().position(|&b| b == b'\n') {
                Some(end) => {
                    self.overflow = false;
                    &chunk[end..]
                }
                None => return,
            }
        } else {
            chunk
        };
        self.pending.extend_from_slice(chunk);
        if self.pending.len() > COMMAND_LENGTH && !self.pending.contains(&b'\n') {
            tracing::debug!(kept = COMMAND_LENGTH, "dropping the tail of an over-long line");
            self.pending.truncate(COMMAND_LENGTH);
            self.overflow = true;
        }
    }

    fn take_line(&mut self, end: usize) -> ReadOutcome {
        let line: Vec<u8> = self.pending.drain(..end).collect();
        ReadOutcome::Line(String::from_utf8_lossy(&line).into_owned())
    }
}

impl<R: Read, W: Write> LineSource for RawSource<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome> {
        self.prompt_out.write_all(prompt.as_bytes())?;
        self.prompt_out.flush()?;

        let mut buf = [0u8; COMMAND_LENGTH];
        loop {
            if let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
                return Ok(self.take_line(pos + 1));
            }
            match self.input.read(&mut buf) {
                Ok(0) if self.pending.is_empty() => return Ok(ReadOutcome::Eof),
                Ok(0) => return Ok(self.take_line(self.pending.len())),
                Ok(n) => self.append(&buf[..n]),
                Err(err) if err.kind() == ErrorKind::Interrupted => {
                    self.pending.clear();
                    self.overflow = false;
                    return Ok(ReadOutcome::Interrupted);
                }
                Err(err) => return Err(err).context("Unable to read command. Terminating."),
            }
        }
    }
}
