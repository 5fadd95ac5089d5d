//! Splitting a raw input line into whitespace-delimited words.
//!
//! The shell has no quoting, escaping or globbing: a token is simply a maximal
//! run of characters that are not a space, tab or newline. Tokens borrow from
//! the line they were cut from, so a [`CommandLine`] lives only as long as the
//! buffer of the current iteration.

/// Size of the line buffer. Input beyond `COMMAND_LENGTH - 1` bytes is dropped.
pub const COMMAND_LENGTH: usize = 1024;

/// Token that, when it ends a line, requests background execution.
const BACKGROUND_MARKER: &str = "&";

/// A tokenized command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine<'a> {
    /// Non-empty words in input order, without the background marker.
    pub tokens: Vec<&'a str>,
    /// Set when the last word of the line was a standalone `&`.
    pub background: bool,
}

impl<'a> CommandLine<'a> {
    /// Tokenize `line` and strip at most one trailing `&` token.
    pub fn parse(line: &'a str) -> Self {
        let mut tokens = split_into_tokens(truncate_line(line));
        let background = tokens.last() == Some(&BACKGROUND_MARKER);
        if background {
            tokens.pop();
        }
        Self { tokens, background }
    }

    /// Number of tokens, not counting a stripped `&`.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The command word, if any.
    pub fn name(&self) -> Option<&'a str> {
        self.tokens.first().copied()
    }

    /// Everything after the command word.
    pub fn args(&self) -> &[&'a str] {
        self.tokens.get(1..).unwrap_or(&[])
    }
}

/// Split `line` on spaces, tabs and newlines. Empty tokens never occur.
///
/// Unlike [`CommandLine::parse`] this leaves a trailing `&` in place; it is
/// used to re-tokenize command text pulled back out of history.
pub fn split_into_tokens(line: &str) -> Vec<&str> {
    line.split(is_delimiter)
        .filter(|token| !token.is_empty())
        .collect()
}

/// Clamp `line` to the buffer size, backing off to a character boundary.
pub fn truncate_line(line: &str) -> &str {
    let max = COMMAND_LENGTH - 1;
    if line.len() <= max {
        return line;
    }
    let mut end = max;
    while !line.is_char_boundary(end) {
        end -= 1;
    }
    &line[..end]
}

fn is_delimiter(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n')
}
