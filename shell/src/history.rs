//! Bounded command history with `!!` / `!N` expansion.

use crate::error::HistoryError;
use std::collections::VecDeque;

/// Window size used when nothing else is configured.
pub const DEFAULT_DEPTH: usize = 10;

/// The last `depth` accepted command lines.
///
/// Every accepted command gets an absolute number, starting at 1, that never
/// changes afterwards. Once the window is full the oldest entry is evicted
/// and `offset` grows by one, so `number - offset - 1` is always the slot of a
/// number that is still inside the window.
#[derive(Debug, Clone)]
pub struct History {
    depth: usize,
    entries: VecDeque<String>,
    offset: usize,
}

impl History {
    /// Create an empty history. A depth of zero is bumped to one.
    pub fn new(depth: usize) -> Self {
        let depth = depth.max(1);
        Self {
            depth,
            entries: VecDeque::with_capacity(depth),
            offset: 0,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Total number of commands ever recorded.
    pub fn count(&self) -> usize {
        self.offset + self.entries.len()
    }

    /// Number of commands evicted from the front of the window.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Store an accepted command and return its absolute number.
    ///
    /// Tokens are joined with single spaces. Callers filter out empty and
    /// invalid lines beforehand.
    pub fn record(&mut self, tokens: &[&str]) -> usize {
        if self.entries.len() == self.depth {
            self.entries.pop_front();
            self.offset += 1;
        }
        self.entries.push_back(tokens.join(" "));
        let number = self.count();
        tracing::debug!(number, offset = self.offset, "recorded command");
        number
    }

    /// Entries as `(number, text)`, most recent first.
    pub fn list(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        let offset = self.offset;
        self.entries
            .iter()
            .enumerate()
            .rev()
            .map(move |(slot, text)| (offset + slot + 1, text.as_str()))
    }

    /// Look up an absolute command number.
    pub fn get(&self, number: usize) -> Option<&str> {
        if number <= self.offset {
            return None;
        }
        self.entries
            .get(number - self.offset - 1)
            .map(String::as_str)
    }

    /// The most recently recorded entry.
    pub fn last(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    /// Expand a bang reference.
    ///
    /// `tokens` is the whole command line; its first token starts with `!`.
    /// Returns the stored command text to run in its place.
    pub fn resolve(&self, tokens: &[&str]) -> Result<&str, HistoryError> {
        let Some(&bang) = tokens.first() else {
            return Err(HistoryError::FollowedByLetter);
        };
        if tokens.len() > 1 {
            return Err(HistoryError::TakesNoArguments);
        }
        if self.count() == 0 {
            return Err(HistoryError::Empty);
        }
        if bang == "!!" {
            return self.last().ok_or(HistoryError::Empty);
        }

        let reference = bang.strip_prefix('!').unwrap_or(bang);
        if reference.is_empty() || !reference.bytes().all(|b| b.is_ascii_digit()) {
            return Err(HistoryError::FollowedByLetter);
        }
        // Too many digits to fit is simply a number nobody has reached yet.
        let number: usize = reference
            .parse()
            .map_err(|_| HistoryError::NoSuchCommand)?;
        self.get(number).ok_or(HistoryError::NoSuchCommand)
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}

/// Whether `token` asks for history expansion.
pub fn is_bang(token: &str) -> bool {
    token.starts_with('!')
}
