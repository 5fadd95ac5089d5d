//! Current and previous working directory, as `cd` and `pwd` see them.

use anyhow::{Context, Result};
use std::io;
use std::path::{Path, PathBuf};

/// Tracks the directory shown in the prompt and the one `cd -` returns to.
#[derive(Debug, Clone, Default)]
pub struct DirectoryTracker {
    current: PathBuf,
    previous: PathBuf,
    seeded: bool,
}

impl DirectoryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-read the live working directory.
    ///
    /// The first successful call also seeds `previous`, so `cd -` before any
    /// other `cd` stays put. Failure is fatal for the shell: without a
    /// directory there is no prompt to render.
    pub fn refresh(&mut self) -> Result<&Path> {
        self.current = pwd()?;
        if !self.seeded {
            self.previous = self.current.clone();
            self.seeded = true;
        }
        Ok(&self.current)
    }

    pub fn current(&self) -> &Path {
        &self.current
    }

    pub fn previous(&self) -> &Path {
        &self.previous
    }

    /// Remember the current directory as `previous`.
    ///
    /// Every attempted change calls this first, including attempts that fail
    /// before a target path is known.
    pub fn snapshot(&mut self) {
        self.previous = self.current.clone();
    }

    /// Change the working directory.
    ///
    /// `previous` is overwritten with the pre-change directory before the
    /// attempt, whether or not the change succeeds.
    pub fn cd(&mut self, target: impl AsRef<Path>) -> io::Result<()> {
        let target = target.as_ref();
        self.snapshot();
        std::env::set_current_dir(target)?;
        if let Ok(now) = std::env::current_dir() {
            self.current = now;
        }
        tracing::debug!(
            from = %self.previous.display(),
            to = %self.current.display(),
            "changed directory"
        );
        Ok(())
    }
}

/// Absolute path of the process working directory.
pub fn pwd() -> Result<PathBuf> {
    std::env::current_dir().context("Error getcwd failed to get current directory")
}
