//! Errors the shell reports to the user and then keeps going.
//!
//! The `Display` text of every variant is exactly what gets printed. Fatal
//! conditions do not live here; they travel as [`anyhow::Error`] up to `main`.

use std::io;
use thiserror::Error;

/// Failures while expanding a `!!` or `!N` history reference.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Uh-oh !! does not take any arguments!")]
    TakesNoArguments,
    #[error("Uh-oh No commands in history!")]
    Empty,
    /// The number was never assigned, or has slid out of the window.
    #[error("Uh-oh No such command in history!")]
    NoSuchCommand,
    #[error("Uh-oh The ! operator should not be followed by a letter!")]
    FollowedByLetter,
}

/// Failures of a builtin after it has been recognised.
#[derive(Debug, Error)]
pub enum BuiltinError {
    #[error("Uh-oh {name} does not take any arguments!")]
    TakesNoArguments { name: &'static str },
    #[error("Uh-oh {name} does not take more than one argument!")]
    TooManyArguments { name: &'static str },
    #[error("Error chdir failed to run command: HOME is not set")]
    HomeNotSet,
    #[error("Error chdir failed to run command: {0}")]
    ChangeDir(#[source] io::Error),
}

/// Failures starting an external program.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The program image could not be loaded; the shell carries on.
    #[error("Error execvp failed to run command: {0}")]
    Exec(#[source] io::Error),
    /// No child could be created at all; the shell gives up.
    #[error("Error failed to fork: {0}")]
    Fork(#[source] io::Error),
}

impl LaunchError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, LaunchError::Fork(_))
    }
}
