//! A small interactive shell with history expansion.
//!
//! Each line read from standard input is split into whitespace-delimited
//! words, optionally replaced by an earlier command through `!!` or `!N`,
//! and then either handled by one of the builtins (`exit`, `pwd`, `cd`,
//! `history`, `help`) or run as an external program, in the foreground or,
//! with a trailing `&`, in the background.
//!
//! The main entry point is [`Interpreter`]; [`run`] wires it to the process's
//! own stdin and stdout and installs the Ctrl-C handler.

pub mod builtin;
pub mod config;
pub mod console;
pub mod dirs;
pub mod env;
pub mod error;
pub mod external;
pub mod history;
pub mod input;
mod interpreter;
pub mod interrupt;
mod session;
pub mod tokenizer;

#[cfg(test)]
pub(crate) mod test_utils;

pub use builtin::Outcome;
pub use config::ShellConfig;
pub use console::{Console, Style};
pub use env::Environment;
pub use input::RawSource;
/// Just a convenient re-export of the interactive command runner.
///
/// See [`Interpreter`] for the high-level API and examples.
pub use interpreter::Interpreter;
pub use session::Session;

use anyhow::{Context, Result};

/// Run an interactive session on stdin/stdout until `exit` or end of input.
pub fn run(config: ShellConfig) -> Result<()> {
    let mut banner = Console::buffer(config.color);
    builtin::write_summary(&mut banner, config.history_depth)?;
    interrupt::install(banner.into_inner()).context("failed to install the SIGINT handler")?;

    Interpreter::with_stdio(&config)?.repl()
}
