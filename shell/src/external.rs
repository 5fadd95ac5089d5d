use crate::error::LaunchError;
use std::io;
use std::process::{Child, Command, ExitStatus};

/// Conventional process exit code.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
pub type ExitCode = i32;

/// Starts external programs and reaps the ones left running in the background.
///
/// Background children are only kept so they can be reaped; there is no way
/// to list, stop or resume them.
#[derive(Debug, Default)]
pub struct Launcher {
    background: Vec<Child>,
}

impl Launcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `tokens[0]` with the whole token list as its argument vector.
    ///
    /// The program is looked up on `PATH` by the OS. A foreground launch
    /// blocks until the child exits and returns its exit code; a background
    /// launch returns `None` immediately.
    pub fn launch(
        &mut self,
        tokens: &[&str],
        background: bool,
    ) -> Result<Option<ExitCode>, LaunchError> {
        let Some((program, args)) = tokens.split_first() else {
            return Err(LaunchError::Exec(io::Error::new(
                io::ErrorKind::InvalidInput,
                "empty command",
            )));
        };

        let mut child = Command::new(program).args(args).spawn().map_err(classify)?;
        tracing::debug!(pid = child.id(), program, background, "spawned");

        if background {
            self.background.push(child);
            return Ok(None);
        }

        match child.wait() {
            Ok(status) => {
                let code = exit_code(status);
                tracing::debug!(program, code, "foreground child exited");
                Ok(Some(code))
            }
            Err(err) => {
                tracing::warn!(program, %err, "failed to wait for child");
                Ok(None)
            }
        }
    }

    /// Collect every background child that has already exited, without blocking.
    pub fn reap(&mut self) {
        self.background.retain_mut(|child| match child.try_wait() {
            Ok(Some(status)) => {
                let code = exit_code(status);
                tracing::debug!(pid = child.id(), code, "reaped background child");
                false
            }
            Ok(None) => true,
            // Someone else already collected it.
            Err(err) => {
                tracing::debug!(pid = child.id(), %err, "dropping unwaitable child");
                false
            }
        });
    }

    /// Background children not reaped yet.
    pub fn pending(&self) -> usize {
        self.background.len()
    }
}

/// Running out of processes or memory means no child was created at all.
fn classify(err: io::Error) -> LaunchError {
    match err.kind() {
        io::ErrorKind::WouldBlock | io::ErrorKind::OutOfMemory => LaunchError::Fork(err),
        _ => LaunchError::Exec(err),
    }
}

fn exit_code(status: ExitStatus) -> ExitCode {
    match status.code() {
        Some(x) => x,
        None => terminated_by_signal(status),
    }
}

#[cfg(unix)]
fn terminated_by_signal(exit_status: ExitStatus) -> ExitCode {
    use std::os::unix::process::ExitStatusExt;
    if let Some(signal) = ExitStatusExt::signal(&exit_status) {
        128 + signal
    } else {
        -1
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_exit_status: ExitStatus) -> ExitCode {
    -1
}
