//! SIGINT handling.
//!
//! The handler runs asynchronously, between any two instructions of the
//! command loop. It only stores into an atomic flag and writes pre-rendered
//! bytes straight to fd 1; it never allocates, locks or touches the session.
//! The loop picks the flag up with [`take`] once the blocking read returns.
//!
//! Installing a handler requires `sigaction`, which is unsafe per POSIX. This
//! is the only module with unsafe code.

use nix::libc;
use nix::sys::signal::{self, SaFlags, SigAction, SigHandler, SigSet, Signal};
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Help text printed on every SIGINT. Written once, before installation.
static BANNER: OnceLock<Vec<u8>> = OnceLock::new();

/// Install the SIGINT handler.
///
/// No `SA_RESTART`, so a blocking `read` in progress fails with `EINTR`.
/// `banner` is written after a newline each time the signal arrives; only the
/// first banner ever passed is kept.
pub fn install(banner: Vec<u8>) -> nix::Result<()> {
    if BANNER.set(banner).is_err() {
        tracing::debug!("interrupt banner already set");
    }
    let action = SigAction::new(
        SigHandler::Handler(on_sigint),
        SaFlags::empty(),
        SigSet::empty(),
    );
    // SAFETY: `on_sigint` only performs an atomic store, a lock-free
    // `OnceLock::get` and `write(2)`, all async-signal-safe.
    unsafe {
        signal::sigaction(Signal::SIGINT, &action)?;
    }
    tracing::debug!("SIGINT handler installed");
    Ok(())
}

extern "C" fn on_sigint(_: libc::c_int) {
    INTERRUPTED.store(true, Ordering::SeqCst);
    write_stdout(b"\n");
    if let Some(banner) = BANNER.get() {
        write_stdout(banner);
    }
}

/// Best-effort `write(2)` to fd 1; short writes and errors are ignored.
fn write_stdout(bytes: &[u8]) {
    // SAFETY: the pointer and length come from a live slice.
    unsafe {
        libc::write(libc::STDOUT_FILENO, bytes.as_ptr().cast(), bytes.len());
    }
}

/// Whether an interrupt arrived since the last call; clears the flag.
pub fn take() -> bool {
    INTERRUPTED.swap(false, Ordering::SeqCst)
}

/// Forget any interrupt that arrived so far.
pub fn clear() {
    INTERRUPTED.store(false, Ordering::SeqCst);
}
