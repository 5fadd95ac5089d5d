//! Shared helpers for tests that touch process-wide state.

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, OnceLock};

/// Serialise tests that read or change the process working directory.
pub fn lock_current_dir() -> MutexGuard<'static, ()> {
    static MUTEX: OnceLock<Mutex<()>> = OnceLock::new();
    MUTEX
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Holds the cwd lock and puts the original directory back on drop.
pub struct CwdGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl CwdGuard {
    pub fn new() -> Self {
        let lock = lock_current_dir();
        let original = std::env::current_dir().unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// Canonical form of a path, so macOS `/private/tmp` style links compare equal.
pub fn canonical(path: impl Into<PathBuf>) -> PathBuf {
    let path = path.into();
    std::fs::canonicalize(&path).unwrap_or(path)
}
