use crate::dirs::DirectoryTracker;
use crate::env::Environment;
use crate::history::History;

/// Everything a command may read or change between prompts.
///
/// Owned by the [`Interpreter`](crate::Interpreter) and lent to builtins. The
/// interrupt handler never sees it.
#[derive(Debug, Clone)]
pub struct Session {
    pub history: History,
    pub dirs: DirectoryTracker,
    pub env: Environment,
}

impl Session {
    /// A fresh session with an empty history of the given depth.
    pub fn new(history_depth: usize, env: Environment) -> Self {
        Self {
            history: History::new(history_depth),
            dirs: DirectoryTracker::new(),
            env,
        }
    }
}
