use std::collections::HashMap;
use std::env as stdenv;

/// Variables the shell consults, captured from the process environment.
///
/// Only `HOME` is read today (by `cd`). Tests override entries with
/// [`Environment::set_var`] instead of mutating the real process environment.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    vars: HashMap<String, String>,
}

impl Environment {
    /// Snapshot `std::env::vars()`.
    pub fn from_process() -> Self {
        Self {
            vars: stdenv::vars().collect(),
        }
    }

    /// Get the value of a variable.
    ///
    /// Looks up the key in the snapshot first, falling back to `std::env::var`.
    pub fn get_var(&self, key: &str) -> Option<String> {
        self.vars
            .get(key)
            .cloned()
            .or_else(|| stdenv::var(key).ok())
    }

    /// Set or override a variable in the snapshot.
    pub fn set_var(&mut self, key: impl Into<String>, val: impl Into<String>) {
        self.vars.insert(key.into(), val.into());
    }

    /// The user's home directory, if `HOME` is set and non-empty.
    pub fn home(&self) -> Option<String> {
        self.get_var("HOME").filter(|home| !home.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_set_and_get_var() {
        let mut env = Environment::default();

        // initially absent
        assert_eq!(env.get_var("SOME_RANDOM_ENV_VAR_12345"), None);

        env.set_var("KEY", "VALUE");

        assert_eq!(env.get_var("KEY"), Some("VALUE".to_string()));
    }

    #[test]
    fn test_env_reads_from_process_env() {
        let env = Environment::from_process();
        assert!(env.get_var("PATH").is_some());
    }

    #[test]
    fn test_empty_home_is_treated_as_unset() {
        let mut env = Environment::default();
        env.set_var("HOME", "");
        assert_eq!(env.home(), None);
        env.set_var("HOME", "/home/u");
        assert_eq!(env.home().as_deref(), Some("/home/u"));
    }
}
