use crate::history::DEFAULT_DEPTH;
use std::io::IsTerminal;

/// How command lines are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Line editor on a terminal, raw reads otherwise.
    #[default]
    Auto,
    /// Always raw reads.
    Plain,
}

/// Settings for one shell session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    /// Capacity of the history window.
    pub history_depth: usize,
    /// Emit ANSI colours.
    pub color: bool,
    pub input: InputMode,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            history_depth: DEFAULT_DEPTH,
            color: true,
            input: InputMode::Auto,
        }
    }
}

impl ShellConfig {
    /// Whether to read through the line editor.
    pub fn use_editor(&self) -> bool {
        self.input == InputMode::Auto && std::io::stdin().is_terminal()
    }
}

/// Parse a `--history-depth` value; the window holds at least one entry.
pub fn parse_depth(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("history depth must be at least 1".to_string()),
        Ok(depth) => Ok(depth),
        Err(err) => Err(format!("invalid history depth `{value}`: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_original_shell() {
        let config = ShellConfig::default();
        assert_eq!(config.history_depth, 10);
        assert!(config.color);
        assert_eq!(config.input, InputMode::Auto);
    }

    #[test]
    fn plain_mode_never_uses_editor() {
        let config = ShellConfig {
            input: InputMode::Plain,
            ..ShellConfig::default()
        };
        assert!(!config.use_editor());
    }

    #[test]
    fn depth_parsing() {
        assert_eq!(parse_depth("25"), Ok(25));
        assert!(parse_depth("0").is_err());
        assert!(parse_depth("ten").is_err());
    }
}
