use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Maps extra command words onto built-in commands, e.g. `"+" = "add"`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct AliasTable {
    map: HashMap<String, String>,
}

impl AliasTable {
    #[allow(dead_code)]
    pub fn new(map: HashMap<String, String>) -> Self {
        Self { map }
    }

    pub fn get(&self, word: &str) -> Option<&str> {
        self.map.get(word).map(|s| s.as_str())
    }

    /// Rewrite the first word of `line` if it is an alias
    pub fn expand(&self, line: &str) -> String {
        let trimmed = line.trim();
        let (word, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, Some(rest)),
            None => (trimmed, None),
        };

        match (self.get(word), rest) {
            (Some(target), Some(rest)) => format!("{} {}", target, rest),
            (Some(target), None) => target.to_string(),
            (None, _) => trimmed.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where the playlist library is saved
    pub store_path: Option<PathBuf>,
    /// Cap on undo history per playlist (unbounded when absent)
    pub history_limit: Option<usize>,
    pub aliases: AliasTable,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from TOML file
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, String> {
        toml::from_str(content)
            .map_err(|e| format!("Failed to parse config file: {}", e))
    }
}
