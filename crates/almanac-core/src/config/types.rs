//! Configuration types

use serde::{Deserialize, Serialize};

use crate::types::ParserMode;

/// Main configuration for Almanac
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Commit message parser configuration
    pub parser: ParserConfig,

    /// Changelog configuration
    pub changelog: ChangelogConfig,
}

/// Commit message parser configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Grammar leniency used for every commit message
    pub mode: ParserMode,
}

/// Changelog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangelogConfig {
    /// Prefixes stripped from tag names before parsing them as versions
    pub tag_prefixes: Vec<String>,

    /// Version to assign to commits not yet covered by a tag
    pub current_version: Option<String>,

    /// Entry types to keep (empty keeps everything)
    pub include_types: Vec<String>,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            tag_prefixes: vec!["v".to_string()],
            current_version: None,
            include_types: vec!["feat".to_string(), "fix".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.parser.mode, ParserMode::Loose);
        assert_eq!(config.changelog.tag_prefixes, vec!["v"]);
        assert_eq!(config.changelog.include_types, vec!["feat", "fix"]);
        assert!(config.changelog.current_version.is_none());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str("[parser]\nmode = \"strict\"\n").unwrap();
        assert_eq!(config.parser.mode, ParserMode::Strict);
        assert_eq!(config.changelog.tag_prefixes, vec!["v"]);
    }
}
