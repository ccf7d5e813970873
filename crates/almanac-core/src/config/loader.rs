//! Configuration loading

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{ConfigError, Result};

use super::defaults::config_file_names;
use super::types::Config;
use super::validation::validate_config;

/// On-disk configuration format, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `toml`
    Toml,
    /// `serde_yaml`
    Yaml,
}

impl ConfigFormat {
    /// `.toml` files are TOML, anything else is read as YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension() {
            Some(ext) if ext == "toml" => Self::Toml,
            _ => Self::Yaml,
        }
    }

    fn parse(self, content: &str) -> Result<Config> {
        let config = match self {
            Self::Toml => toml::from_str(content).map_err(ConfigError::TomlError)?,
            Self::Yaml => serde_yaml::from_str(content).map_err(ConfigError::YamlError)?,
        };
        Ok(config)
    }
}

/// Read, parse and validate a configuration file
pub fn load_config(path: &Path) -> Result<Config> {
    let format = ConfigFormat::from_path(path);
    info!(path = %path.display(), ?format, "loading config");

    let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config = format.parse(&content)?;

    validate_config(&config)?;
    debug!(path = %path.display(), "config loaded");
    Ok(config)
}

/// Search `start_dir` and its ancestors for a config file.
///
/// Names are tried in [`config_file_names`] order at each level. The search
/// stops after the first directory holding a `.git` entry, so a config file
/// outside the enclosing repository is never picked up.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    debug!(start_dir = %start_dir.display(), "searching for config file");

    for dir in start_dir.ancestors() {
        if let Some(path) = config_file_names()
            .into_iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
        {
            info!(path = %path.display(), "found config file");
            return Some(path);
        }

        if dir.join(".git").exists() {
            debug!(repo_root = %dir.display(), "stopping at repository root");
            break;
        }
    }

    None
}

/// Load the nearest configuration, or defaults when there is none.
///
/// A file that exists but fails to parse or validate is an error.
pub fn load_config_or_default(dir: &Path) -> Result<(Config, Option<PathBuf>)> {
    match find_config(dir) {
        Some(path) => {
            let config = load_config(&path)?;
            Ok((config, Some(path)))
        }
        None => {
            warn!(dir = %dir.display(), "no config found, using defaults");
            Ok((Config::default(), None))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ParserMode;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_toml() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("almanac.toml");
        std::fs::write(&config_path, "[parser]\nmode = \"strict\"").unwrap();

        let found = find_config(temp.path());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_prefers_toml_over_yaml() {
        let temp = TempDir::new().unwrap();
        let toml_path = temp.path().join("almanac.toml");
        let yaml_path = temp.path().join("almanac.yaml");
        std::fs::write(&toml_path, "[parser]\nmode = \"strict\"").unwrap();
        std::fs::write(&yaml_path, "parser:\n  mode: loose").unwrap();

        let found = find_config(temp.path()).unwrap();
        assert_eq!(found, toml_path);
    }

    #[test]
    fn test_find_config_stops_at_repository_root() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("almanac.toml"), "[parser]\nmode = \"strict\"").unwrap();

        let repo = temp.path().join("repo");
        std::fs::create_dir_all(repo.join(".git")).unwrap();
        let nested = repo.join("src");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_config(&nested), None);

        let inner = repo.join(".almanac.yaml");
        std::fs::write(&inner, "parser:\n  mode: strict\n").unwrap();
        assert_eq!(find_config(&nested), Some(inner));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ConfigFormat::from_path(Path::new("almanac.toml")), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path(Path::new("almanac.yml")), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new(".almanac.yaml")), ConfigFormat::Yaml);
    }

    #[test]
    fn test_find_config_in_parent_dir() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("almanac.yaml");
        std::fs::write(&config_path, "parser:\n  mode: strict\n").unwrap();

        let nested = temp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_config(&nested), Some(config_path));
    }

    #[test]
    fn test_load_config_toml() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("almanac.toml");
        std::fs::write(
            &config_path,
            "[parser]\nmode = \"strict\"\n\n[changelog]\ncurrent_version = \"2.0.0\"\n",
        )
        .unwrap();

        let config = load_config(&config_path).unwrap();
        assert_eq!(config.parser.mode, ParserMode::Strict);
        assert_eq!(config.changelog.current_version.as_deref(), Some("2.0.0"));
    }

    #[test]
    fn test_load_config_yaml() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("almanac.yaml");
        std::fs::write(
            &config_path,
            "changelog:\n  include_types: [feat, fix, perf]\n",
        )
        .unwrap();

        let config = load_config(&config_path).unwrap();
        assert_eq!(config.changelog.include_types, vec!["feat", "fix", "perf"]);
        assert_eq!(config.parser.mode, ParserMode::Loose);
    }

    #[test]
    fn test_load_config_rejects_invalid_values() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("almanac.toml");
        std::fs::write(&config_path, "[changelog]\ncurrent_version = \"next\"\n").unwrap();

        assert!(load_config(&config_path).is_err());
    }

    #[test]
    fn test_load_config_or_default_without_file() {
        let temp = TempDir::new().unwrap();
        let (config, path) = load_config_or_default(temp.path()).unwrap();
        assert!(path.is_none());
        assert_eq!(config.changelog.tag_prefixes, vec!["v"]);
    }
}
