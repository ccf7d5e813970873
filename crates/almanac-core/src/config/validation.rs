//! Configuration validation

use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_changelog(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn validate_changelog(config: &Config) -> Result<()> {
    for (i, prefix) in config.changelog.tag_prefixes.iter().enumerate() {
        if prefix.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: format!("changelog.tag_prefixes[{}]", i),
                message: "prefix cannot be empty".to_string(),
            }
            .into());
        }
    }

    if let Some(version) = &config.changelog.current_version {
        if let Err(e) = semver::Version::parse(version) {
            return Err(ConfigError::InvalidValue {
                field: "changelog.current_version".to_string(),
                message: format!("'{}' is not a valid semantic version: {}", version, e),
            }
            .into());
        }
    }

    for (i, kind) in config.changelog.include_types.iter().enumerate() {
        if kind.is_empty() || kind.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidValue {
                field: format!("changelog.include_types[{}]", i),
                message: "type must be a non-empty word".to_string(),
            }
            .into());
        }
    }

    Ok(())
}
