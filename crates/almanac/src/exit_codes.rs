//! Exit codes for the CLI

use almanac_changelog::{GenerateError, ParseError};
use almanac_core::{AlmanacError, ConfigError, GitError};
use almanac_tasks::PipelineError;

/// Success
pub const SUCCESS: u8 = 0;

/// General error
pub const ERROR: u8 = 1;

/// Configuration error
pub const CONFIG_ERROR: u8 = 2;

/// Git error
pub const GIT_ERROR: u8 = 3;

/// Validation error (commit message did not parse)
pub const VALIDATION_ERROR: u8 = 5;

/// Task dependencies are missing or cyclic
pub const PIPELINE_ERROR: u8 = 6;

/// Map an error to the exit code of its first recognised cause
pub fn for_error(error: &anyhow::Error) -> u8 {
    for cause in error.chain() {
        if cause.is::<ConfigError>() {
            return CONFIG_ERROR;
        }
        if cause.is::<GitError>() {
            return GIT_ERROR;
        }
        if cause.is::<ParseError>() {
            return VALIDATION_ERROR;
        }
        if let Some(error) = cause.downcast_ref::<AlmanacError>() {
            return match error {
                AlmanacError::Config(_) => CONFIG_ERROR,
                AlmanacError::Git(_) => GIT_ERROR,
                _ => ERROR,
            };
        }
        if let Some(error) = cause.downcast_ref::<PipelineError>() {
            if error.is_configuration_error() {
                return PIPELINE_ERROR;
            }
        }
        if let Some(GenerateError::Pipeline(error)) = cause.downcast_ref::<GenerateError>() {
            if error.is_configuration_error() {
                return PIPELINE_ERROR;
            }
        }
    }
    ERROR
}
