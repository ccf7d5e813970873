//! Almanac Core - Core library for changelog generation
//!
//! This crate provides the foundational types, error handling and
//! configuration shared by the Almanac crates.

pub mod config;
pub mod error;
pub mod types;

pub use config::{load_config, load_config_or_default, Config};
pub use error::{AlmanacError, ConfigError, GitError, Result};
pub use types::ParserMode;
