//! Almanac Changelog - Conventional Commit parsing and changelog generation
//!
//! This crate provides the commit message parser, the changelog document
//! model and the pipeline tasks that build a changelog from repository
//! history.

pub mod generator;
pub mod parser;
pub mod source;
pub mod tasks;
pub mod types;

pub use generator::{ChangelogGenerator, GenerateError};
pub use parser::{parse, CommitType, Footer, FooterName, ParseError, ParsedCommitMessage};
pub use source::{CommitSource, InMemorySource};
pub use types::{Changelog, ChangelogEntry, VersionChangelog, VersionInfo};
