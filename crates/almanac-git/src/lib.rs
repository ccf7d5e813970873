//! Almanac Git - Git operations for changelog generation
//!
//! This crate exposes the small slice of repository access the changelog
//! pipeline needs: tags, the HEAD commit and commit ranges.

mod commits;
mod repository;
mod tags;
pub mod types;

pub use repository::{GitRepo, Result};
pub use types::{CommitInfo, TagInfo};
