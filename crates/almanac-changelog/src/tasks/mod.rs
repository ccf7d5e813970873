//! Changelog pipeline tasks
//!
//! Each task is a [`Task<Changelog>`](almanac_tasks::Task) that declares the
//! task types it runs after; the scheduler derives the execution order.

mod filter_entries;
mod load_commits;
mod load_current_version;
mod load_versions;
mod parse_commits;

pub use filter_entries::FilterEntriesTask;
pub use load_commits::LoadCommitsTask;
pub use load_current_version::LoadCurrentVersionTask;
pub use load_versions::LoadVersionsFromTagsTask;
pub use parse_commits::ParseCommitsTask;
