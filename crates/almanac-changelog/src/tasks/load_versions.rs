//! Versions from tags

use std::rc::Rc;

use almanac_tasks::{Task, TaskOutcome};
use semver::Version;
use tracing::{debug, info, instrument, warn};

use crate::source::CommitSource;
use crate::types::{Changelog, VersionInfo};

/// Adds a version for every tag that parses as a semantic version.
///
/// The first matching prefix is stripped from the tag name before parsing.
/// When two tags map to the same version the first one (by tag name) wins.
pub struct LoadVersionsFromTagsTask {
    source: Rc<dyn CommitSource>,
    tag_prefixes: Vec<String>,
}

impl LoadVersionsFromTagsTask {
    /// Create the task
    pub fn new(source: Rc<dyn CommitSource>, tag_prefixes: Vec<String>) -> Self {
        Self {
            source,
            tag_prefixes,
        }
    }

    fn version_of(&self, tag: &str) -> Option<Version> {
        let stripped = self
            .tag_prefixes
            .iter()
            .find_map(|prefix| tag.strip_prefix(prefix.as_str()))
            .unwrap_or(tag);
        Version::parse(stripped).ok()
    }
}

impl Task<Changelog> for LoadVersionsFromTagsTask {
    #[instrument(skip_all, name = "load_versions_from_tags")]
    fn run(&mut self, changelog: &mut Changelog) -> TaskOutcome {
        let tags = match self.source.tags() {
            Ok(tags) => tags,
            Err(e) => return TaskOutcome::error(format!("failed to read tags: {}", e)),
        };

        let mut added = 0;
        for tag in tags {
            let Some(version) = self.version_of(&tag.name) else {
                debug!(tag = %tag.name, "tag is not a version, ignoring");
                continue;
            };

            let info = VersionInfo::new(version.clone(), &tag.commit_hash).with_tag(&tag.name);
            if changelog.add_version(info) {
                added += 1;
            } else {
                warn!(tag = %tag.name, %version, "version already loaded from another tag, ignoring");
            }
        }

        info!(versions = added, "loaded versions from tags");
        TaskOutcome::Success
    }
}
