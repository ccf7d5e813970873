//! Version for the untagged HEAD

use std::rc::Rc;

use almanac_tasks::{Task, TaskKind, TaskOutcome};
use semver::Version;
use tracing::{info, instrument};

use super::LoadVersionsFromTagsTask;
use crate::source::CommitSource;
use crate::types::{Changelog, VersionInfo};

/// Adds the configured current version, pointing at HEAD
pub struct LoadCurrentVersionTask {
    source: Rc<dyn CommitSource>,
    current_version: Option<String>,
}

impl LoadCurrentVersionTask {
    /// Create the task
    pub fn new(source: Rc<dyn CommitSource>, current_version: Option<String>) -> Self {
        Self {
            source,
            current_version,
        }
    }
}

impl Task<Changelog> for LoadCurrentVersionTask {
    fn runs_after(&self) -> Vec<TaskKind> {
        vec![TaskKind::of::<LoadVersionsFromTagsTask>()]
    }

    #[instrument(skip_all, name = "load_current_version")]
    fn run(&mut self, changelog: &mut Changelog) -> TaskOutcome {
        let Some(current) = self.current_version.as_deref() else {
            return TaskOutcome::skipped("no current version configured");
        };

        let version = match Version::parse(current) {
            Ok(version) => version,
            Err(e) => return TaskOutcome::error(format!("invalid current version '{}': {}", current, e)),
        };

        if changelog.contains_version(&version) {
            return TaskOutcome::error(format!("version {} is already tagged", version));
        }

        let head = match self.source.head_commit_hash() {
            Ok(head) => head,
            Err(e) => return TaskOutcome::error(format!("failed to resolve HEAD: {}", e)),
        };

        info!(%version, commit = %head, "added current version");
        changelog.add_version(VersionInfo::new(version, head));
        TaskOutcome::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::test_support::history;

    fn run(current: Option<&str>) -> (TaskOutcome, Changelog) {
        let source = history();
        let mut changelog = Changelog::new();
        LoadVersionsFromTagsTask::new(source.clone(), vec!["v".to_string()]).run(&mut changelog);
        let outcome =
            LoadCurrentVersionTask::new(source, current.map(str::to_string)).run(&mut changelog);
        (outcome, changelog)
    }

    #[test]
    fn test_skipped_without_current_version() {
        let (outcome, changelog) = run(None);
        assert!(matches!(outcome, TaskOutcome::Skipped(_)));
        assert_eq!(changelog.len(), 2);
    }

    #[test]
    fn test_adds_version_at_head() {
        let (outcome, changelog) = run(Some("0.3.0"));
        assert_eq!(outcome, TaskOutcome::Success);

        let current = changelog.version(&Version::new(0, 3, 0)).unwrap();
        assert_eq!(current.version.commit, "f6");
        assert!(current.version.tag.is_none());
    }

    #[test]
    fn test_invalid_version_is_error() {
        let (outcome, _) = run(Some("next"));
        assert!(outcome.is_error());
    }

    #[test]
    fn test_already_tagged_version_is_error() {
        let (outcome, changelog) = run(Some("0.2.0"));
        assert_eq!(outcome, TaskOutcome::error("version 0.2.0 is already tagged"));
        assert_eq!(changelog.len(), 2);
    }

    #[test]
    fn test_runs_after_tag_loading() {
        let task = LoadCurrentVersionTask::new(history(), None);
        assert_eq!(task.runs_after(), vec![TaskKind::of::<LoadVersionsFromTagsTask>()]);
    }
}
