//! Commit ranges per version

use std::rc::Rc;

use almanac_tasks::{Task, TaskKind, TaskOutcome};
use tracing::{debug, info, instrument};

use super::{LoadCurrentVersionTask, LoadVersionsFromTagsTask};
use crate::source::CommitSource;
use crate::types::Changelog;

/// Sorts versions ascending and loads the commits each one introduced.
///
/// A version's commits are those reachable from its commit but not from the
/// previous version's commit; the oldest version gets its whole history.
pub struct LoadCommitsTask {
    source: Rc<dyn CommitSource>,
}

impl LoadCommitsTask {
    /// Create the task
    pub fn new(source: Rc<dyn CommitSource>) -> Self {
        Self { source }
    }
}

impl Task<Changelog> for LoadCommitsTask {
    fn runs_after(&self) -> Vec<TaskKind> {
        vec![
            TaskKind::of::<LoadVersionsFromTagsTask>(),
            TaskKind::of::<LoadCurrentVersionTask>(),
        ]
    }

    #[instrument(skip_all, name = "load_commits", fields(versions = changelog.len()))]
    fn run(&mut self, changelog: &mut Changelog) -> TaskOutcome {
        if changelog.is_empty() {
            return TaskOutcome::skipped("no versions to load commits for");
        }

        changelog
            .versions
            .sort_by(|a, b| a.version.version.cmp(&b.version.version));

        let mut previous: Option<String> = None;
        let mut total = 0;
        for entry in &mut changelog.versions {
            let commits = match self
                .source
                .commits_between(previous.as_deref(), &entry.version.commit)
            {
                Ok(commits) => commits,
                Err(e) => {
                    return TaskOutcome::error(format!(
                        "failed to load commits for {}: {}",
                        entry.version.version, e
                    ))
                }
            };

            debug!(version = %entry.version.version, commits = commits.len(), "loaded commit range");
            total += commits.len();
            entry.commits = commits;
            previous = Some(entry.version.commit.clone());
        }

        info!(commits = total, "loaded commits");
        TaskOutcome::Success
    }
}
