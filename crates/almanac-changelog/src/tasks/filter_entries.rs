//! Entry filtering by type

use almanac_tasks::{Task, TaskKind, TaskOutcome};
use tracing::{debug, instrument};

use super::ParseCommitsTask;
use crate::parser::CommitType;
use crate::types::Changelog;

/// Keeps entries of the configured types. Breaking changes are always kept.
pub struct FilterEntriesTask {
    include_types: Vec<CommitType>,
}

impl FilterEntriesTask {
    /// Create the task; an empty list keeps every entry
    pub fn new<I, S>(include_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            include_types: include_types
                .into_iter()
                .map(|t| CommitType::new(t.as_ref()))
                .collect(),
        }
    }
}

impl Task<Changelog> for FilterEntriesTask {
    fn runs_after(&self) -> Vec<TaskKind> {
        vec![TaskKind::of::<ParseCommitsTask>()]
    }

    #[instrument(skip_all, name = "filter_entries")]
    fn run(&mut self, changelog: &mut Changelog) -> TaskOutcome {
        if self.include_types.is_empty() {
            return TaskOutcome::skipped("no entry types configured, keeping all entries");
        }

        for version in &mut changelog.versions {
            let before = version.entries.len();
            version
                .entries
                .retain(|e| e.breaking || self.include_types.contains(&e.kind));
            debug!(
                version = %version.version.version,
                removed = before - version.entries.len(),
                "filtered entries"
            );
        }

        TaskOutcome::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::tasks::test_support::commit;
    use crate::types::{ChangelogEntry, VersionChangelog, VersionInfo};
    use semver::Version;

    fn changelog(messages: &[&str]) -> Changelog {
        let mut version = VersionChangelog::new(VersionInfo::new(Version::new(1, 0, 0), "head"));
        for (i, message) in messages.iter().enumerate() {
            let raw = commit(&format!("c{}", i), message);
            let parsed = parse(message, false).unwrap();
            version.entries.push(ChangelogEntry::from_commit(&raw, parsed));
        }
        Changelog {
            versions: vec![version],
        }
    }

    fn summaries(changelog: &Changelog) -> Vec<&str> {
        changelog.versions[0]
            .entries
            .iter()
            .map(|e| e.summary.as_str())
            .collect()
    }

    #[test]
    fn test_keeps_included_and_breaking() {
        let mut changelog = changelog(&[
            "feat: one",
            "chore: two",
            "FIX: three",
            "refactor!: four",
            "docs: five\n\nBREAKING-CHANGE: moved",
        ]);
        let outcome = FilterEntriesTask::new(["feat", "fix"]).run(&mut changelog);

        assert_eq!(outcome, TaskOutcome::Success);
        assert_eq!(summaries(&changelog), vec!["one", "three", "four", "five"]);
    }

    #[test]
    fn test_empty_include_list_is_skipped() {
        let mut changelog = changelog(&["feat: one", "chore: two"]);
        let outcome = FilterEntriesTask::new(Vec::<String>::new()).run(&mut changelog);

        assert!(matches!(outcome, TaskOutcome::Skipped(_)));
        assert_eq!(changelog.entry_count(), 2);
    }
}
