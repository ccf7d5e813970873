//! Commit message parsing

use almanac_core::ParserMode;
use almanac_tasks::{Task, TaskKind, TaskOutcome};
use tracing::{info, instrument, warn};

use super::LoadCommitsTask;
use crate::parser::parse;
use crate::types::{Changelog, ChangelogEntry};

/// Turns every loaded commit into a changelog entry.
///
/// Messages that do not parse are dropped and logged; they never fail the
/// task.
pub struct ParseCommitsTask {
    mode: ParserMode,
}

impl ParseCommitsTask {
    /// Create the task
    pub fn new(mode: ParserMode) -> Self {
        Self { mode }
    }
}

impl Task<Changelog> for ParseCommitsTask {
    fn runs_after(&self) -> Vec<TaskKind> {
        vec![TaskKind::of::<LoadCommitsTask>()]
    }

    #[instrument(skip_all, name = "parse_commits", fields(mode = %self.mode))]
    fn run(&mut self, changelog: &mut Changelog) -> TaskOutcome {
        let mut parsed = 0;
        let mut dropped = 0;

        for version in &mut changelog.versions {
            version.entries.clear();
            for commit in &version.commits {
                match parse(&commit.message, self.mode) {
                    Ok(message) => {
                        version.entries.push(ChangelogEntry::from_commit(commit, message));
                        parsed += 1;
                    }
                    Err(e) => {
                        warn!(
                            commit = %commit.short_hash,
                            line = e.line,
                            column = e.column,
                            "dropping commit with unparsable message: {}",
                            e.message
                        );
                        dropped += 1;
                    }
                }
            }
        }

        info!(parsed, dropped, "parsed commit messages");
        TaskOutcome::Success
    }
}
