//! Commit sources the pipeline reads history from

use almanac_core::GitError;
use almanac_git::{CommitInfo, GitRepo, TagInfo};

/// Read access to repository history
pub trait CommitSource {
    /// All tags, peeled to commits
    fn tags(&self) -> Result<Vec<TagInfo>, GitError>;

    /// Hash of the HEAD commit
    fn head_commit_hash(&self) -> Result<String, GitError>;

    /// Commits reachable from `until` but not from `since`, newest first
    fn commits_between(&self, since: Option<&str>, until: &str) -> Result<Vec<CommitInfo>, GitError>;
}

impl CommitSource for GitRepo {
    fn tags(&self) -> Result<Vec<TagInfo>, GitError> {
        GitRepo::tags(self)
    }

    fn head_commit_hash(&self) -> Result<String, GitError> {
        GitRepo::head_commit_hash(self)
    }

    fn commits_between(&self, since: Option<&str>, until: &str) -> Result<Vec<CommitInfo>, GitError> {
        GitRepo::commits_between(self, since, until)
    }
}

/// Linear history held in memory.
///
/// Commits are stored oldest first; each one's parent is the commit added
/// before it.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    commits: Vec<CommitInfo>,
    tags: Vec<TagInfo>,
}

impl InMemorySource {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a commit on top of the history
    pub fn with_commit(mut self, commit: CommitInfo) -> Self {
        self.commits.push(commit);
        self
    }

    /// Tag the most recent commit
    pub fn with_tag(mut self, name: impl Into<String>) -> Self {
        if let Some(head) = self.commits.last() {
            self.tags.push(TagInfo::new(name, head.hash.clone()));
        }
        self
    }

    fn position(&self, hash: &str) -> Result<usize, GitError> {
        self.commits
            .iter()
            .position(|c| c.hash == hash)
            .ok_or_else(|| GitError::OpenFailed(format!("unknown commit {}", hash)))
    }
}

impl CommitSource for InMemorySource {
    fn tags(&self) -> Result<Vec<TagInfo>, GitError> {
        let mut tags = self.tags.clone();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    fn head_commit_hash(&self) -> Result<String, GitError> {
        self.commits
            .last()
            .map(|c| c.hash.clone())
            .ok_or(GitError::NoCommits)
    }

    fn commits_between(&self, since: Option<&str>, until: &str) -> Result<Vec<CommitInfo>, GitError> {
        let end = self.position(until)?;
        let start = match since {
            Some(since) => self.position(since)? + 1,
            None => 0,
        };

        if start > end {
            return Ok(Vec::new());
        }
        Ok(self.commits[start..=end].iter().rev().cloned().collect())
    }
}
