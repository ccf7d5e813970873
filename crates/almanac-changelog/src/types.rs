//! Changelog document model

use almanac_git::CommitInfo;
use chrono::{DateTime, Utc};
use semver::Version;
use serde::{Deserialize, Serialize};

use crate::parser::{CommitType, Footer, ParsedCommitMessage};

/// A released (or about to be released) version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    /// Semantic version
    pub version: Version,
    /// Tag the version was read from, `None` for the unreleased HEAD
    pub tag: Option<String>,
    /// Commit the version points at
    pub commit: String,
}

impl VersionInfo {
    /// Create a version info
    pub fn new(version: Version, commit: impl Into<String>) -> Self {
        Self {
            version,
            tag: None,
            commit: commit.into(),
        }
    }

    /// Set the tag name
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}

/// A single changelog line built from a parsed commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogEntry {
    /// Commit hash
    pub hash: String,
    /// Commit date
    pub date: DateTime<Utc>,
    /// Commit author
    pub author: String,
    /// Commit type
    pub kind: CommitType,
    /// Scope from the header
    pub scope: Option<String>,
    /// Header description
    pub summary: String,
    /// Body paragraphs
    pub body: Vec<String>,
    /// Footers
    pub footers: Vec<Footer>,
    /// Whether the commit is a breaking change
    pub breaking: bool,
    /// Breaking change descriptions from footers
    pub breaking_changes: Vec<String>,
}

impl ChangelogEntry {
    /// Build an entry from commit metadata and its parsed message
    pub fn from_commit(commit: &CommitInfo, message: ParsedCommitMessage) -> Self {
        let breaking = message.is_breaking_change();
        let breaking_changes = message
            .breaking_change_descriptions()
            .into_iter()
            .map(str::to_string)
            .collect();

        Self {
            hash: commit.hash.clone(),
            date: commit.timestamp,
            author: commit.author.clone(),
            kind: message.header.commit_type,
            scope: message.header.scope,
            summary: message.header.description,
            body: message.body,
            footers: message.footers,
            breaking,
            breaking_changes,
        }
    }
}

/// Changes that went into one version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionChangelog {
    /// The version
    pub version: VersionInfo,
    /// Raw commits between the previous version and this one
    pub commits: Vec<CommitInfo>,
    /// Entries built from those commits
    pub entries: Vec<ChangelogEntry>,
}

impl VersionChangelog {
    /// Create an empty changelog for a version
    pub fn new(version: VersionInfo) -> Self {
        Self {
            version,
            commits: Vec::new(),
            entries: Vec::new(),
        }
    }

    /// Entries of a type, in commit order
    pub fn entries_of<'a>(&'a self, kind: &'a CommitType) -> impl Iterator<Item = &'a ChangelogEntry> {
        self.entries.iter().filter(move |e| &e.kind == kind)
    }

    /// Entries flagged as breaking changes
    pub fn breaking_entries(&self) -> impl Iterator<Item = &ChangelogEntry> {
        self.entries.iter().filter(|e| e.breaking)
    }
}

/// The document the changelog pipeline builds
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Changelog {
    /// Versions, ascending once commits are loaded
    pub versions: Vec<VersionChangelog>,
}

impl Changelog {
    /// Create an empty changelog
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a version. Returns `false` if it is already present.
    pub fn add_version(&mut self, version: VersionInfo) -> bool {
        if self.contains_version(&version.version) {
            return false;
        }
        self.versions.push(VersionChangelog::new(version));
        true
    }

    /// Check if a version is present
    pub fn contains_version(&self, version: &Version) -> bool {
        self.versions.iter().any(|v| &v.version.version == version)
    }

    /// Get a version's changelog
    pub fn version(&self, version: &Version) -> Option<&VersionChangelog> {
        self.versions.iter().find(|v| &v.version.version == version)
    }

    /// Number of versions
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    /// Check if there are no versions
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Total entries across versions
    pub fn entry_count(&self) -> usize {
        self.versions.iter().map(|v| v.entries.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn commit(message: &str) -> CommitInfo {
        CommitInfo::new("0123456789abcdef", message, "Ada", "ada@example.com", Utc::now())
    }

    #[test]
    fn test_entry_from_commit() {
        let raw = commit("feat(cli)!: new flags\n\nDetails.\n\nBREAKING CHANGE: -x removed");
        let entry = ChangelogEntry::from_commit(&raw, parse(&raw.message, true).unwrap());

        assert_eq!(entry.hash, "0123456789abcdef");
        assert_eq!(entry.author, "Ada");
        assert_eq!(entry.kind, "feat");
        assert_eq!(entry.scope.as_deref(), Some("cli"));
        assert_eq!(entry.summary, "new flags");
        assert_eq!(entry.body, vec!["Details."]);
        assert!(entry.breaking);
        assert_eq!(entry.breaking_changes, vec!["-x removed"]);
    }

    #[test]
    fn test_add_version_rejects_duplicates() {
        let mut changelog = Changelog::new();
        assert!(changelog.add_version(VersionInfo::new(Version::new(1, 0, 0), "a").with_tag("v1.0.0")));
        assert!(!changelog.add_version(VersionInfo::new(Version::new(1, 0, 0), "b")));
        assert_eq!(changelog.len(), 1);
        assert_eq!(
            changelog.version(&Version::new(1, 0, 0)).map(|v| v.version.commit.as_str()),
            Some("a")
        );
    }

    #[test]
    fn test_entries_by_kind() {
        let mut version = VersionChangelog::new(VersionInfo::new(Version::new(0, 1, 0), "a"));
        for message in ["feat: one", "fix: two", "Feat!: three"] {
            let raw = commit(message);
            version
                .entries
                .push(ChangelogEntry::from_commit(&raw, parse(message, true).unwrap()));
        }

        let feat = CommitType::new("feat");
        assert_eq!(version.entries_of(&feat).count(), 2);
        assert_eq!(version.breaking_entries().count(), 1);
    }

    #[test]
    fn test_serializes_to_json() {
        let mut changelog = Changelog::new();
        changelog.add_version(VersionInfo::new(Version::new(2, 1, 0), "abc").with_tag("v2.1.0"));
        let json = serde_json::to_value(&changelog).unwrap();
        assert_eq!(json["versions"][0]["version"]["version"], "2.1.0");
        assert_eq!(json["versions"][0]["version"]["tag"], "v2.1.0");
    }
}
