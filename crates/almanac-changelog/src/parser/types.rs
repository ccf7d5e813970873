//! Parsed commit message model

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Characters of `name` with Unicode lowercase folding applied
fn folded(name: &str) -> impl Iterator<Item = char> + '_ {
    name.chars().flat_map(char::to_lowercase)
}

fn same_name(a: &str, b: &str) -> bool {
    folded(a).eq(folded(b))
}

macro_rules! case_insensitive_name {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new name, keeping its spelling
            pub fn new(name: impl Into<String>) -> Self {
                Self(name.into())
            }

            /// The name as written
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                same_name(&self.0, &other.0)
            }
        }

        impl Eq for $name {}

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                same_name(&self.0, other)
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                same_name(&self.0, other)
            }
        }

        impl Hash for $name {
            fn hash<H: Hasher>(&self, state: &mut H) {
                for c in folded(&self.0) {
                    c.hash(state);
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(name: &str) -> Self {
                Self::new(name)
            }
        }
    };
}

case_insensitive_name!(
    /// Commit type such as `feat` or `fix`; compared case-insensitively
    CommitType
);

case_insensitive_name!(
    /// Footer name such as `Closes` or `BREAKING CHANGE`; compared case-insensitively
    FooterName
);

impl FooterName {
    /// Check if this footer announces a breaking change
    pub fn is_breaking_change(&self) -> bool {
        self.0.eq_ignore_ascii_case("BREAKING CHANGE") || self.0.eq_ignore_ascii_case("BREAKING-CHANGE")
    }
}

/// First line of a commit message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitHeader {
    /// Commit type
    #[serde(rename = "type")]
    pub commit_type: CommitType,
    /// Optional scope
    pub scope: Option<String>,
    /// Description, never empty
    pub description: String,
    /// Whether the header carries the `!` marker
    pub is_breaking_change: bool,
}

impl fmt::Display for CommitHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.commit_type)?;
        if let Some(scope) = &self.scope {
            write!(f, "({})", scope)?;
        }
        if self.is_breaking_change {
            f.write_str("!")?;
        }
        write!(f, ": {}", self.description)
    }
}

/// A trailing `name: value` or `name #value` line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footer {
    /// Footer name
    pub name: FooterName,
    /// Footer value, exactly as written
    pub value: String,
}

impl Footer {
    /// Create a new footer
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: FooterName::new(name),
            value: value.into(),
        }
    }
}

impl fmt::Display for Footer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}

/// A commit message split into header, body paragraphs and footers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCommitMessage {
    /// The header line
    pub header: CommitHeader,
    /// Body paragraphs in document order; each keeps its inner line breaks
    pub body: Vec<String>,
    /// Footers in document order
    pub footers: Vec<Footer>,
}

impl ParsedCommitMessage {
    /// Check if the header has `!` or any footer is a breaking change
    pub fn is_breaking_change(&self) -> bool {
        self.header.is_breaking_change || self.footers.iter().any(|f| f.name.is_breaking_change())
    }

    /// Values of all breaking change footers
    pub fn breaking_change_descriptions(&self) -> Vec<&str> {
        self.footers
            .iter()
            .filter(|f| f.name.is_breaking_change())
            .map(|f| f.value.as_str())
            .collect()
    }

    /// First footer with the given name (case-insensitive)
    pub fn footer(&self, name: &str) -> Option<&Footer> {
        self.footers.iter().find(|f| f.name == name)
    }
}

impl fmt::Display for ParsedCommitMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header)?;
        for paragraph in &self.body {
            write!(f, "\n\n{}", paragraph)?;
        }
        for (index, footer) in self.footers.iter().enumerate() {
            let separator = if index == 0 { "\n\n" } else { "\n" };
            write!(f, "{}{}", separator, footer)?;
        }
        Ok(())
    }
}
