//! Core types for Almanac

use serde::{Deserialize, Serialize};

/// How strictly commit messages are checked against the Conventional Commits grammar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParserMode {
    /// Blank-line irregularities are tolerated and collapsed
    #[default]
    Loose,
    /// Exactly one blank line between sections, no trailing blank lines
    Strict,
}

impl ParserMode {
    /// Returns the string representation of the mode
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Loose => "loose",
            Self::Strict => "strict",
        }
    }

    /// Check whether this is strict mode
    pub fn is_strict(&self) -> bool {
        matches!(self, Self::Strict)
    }
}

impl From<bool> for ParserMode {
    fn from(strict: bool) -> Self {
        if strict {
            Self::Strict
        } else {
            Self::Loose
        }
    }
}

impl std::fmt::Display for ParserMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ParserMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "loose" => Ok(Self::Loose),
            "strict" => Ok(Self::Strict),
            _ => Err(format!("Unknown parser mode: {}", s)),
        }
    }
}
