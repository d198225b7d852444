//! Lexicon entry model.

use serde::Serialize;

/// Qualification status of an emoji sequence, as declared by the Unicode
/// data file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Component,
    FullyQualified,
    MinimallyQualified,
    Unqualified,
}

impl Status {
    /// Parse the status column of a data line.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "component" => Some(Self::Component),
            "fully-qualified" => Some(Self::FullyQualified),
            "minimally-qualified" => Some(Self::MinimallyQualified),
            "unqualified" => Some(Self::Unqualified),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Component => "component",
            Self::FullyQualified => "fully-qualified",
            Self::MinimallyQualified => "minimally-qualified",
            Self::Unqualified => "unqualified",
        }
    }
}

/// Metadata for one valid emoji sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LexiconEntry {
    pub status: Status,
    /// Emoji version the sequence was introduced in, e.g. `E1.0`.
    pub version: String,
    pub description: String,
    pub group: String,
    pub subgroup: String,
}
