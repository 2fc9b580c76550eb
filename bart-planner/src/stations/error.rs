//! Station directory error types.

use crate::domain::InvalidStationCode;

/// Errors that can occur when building a station directory.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    /// A table entry carries a malformed code
    #[error("station {name:?} has an invalid code {code:?}: {source}")]
    InvalidCode {
        name: String,
        code: String,
        source: InvalidStationCode,
    },

    /// Two entries share a name (compared case-insensitively)
    #[error("duplicate station name: {0}")]
    DuplicateName(String),

    /// Two entries share a code
    #[error("duplicate station code: {0}")]
    DuplicateCode(String),
}

/// Errors from directory search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The search text was empty or whitespace only
    #[error("Please enter a station name")]
    EmptyQuery,
}
