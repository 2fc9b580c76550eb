//! Substring search over station names.

use super::directory::{Station, StationDirectory, fold};
use super::error::SearchError;

/// Find every station whose name contains `text`, ignoring case.
///
/// Results are in directory order; there is no ranking. Leading and trailing
/// whitespace in `text` is ignored, and empty text is rejected rather than
/// matching everything.
pub fn search<'a>(
    text: &str,
    directory: &'a StationDirectory,
) -> Result<Vec<&'a Station>, SearchError> {
    let needle = fold(text.trim());
    if needle.is_empty() {
        return Err(SearchError::EmptyQuery);
    }

    Ok(directory
        .iter()
        .filter(|s| fold(&s.name).contains(&needle))
        .collect())
}
