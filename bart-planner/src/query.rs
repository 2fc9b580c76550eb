//! Trip query validation and station resolution.
//!
//! Turns the free-text trip form into a pair of station codes. Only two
//! checks are made: every field must be filled in, and both station names
//! must exactly match a directory entry (ignoring case). Date and time are
//! passed through untouched.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::StationCode;
use crate::stations::StationDirectory;

/// A trip as entered by the user.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TripQuery {
    /// Pick-up station name
    pub origin: String,

    /// Drop-off station name
    pub destination: String,

    /// Travel date, as supplied by the form
    pub date: String,

    /// Travel time, as supplied by the form
    pub time: String,
}

impl TripQuery {
    /// Create a query from its four fields.
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            date: date.into(),
            time: time.into(),
        }
    }

    /// Whether every field is non-empty after trimming.
    pub fn is_complete(&self) -> bool {
        [&self.origin, &self.destination, &self.date, &self.time]
            .iter()
            .all(|f| !f.trim().is_empty())
    }
}

/// A trip whose stations have both been found in the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedQuery {
    pub origin: StationCode,
    pub destination: StationCode,
}

/// Why a trip query could not be resolved.
///
/// Messages are deliberately generic: they do not say which field or which
/// station was at fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// At least one field was empty or whitespace
    #[error("Please enter pick-up and drop-off stations, date, and time")]
    MissingField,

    /// Origin or destination is not a known station name
    #[error("Invalid station names")]
    UnknownStation,
}

/// Validate a trip query and resolve its station names to codes.
pub fn resolve(
    query: &TripQuery,
    directory: &StationDirectory,
) -> Result<ResolvedQuery, ValidationError> {
    if !query.is_complete() {
        return Err(ValidationError::MissingField);
    }

    let origin = directory.code_for(query.origin.trim());
    let destination = directory.code_for(query.destination.trim());

    info!(
        origin = query.origin.trim(),
        origin_code = ?origin,
        destination = query.destination.trim(),
        destination_code = ?destination,
        "resolved trip stations"
    );

    match (origin, destination) {
        (Some(origin), Some(destination)) => Ok(ResolvedQuery {
            origin,
            destination,
        }),
        _ => Err(ValidationError::UnknownStation),
    }
}
