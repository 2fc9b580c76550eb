//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::stations::Station;

/// Query string for station search.
#[derive(Debug, Deserialize)]
pub struct StationSearchRequest {
    /// Text to look for in station names
    #[serde(default)]
    pub q: String,
}

/// A station in search results or listings.
#[derive(Debug, Serialize, Deserialize)]
pub struct StationResult {
    /// Canonical display name
    pub name: String,

    /// Four-character station code
    pub code: String,
}

impl StationResult {
    /// Create from a directory station.
    pub fn from_station(station: &Station) -> Self {
        Self {
            name: station.name.clone(),
            code: station.code.to_string(),
        }
    }
}

/// Response listing stations, in directory order.
#[derive(Debug, Serialize, Deserialize)]
pub struct StationListResponse {
    pub stations: Vec<StationResult>,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Message suitable for showing to the user
    pub error: String,
}
