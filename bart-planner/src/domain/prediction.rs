//! Arrival predictions for a single origin station.

use serde::Serialize;

/// One upcoming train on a line-group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Departure {
    /// Countdown as formatted by the API (e.g. "5 min", "Leaving").
    pub countdown: String,
    /// Wall-clock time as formatted by the API (e.g. "8:05 AM").
    pub time: String,
}

/// Upcoming trains grouped by the terminus they run towards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineGroup {
    pub terminus: String,
    pub departures: Vec<Departure>,
}

/// All predictions for an origin, in the order the API returned them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PredictionResult {
    pub groups: Vec<LineGroup>,
}

impl PredictionResult {
    /// Whether the API returned no line-groups at all.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of departures across all line-groups.
    pub fn departure_count(&self) -> usize {
        self.groups.iter().map(|g| g.departures.len()).sum()
    }
}
