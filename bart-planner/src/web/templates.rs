//! Askama templates for the web frontend.

use askama::Template;

use crate::pipeline::TripReport;
use crate::stations::Station;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page: login gate, trip form and station finder.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    /// Prefilled travel date (YYYY-MM-DD)
    pub today: String,
    /// Prefilled travel time (HH:MM)
    pub now: String,
}

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Predictions and alerts for one trip.
#[derive(Template)]
#[template(path = "trip_results.html")]
pub struct TripResultsTemplate<'a> {
    pub report: &'a TripReport,
}

/// Station finder results.
#[derive(Template)]
#[template(path = "station_list.html")]
pub struct StationListTemplate<'a> {
    pub stations: Vec<&'a Station>,
}
