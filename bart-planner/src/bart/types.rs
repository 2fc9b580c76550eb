//! Wire types for the BART prediction API.
//!
//! These mirror the JSON exactly (camelCase field names). Conversion to the
//! domain model lives in `convert`.

use serde::Deserialize;

/// Response from `GET /getPredictions/{code}`.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionsResponse {
    /// Set when the API could not produce predictions
    #[serde(default)]
    pub error: bool,

    /// Explanation accompanying `error`
    #[serde(default)]
    pub message: Option<String>,

    /// One entry per line terminus; absent when `error` is set
    #[serde(default)]
    pub estimates: Option<Vec<LineEstimate>>,
}

/// Just the error flag of a predictions payload.
///
/// Decoded before the rest of the body so a flagged payload is reported as
/// such even when its estimates are malformed.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionsStatus {
    #[serde(default)]
    pub error: bool,

    #[serde(default)]
    pub message: Option<String>,
}

/// Upcoming trains towards one terminus.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineEstimate {
    pub line_terminus: String,
    #[serde(default)]
    pub estimates: Vec<TrainEstimate>,
}

/// A single upcoming train.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainEstimate {
    pub formatted: String,
    pub time_formatted: String,
}

/// Response from `GET /getAlerts`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertsResponse {
    #[serde(default)]
    pub current_alerts: Vec<String>,
    #[serde(default)]
    pub planned_alerts: Vec<PlannedAlertDto>,
    #[serde(default)]
    pub escalator_alerts: Vec<EquipmentAlertDto>,
    #[serde(default)]
    pub elevator_alerts: Vec<EquipmentAlertDto>,
}

/// A planned-work alert.
#[derive(Debug, Clone, Deserialize)]
pub struct PlannedAlertDto {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub url: String,
}

/// An escalator or elevator alert.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EquipmentAlertDto {
    pub station: String,
    pub location: String,
    pub reason: String,
    pub return_date: String,
}
