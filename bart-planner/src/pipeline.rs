//! The trip pipeline: resolve, then predictions, then alerts.
//!
//! Stages run strictly in sequence and the first failure ends the run.
//! In particular, alerts are never requested when predictions fail or the
//! predictions payload reports an error.

use std::future::Future;

use serde::Serialize;
use tracing::info;

use crate::bart::{BartClient, RequestError};
use crate::domain::{AlertsResult, PredictionResult, StationCode};
use crate::query::{TripQuery, ValidationError, resolve};
use crate::stations::{Station, StationDirectory};

/// Source of predictions and alerts.
///
/// Implemented by [`BartClient`]; tests substitute their own.
pub trait TransitApi: Send + Sync {
    /// Arrival predictions at `origin`.
    fn predictions(
        &self,
        origin: &StationCode,
    ) -> impl Future<Output = Result<PredictionResult, RequestError>> + Send;

    /// System-wide alerts.
    fn alerts(&self) -> impl Future<Output = Result<AlertsResult, RequestError>> + Send;
}

impl TransitApi for BartClient {
    fn predictions(
        &self,
        origin: &StationCode,
    ) -> impl Future<Output = Result<PredictionResult, RequestError>> + Send {
        self.fetch_predictions(origin)
    }

    fn alerts(&self) -> impl Future<Output = Result<AlertsResult, RequestError>> + Send {
        self.fetch_alerts()
    }
}

/// Everything shown for one successful trip query.
#[derive(Debug, Clone, Serialize)]
pub struct TripReport {
    pub origin: Station,
    /// Resolved but not used to filter predictions.
    pub destination: Station,
    pub date: String,
    pub time: String,
    pub predictions: PredictionResult,
    pub alerts: AlertsResult,
}

/// Why a trip query failed. The message is what the user is shown.
#[derive(Debug, thiserror::Error)]
pub enum TripError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{}", request_message(.0))]
    Request(#[from] RequestError),
}

fn request_message(err: &RequestError) -> String {
    match err {
        RequestError::ApiReported { message } => message.clone(),
        other => format!(
            "Error fetching schedule or alerts: {other}. Please check your API endpoint and try again."
        ),
    }
}

/// A trip query that passed validation, ready to fetch.
#[derive(Debug, Clone)]
pub struct PreparedTrip {
    pub origin: Station,
    pub destination: Station,
    pub date: String,
    pub time: String,
}

/// Validate and resolve a trip query without touching the network.
pub fn prepare_trip(
    directory: &StationDirectory,
    query: &TripQuery,
) -> Result<PreparedTrip, ValidationError> {
    let resolved = resolve(query, directory)?;

    let origin = directory
        .station(&resolved.origin)
        .cloned()
        .ok_or(ValidationError::UnknownStation)?;
    let destination = directory
        .station(&resolved.destination)
        .cloned()
        .ok_or(ValidationError::UnknownStation)?;

    Ok(PreparedTrip {
        origin,
        destination,
        date: query.date.trim().to_string(),
        time: query.time.trim().to_string(),
    })
}

/// Fetch predictions, then alerts, for a prepared trip.
pub async fn fetch_trip<A: TransitApi>(
    api: &A,
    trip: PreparedTrip,
) -> Result<TripReport, TripError> {
    info!(station = %trip.origin.code, "fetching predictions");
    let predictions = api.predictions(&trip.origin.code).await?;

    info!("fetching alerts");
    let alerts = api.alerts().await?;

    Ok(TripReport {
        origin: trip.origin,
        destination: trip.destination,
        date: trip.date,
        time: trip.time,
        predictions,
        alerts,
    })
}

/// Run a trip query end to end.
pub async fn plan_trip<A: TransitApi>(
    api: &A,
    directory: &StationDirectory,
    query: &TripQuery,
) -> Result<TripReport, TripError> {
    let trip = prepare_trip(directory, query)?;
    fetch_trip(api, trip).await
}
