//! BART API HTTP client.

use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::{AlertsResult, PredictionResult, StationCode};

use super::convert::{convert_alerts, decode, decode_predictions};
use super::error::RequestError;
use super::types::AlertsResponse;

/// Default base URL for the BART prediction API.
pub const DEFAULT_BASE_URL: &str = "https://bart.trentwil.es/api/v1";

/// Configuration for the BART client.
#[derive(Debug, Clone)]
pub struct BartConfig {
    /// Base URL for the API (defaults to the public instance)
    pub base_url: String,
    /// Request timeout; `None` leaves requests unbounded
    pub timeout: Option<Duration>,
}

impl BartConfig {
    /// Create a config pointing at the public API with no timeout.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }

    /// Set a custom base URL (for testing or a self-hosted instance).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set a request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Default for BartConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// BART prediction API client.
#[derive(Debug, Clone)]
pub struct BartClient {
    http: reqwest::Client,
    base_url: String,
}

impl BartClient {
    /// Create a new client with the given configuration.
    pub fn new(config: BartConfig) -> Result<Self, RequestError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The base URL requests are issued against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get arrival predictions at a station.
    ///
    /// Returns every line-group the API reports for `origin`, in API order.
    /// A 200 response whose payload sets `error` yields
    /// [`RequestError::ApiReported`] with the payload's message, whatever
    /// else the payload contains.
    pub async fn fetch_predictions(
        &self,
        origin: &StationCode,
    ) -> Result<PredictionResult, RequestError> {
        let url = format!("{}/getPredictions/{}", self.base_url, origin.as_str());
        let body = self.get_body(&url).await?;

        let result = decode_predictions(&body);
        match &result {
            Ok(predictions) => debug!(
                station = %origin,
                groups = predictions.groups.len(),
                departures = predictions.departure_count(),
                "received predictions"
            ),
            Err(e) => warn!(station = %origin, error = %e, "predictions request failed"),
        }
        result
    }

    /// Get all system-wide alerts.
    ///
    /// Categories absent from the payload come back empty.
    pub async fn fetch_alerts(&self) -> Result<AlertsResult, RequestError> {
        let url = format!("{}/getAlerts", self.base_url);
        let resp: AlertsResponse = decode(&self.get_body(&url).await?)?;

        let alerts = convert_alerts(resp);
        debug!(
            current = alerts.current.len(),
            planned = alerts.planned.len(),
            escalator = alerts.escalator.len(),
            elevator = alerts.elevator.len(),
            "received alerts"
        );
        Ok(alerts)
    }

    /// Issue a GET and return the body text, mapping non-success statuses to
    /// [`RequestError::Transport`].
    async fn get_body(&self, url: &str) -> Result<String, RequestError> {
        debug!(%url, "requesting");

        let response = self.http.get(url).send().await.inspect_err(|e| {
            warn!(%url, error = %e, "request failed before a response arrived");
        })?;

        let status = response.status();

        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "non-success status");
            return Err(RequestError::Transport {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        Ok(response.text().await?)
    }
}
