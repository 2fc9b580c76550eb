//! BART real-time prediction API client.
//!
//! Two read-only endpoints are used:
//! - `getPredictions/{code}` returns upcoming trains at one station, grouped
//!   by line terminus. The payload may carry an `error` flag even on a 200.
//! - `getAlerts` returns system-wide service, planned-work, escalator and
//!   elevator alerts. It has no error flag.

mod client;
mod convert;
mod error;
mod types;

pub use client::{BartClient, BartConfig, DEFAULT_BASE_URL};
pub use error::RequestError;
pub use types::{AlertsResponse, PredictionsResponse};
