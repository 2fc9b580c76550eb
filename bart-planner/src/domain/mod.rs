//! Domain types for the BART trip planner.
//!
//! Station codes are validated at construction time; prediction and alert
//! types are plain data normalised from the API's wire format.

mod alert;
mod prediction;
mod station;

pub use alert::{AlertsResult, EquipmentAlert, PlannedAlert};
pub use prediction::{Departure, LineGroup, PredictionResult};
pub use station::{InvalidStationCode, StationCode};
