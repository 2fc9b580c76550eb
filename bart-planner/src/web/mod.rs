//! Web layer for the BART trip planner.
//!
//! Serves the planner page, the station finder and the trip endpoint.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, CLIENT_ID_HEADER, create_router};
pub use state::AppState;
pub use templates::*;
