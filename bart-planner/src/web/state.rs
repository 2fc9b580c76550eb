//! Application state for the web layer.

use std::sync::Arc;

use crate::bart::BartClient;
use crate::board::TripBoards;
use crate::stations::StationDirectory;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Station name ↔ code lookup
    pub directory: Arc<StationDirectory>,

    /// BART prediction API client
    pub bart: Arc<BartClient>,

    /// Latest trip results per client, guarded against stale overwrites
    pub boards: Arc<TripBoards>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(directory: Arc<StationDirectory>, bart: BartClient) -> Self {
        Self {
            directory,
            bart: Arc::new(bart),
            boards: Arc::new(TripBoards::default()),
        }
    }
}
