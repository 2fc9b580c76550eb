//! BART station directory and name lookup.
//!
//! Provides the bidirectional station name ↔ code mapping used to resolve
//! trip queries, plus substring search for the station finder.

mod directory;
mod error;
mod search;
mod table;

pub use directory::{Station, StationDirectory};
pub use error::{DirectoryError, SearchError};
pub use search::search;
