//! Station name ↔ code lookup.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::StationCode;

use super::error::DirectoryError;
use super::table::BART_STATIONS;

/// A station as listed in the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Station {
    /// Canonical display name, e.g. "Ashby (Berkeley)".
    pub name: String,
    pub code: StationCode,
}

/// Immutable bidirectional mapping between station names and codes.
///
/// Built once at startup and shared by reference (typically behind an
/// `Arc`). Names are matched case-insensitively against the whole canonical
/// name; codes are matched exactly.
#[derive(Debug, Clone)]
pub struct StationDirectory {
    /// Stations in table order.
    stations: Vec<Station>,
    /// Lowercased name → index into `stations`.
    by_name: HashMap<String, usize>,
    /// Code → index into `stations`.
    by_code: HashMap<StationCode, usize>,
}

impl StationDirectory {
    /// Build a directory from `(name, code)` pairs, preserving their order.
    ///
    /// Fails if a code is malformed, or if a name or code appears twice.
    /// Names are considered duplicates when they are equal ignoring case.
    pub fn from_entries<I, N, C>(entries: I) -> Result<Self, DirectoryError>
    where
        I: IntoIterator<Item = (N, C)>,
        N: Into<String>,
        C: AsRef<str>,
    {
        let mut stations = Vec::new();
        let mut by_name = HashMap::new();
        let mut by_code = HashMap::new();

        for (name, code) in entries {
            let name = name.into();
            let code = code.as_ref();
            let parsed = StationCode::parse(code).map_err(|source| DirectoryError::InvalidCode {
                name: name.clone(),
                code: code.to_string(),
                source,
            })?;

            let idx = stations.len();
            if by_name.insert(fold(&name), idx).is_some() {
                return Err(DirectoryError::DuplicateName(name));
            }
            if by_code.insert(parsed, idx).is_some() {
                return Err(DirectoryError::DuplicateCode(code.to_string()));
            }

            stations.push(Station { name, code: parsed });
        }

        Ok(Self {
            stations,
            by_name,
            by_code,
        })
    }

    /// The full BART network.
    pub fn bart() -> Result<Self, DirectoryError> {
        Self::from_entries(BART_STATIONS.iter().copied())
    }

    /// Look up a station's code by its full name, ignoring case.
    ///
    /// The whole name must match; "Ashby" does not match "Ashby (Berkeley)".
    pub fn code_for(&self, name: &str) -> Option<StationCode> {
        self.station_by_name(name).map(|s| s.code)
    }

    /// Look up the canonical name for a code.
    ///
    /// Codes are compared exactly, so `"ASHB"` does not match `ashb`.
    pub fn name_for(&self, code: &str) -> Option<&str> {
        let code = StationCode::parse(code).ok()?;
        self.station(&code).map(|s| s.name.as_str())
    }

    /// Look up a station by code.
    pub fn station(&self, code: &StationCode) -> Option<&Station> {
        self.by_code.get(code).map(|&idx| &self.stations[idx])
    }

    /// Look up a station by its full name, ignoring case.
    pub fn station_by_name(&self, name: &str) -> Option<&Station> {
        self.by_name.get(&fold(name)).map(|&idx| &self.stations[idx])
    }

    /// Iterate over stations in table order.
    pub fn iter(&self) -> impl Iterator<Item = &Station> {
        self.stations.iter()
    }

    /// Get the number of stations.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Check if the directory is empty.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

/// Case folding used for every name comparison.
pub(super) fn fold(name: &str) -> String {
    name.to_lowercase()
}
