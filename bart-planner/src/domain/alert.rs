//! System-wide service alerts.

use serde::Serialize;

/// A planned-work notice with a link to more information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedAlert {
    pub message: String,
    pub url: String,
}

/// An escalator or elevator outage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EquipmentAlert {
    pub station: String,
    pub location: String,
    pub reason: String,
    pub return_date: String,
}

/// The four alert categories, each in API order.
///
/// Absent categories are represented as empty lists, so callers cannot
/// distinguish "absent" from "empty".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AlertsResult {
    pub current: Vec<String>,
    pub planned: Vec<PlannedAlert>,
    pub escalator: Vec<EquipmentAlert>,
    pub elevator: Vec<EquipmentAlert>,
}

impl AlertsResult {
    /// Whether every category is empty.
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
            && self.planned.is_empty()
            && self.escalator.is_empty()
            && self.elevator.is_empty()
    }
}
