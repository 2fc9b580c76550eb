//! Conversion from BART wire types to domain types.

use crate::domain::{
    AlertsResult, Departure, EquipmentAlert, LineGroup, PlannedAlert, PredictionResult,
};

use serde::de::DeserializeOwned;

use super::error::RequestError;
use super::types::{AlertsResponse, EquipmentAlertDto, PredictionsResponse, PredictionsStatus};

/// Decode a JSON body, keeping an excerpt of it on failure.
pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T, RequestError> {
    serde_json::from_str(body).map_err(|e| RequestError::Json {
        message: e.to_string(),
        body: Some(body.chars().take(500).collect()),
    })
}

/// Decode a predictions body, checking its error flag before its estimates.
pub fn decode_predictions(body: &str) -> Result<PredictionResult, RequestError> {
    let status: PredictionsStatus = decode(body)?;
    if status.error {
        return Err(RequestError::ApiReported {
            message: status.message.unwrap_or_default(),
        });
    }

    convert_predictions(decode(body)?)
}

/// Convert a predictions payload, honouring its error flag.
///
/// The error flag is checked first; a payload that is not flagged but has no
/// estimate list is treated as malformed.
pub fn convert_predictions(resp: PredictionsResponse) -> Result<PredictionResult, RequestError> {
    if resp.error {
        return Err(RequestError::ApiReported {
            message: resp.message.unwrap_or_default(),
        });
    }

    let estimates = resp.estimates.ok_or_else(|| RequestError::Json {
        message: "missing field `estimates`".to_string(),
        body: None,
    })?;

    let groups = estimates
        .into_iter()
        .map(|line| LineGroup {
            terminus: line.line_terminus,
            departures: line
                .estimates
                .into_iter()
                .map(|e| Departure {
                    countdown: e.formatted,
                    time: e.time_formatted,
                })
                .collect(),
        })
        .collect();

    Ok(PredictionResult { groups })
}

/// Convert an alerts payload. There is no error flag on this endpoint.
pub fn convert_alerts(resp: AlertsResponse) -> AlertsResult {
    AlertsResult {
        current: resp.current_alerts,
        planned: resp
            .planned_alerts
            .into_iter()
            .map(|p| PlannedAlert {
                message: p.message,
                url: p.url,
            })
            .collect(),
        escalator: resp.escalator_alerts.into_iter().map(equipment).collect(),
        elevator: resp.elevator_alerts.into_iter().map(equipment).collect(),
    }
}

fn equipment(dto: EquipmentAlertDto) -> EquipmentAlert {
    EquipmentAlert {
        station: dto.station,
        location: dto.location,
        reason: dto.reason,
        return_date: dto.return_date,
    }
}
