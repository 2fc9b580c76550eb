//! Station code types.

use std::fmt;

use serde::{Serialize, Serializer};

/// Error returned when parsing an invalid station code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station code: {reason}")]
pub struct InvalidStationCode {
    reason: &'static str,
}

/// A valid 4-character BART station code (e.g. `ashb`, `12th`).
///
/// Codes are always 4 lowercase ASCII letters or digits. This type guarantees
/// that any `StationCode` value is valid by construction.
///
/// # Examples
///
/// ```
/// use bart_planner::domain::StationCode;
///
/// let ashby = StationCode::parse("ashb").unwrap();
/// assert_eq!(ashby.as_str(), "ashb");
///
/// // Digits are allowed
/// assert!(StationCode::parse("12th").is_ok());
///
/// // Uppercase is rejected
/// assert!(StationCode::parse("ASHB").is_err());
///
/// // Wrong length is rejected
/// assert!(StationCode::parse("ash").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationCode([u8; 4]);

impl StationCode {
    /// Parse a station code from a string.
    ///
    /// The input must be exactly 4 characters, each a lowercase ASCII letter
    /// or an ASCII digit.
    pub fn parse(s: &str) -> Result<Self, InvalidStationCode> {
        let bytes = s.as_bytes();

        if bytes.len() != 4 {
            return Err(InvalidStationCode {
                reason: "must be exactly 4 characters",
            });
        }

        for &b in bytes {
            if !(b.is_ascii_lowercase() || b.is_ascii_digit()) {
                return Err(InvalidStationCode {
                    reason: "must be lowercase ASCII letters or digits",
                });
            }
        }

        Ok(StationCode([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII bytes are ever stored, so this cannot fail.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl fmt::Debug for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationCode({})", self.as_str())
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for StationCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
