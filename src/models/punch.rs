//! Raw clock events as delivered by the punch source.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Whether a punch records an entry or an exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PunchDirection {
    /// Clock-in.
    In,
    /// Clock-out.
    Out,
}

/// The channel a punch was captured through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PunchSource {
    /// Face recognition terminal.
    FaceId,
    /// Fingerprint reader.
    Fingerprint,
    /// Web self-service.
    Web,
    /// Entered by hand by an administrator.
    Manual,
}

/// A single raw clock event.
///
/// Timestamps are local wall-clock times; no time-zone normalization is
/// performed anywhere in the engine.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{PunchDirection, PunchSource, RawPunch};
/// use chrono::{NaiveDate, NaiveDateTime};
///
/// let punch = RawPunch {
///     employee_id: "emp_001".to_string(),
///     timestamp: NaiveDateTime::parse_from_str("2026-03-02 08:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     direction: PunchDirection::In,
///     source: PunchSource::Fingerprint,
/// };
/// assert_eq!(punch.date(), NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPunch {
    /// The employee who punched.
    pub employee_id: String,
    /// When the punch happened, in local time.
    pub timestamp: NaiveDateTime,
    /// Entry or exit.
    #[serde(rename = "type")]
    pub direction: PunchDirection,
    /// The capture channel.
    pub source: PunchSource,
}

impl RawPunch {
    /// Returns the calendar date of the punch.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&PunchDirection::In).unwrap(), "\"IN\"");
        assert_eq!(serde_json::to_string(&PunchDirection::Out).unwrap(), "\"OUT\"");
    }

    #[test]
    fn test_source_serializes_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&PunchSource::FaceId).unwrap(),
            "\"FACE_ID\""
        );
        assert_eq!(
            serde_json::to_string(&PunchSource::Fingerprint).unwrap(),
            "\"FINGERPRINT\""
        );
    }

    #[test]
    fn test_punch_deserializes_from_device_json() {
        let json = r#"{
            "employee_id": "emp_001",
            "timestamp": "2026-03-02T22:15:00",
            "type": "OUT",
            "source": "WEB"
        }"#;
        let punch: RawPunch = serde_json::from_str(json).unwrap();

        assert_eq!(punch.direction, PunchDirection::Out);
        assert_eq!(punch.source, PunchSource::Web);
        assert_eq!(punch.date(), NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
    }
}
