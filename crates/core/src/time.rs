//! Server timestamps.
//!
//! The portal sends local wall-clock times without an offset, normally as
//! `YYYY-MM-DD HH:MM:SS`. A few endpoints use the ISO `T` separator or append
//! fractional seconds. Stages that have not happened yet arrive as `null` or
//! as an empty string; both decode to `None` through [`deserialize_opt`].

use chrono::{NaiveDate, NaiveDateTime};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{DomainError, DomainResult};

const WIRE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const WIRE_FORMAT_FRACTION: &str = "%Y-%m-%d %H:%M:%S%.f";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// A server-local timestamp.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ServerTime(NaiveDateTime);

impl ServerTime {
    pub fn new(at: NaiveDateTime) -> Self {
        Self(at)
    }

    pub fn as_naive(&self) -> NaiveDateTime {
        self.0
    }

    /// Parse any of the accepted wire layouts.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let normalized = raw.trim().trim_end_matches('Z').replacen('T', " ", 1);
        NaiveDateTime::parse_from_str(&normalized, WIRE_FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(&normalized, WIRE_FORMAT_FRACTION))
            .map(Self)
            .map_err(|_| DomainError::InvalidTimestamp(raw.to_string()))
    }
}

impl core::fmt::Display for ServerTime {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0.format(WIRE_FORMAT))
    }
}

impl Serialize for ServerTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ServerTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        ServerTime::parse(&raw).map_err(de::Error::custom)
    }
}

/// Decode an optional timestamp, mapping `null` and `""` to `None`.
pub fn deserialize_opt<'de, D>(deserializer: D) -> Result<Option<ServerTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => ServerTime::parse(s).map(Some).map_err(de::Error::custom),
    }
}

/// Encode an optional calendar date as `YYYY-MM-DD` (used by query filters).
pub fn serialize_opt_date<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(date) => serializer.collect_str(&date.format(DATE_FORMAT)),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "deserialize_opt")]
        at: Option<ServerTime>,
    }

    #[test]
    fn parses_all_accepted_layouts() {
        let plain = ServerTime::parse("2025-08-11 15:07:31").unwrap();
        let iso = ServerTime::parse("2025-08-11T15:07:31").unwrap();
        let zulu = ServerTime::parse("2025-08-11T15:07:31Z").unwrap();
        assert_eq!(plain, iso);
        assert_eq!(plain, zulu);

        let fraction = ServerTime::parse("2025-08-11T15:07:31.250").unwrap();
        assert!(fraction > plain);
    }

    #[test]
    fn rejects_garbage() {
        let err = ServerTime::parse("yesterday").unwrap_err();
        assert!(matches!(err, DomainError::InvalidTimestamp(_)));
    }

    #[test]
    fn empty_and_null_are_absent() {
        let row: Row = serde_json::from_str(r#"{"at": ""}"#).unwrap();
        assert!(row.at.is_none());
        let row: Row = serde_json::from_str(r#"{"at": null}"#).unwrap();
        assert!(row.at.is_none());
        let row: Row = serde_json::from_str("{}").unwrap();
        assert!(row.at.is_none());
        let row: Row = serde_json::from_str(r#"{"at": "2025-08-14 10:39:26"}"#).unwrap();
        assert_eq!(row.at.unwrap().to_string(), "2025-08-14 10:39:26");
    }

    #[test]
    fn displays_in_wire_format() {
        let at = ServerTime::parse("2025-08-11T09:05:00.999").unwrap();
        assert_eq!(at.to_string(), "2025-08-11 09:05:00");
        assert_eq!(serde_json::to_string(&at).unwrap(), "\"2025-08-11 09:05:00\"");
    }
}
