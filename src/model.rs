//! Core data types for the flood dashboard.
//!
//! Every type here is built fresh for a single request and dropped when the
//! response is sent. Nothing is cached or persisted.

use chrono::{DateTime, Utc};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Sentinels and upstream defaults
// ---------------------------------------------------------------------------

/// Single-element warning list given to a station with no matching area.
pub const NO_ACTIVE_WARNINGS: &str = "No active flood warnings";

/// Warning text shown on the dashboard when the selected station has no match.
pub const NO_STATION_WARNING: &str = "No active flood warnings for this station.";

pub const UNKNOWN_PARAMETER: &str = "Unknown Parameter";
pub const UNKNOWN_UNIT: &str = "Unknown Unit";
pub const UNKNOWN_STATION_ID: &str = "Unknown ID";
pub const UNKNOWN_STATION_NAME: &str = "Unknown Station";
pub const NO_WARNING_DETAILS: &str = "No details available";

// ---------------------------------------------------------------------------
// Stations and warnings
// ---------------------------------------------------------------------------

/// A monitoring station as listed by the upstream `/id/stations` resource.
///
/// `id` is the upstream `notation`; it is only meaningful within one fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Station {
    pub id: String,
    pub name: String,
}

/// An active flood warning from `/id/floods`.
///
/// Only warnings whose `eaAreaName` is a string make it this far; the rest
/// are dropped during parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloodWarning {
    pub area_name: String,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Readings
// ---------------------------------------------------------------------------

/// A reading as it arrives from upstream, timestamp still unparsed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawReading {
    pub time: String,   // ISO 8601, e.g. "2024-05-01T12:00:00Z"
    pub value: f64,
}

/// A reading with its timestamp resolved to a UTC instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    pub time: DateTime<Utc>,
    pub value: f64,
}

/// Parameter and unit of a station's first listed measure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasureMetadata {
    pub parameter: String,
    pub unit: String,
}

impl Default for MeasureMetadata {
    fn default() -> Self {
        Self {
            parameter: UNKNOWN_PARAMETER.to_string(),
            unit: UNKNOWN_UNIT.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// An upstream fetch that did not produce usable data.
///
/// Callers treat every variant the same way; the distinction only shows up
/// in log lines.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchError {
    /// Non-2xx HTTP response from the flood-monitoring API.
    #[error("HTTP error: {0}")]
    HttpStatus(u16),
    /// The request never produced a response (DNS, connect, timeout, ...).
    #[error("Transport error: {0}")]
    Transport(String),
    /// The response body could not be deserialized.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Failure while windowing a batch of readings.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WindowError {
    /// One timestamp in the batch could not be parsed; the whole batch is rejected.
    #[error("Malformed reading timestamp: {raw:?}")]
    MalformedTimestamp { raw: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_metadata_defaults_to_unknown() {
        let meta = MeasureMetadata::default();
        assert_eq!(meta.parameter, "Unknown Parameter");
        assert_eq!(meta.unit, "Unknown Unit");
    }

    #[test]
    fn test_fetch_error_display_names_the_status() {
        assert_eq!(FetchError::HttpStatus(503).to_string(), "HTTP error: 503");
    }
}
