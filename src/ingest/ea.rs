//! Environment Agency flood-monitoring API client.
//!
//! Handles URL construction and JSON response parsing for:
//!   https://environment.data.gov.uk/flood-monitoring/id/stations
//!   https://environment.data.gov.uk/flood-monitoring/id/floods
//!   .../id/stations/{id}/readings?_sorted&_limit=N
//!   .../id/stations/{id}/measures
//!
//! All four resources return `{ "items": [...] }`. See `fixtures.rs` for
//! annotated examples of each shape.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use crate::config::DashboardConfig;
use crate::ingest::FloodSource;
use crate::model::{
    FetchError, FloodWarning, MeasureMetadata, RawReading, Station, NO_WARNING_DETAILS,
    UNKNOWN_PARAMETER, UNKNOWN_STATION_ID, UNKNOWN_STATION_NAME, UNKNOWN_UNIT,
};

// ---------------------------------------------------------------------------
// Serde structures
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct Envelope<T> {
    #[serde(default)]
    items: Vec<T>,
}

#[derive(Deserialize)]
struct StationItem {
    notation: Option<Value>,
    label: Option<Value>,
}

#[derive(Deserialize)]
struct FloodItem {
    #[serde(rename = "eaAreaName")]
    ea_area_name: Option<Value>,
    message: Option<Value>,
}

#[derive(Deserialize)]
struct ReadingItem {
    #[serde(rename = "dateTime")]
    date_time: Option<Value>,
    value: Option<Value>,
}

#[derive(Deserialize)]
struct MeasureItem {
    parameter: Option<String>,
    #[serde(rename = "unitName")]
    unit_name: Option<String>,
}

// ---------------------------------------------------------------------------
// URL construction
// ---------------------------------------------------------------------------

pub fn stations_url(base_url: &str) -> String {
    format!("{}/id/stations", base_url)
}

pub fn floods_url(base_url: &str) -> String {
    format!("{}/id/floods", base_url)
}

/// Most recent `limit` readings for a station, newest first.
pub fn readings_url(base_url: &str, station_id: &str, limit: u32) -> String {
    format!(
        "{}/id/stations/{}/readings?_sorted&_limit={}",
        base_url,
        urlencoding::encode(station_id),
        limit
    )
}

pub fn measures_url(base_url: &str, station_id: &str) -> String {
    format!("{}/id/stations/{}/measures", base_url, urlencoding::encode(station_id))
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

fn parse_envelope<T: for<'de> Deserialize<'de>>(json: &str) -> Result<Vec<T>, FetchError> {
    let envelope: Envelope<T> = serde_json::from_str(json)
        .map_err(|e| FetchError::Parse(format!("JSON deserialization failed: {}", e)))?;
    Ok(envelope.items)
}

/// Renders a loosely-typed upstream field as display text.
///
/// Strings pass through, arrays are joined with ", ", other scalars use
/// their JSON text. Null (or an array of nulls) yields `None`.
pub fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(parts) => {
            let parts: Vec<String> = parts.iter().filter_map(coerce_text).collect();
            if parts.is_empty() { None } else { Some(parts.join(", ")) }
        }
        other => Some(other.to_string()),
    }
}

/// Parses `/id/stations`. Missing notations and labels get placeholder text.
pub fn parse_stations_response(json: &str) -> Result<Vec<Station>, FetchError> {
    let items: Vec<StationItem> = parse_envelope(json)?;

    Ok(items
        .into_iter()
        .map(|item| Station {
            id: item
                .notation
                .as_ref()
                .and_then(coerce_text)
                .unwrap_or_else(|| UNKNOWN_STATION_ID.to_string()),
            name: item
                .label
                .as_ref()
                .and_then(coerce_text)
                .unwrap_or_else(|| UNKNOWN_STATION_NAME.to_string()),
        })
        .collect())
}

/// Parses `/id/floods`. Warnings whose `eaAreaName` is absent or not a
/// string are dropped.
pub fn parse_floods_response(json: &str) -> Result<Vec<FloodWarning>, FetchError> {
    let items: Vec<FloodItem> = parse_envelope(json)?;

    Ok(items
        .into_iter()
        .filter_map(|item| {
            let area_name = match item.ea_area_name {
                Some(Value::String(name)) => name,
                _ => return None,
            };
            let message = match item.message {
                Some(Value::String(message)) => message,
                _ => NO_WARNING_DETAILS.to_string(),
            };
            Some(FloodWarning { area_name, message })
        })
        .collect())
}

/// Parses a station's readings in upstream order.
///
/// Items without a string `dateTime` or a finite numeric `value` are
/// skipped. Timestamps are kept as text; parsing them is the window
/// filter's job.
pub fn parse_readings_response(json: &str) -> Result<Vec<RawReading>, FetchError> {
    let items: Vec<ReadingItem> = parse_envelope(json)?;
    let mut readings = Vec::with_capacity(items.len());

    for item in items {
        let value = item
            .value
            .as_ref()
            .and_then(|v| match v {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.parse::<f64>().ok(),
                _ => None,
            })
            .filter(|v| v.is_finite());
        let time = match item.date_time {
            Some(Value::String(time)) => Some(time),
            _ => None,
        };

        match (time, value) {
            (Some(time), Some(value)) => readings.push(RawReading { time, value }),
            (time, _) => tracing::debug!(?time, "skipping reading without a usable value"),
        }
    }

    Ok(readings)
}

/// Parses `/id/stations/{id}/measures`, keeping only the first measure.
pub fn parse_measures_response(json: &str) -> Result<MeasureMetadata, FetchError> {
    let items: Vec<MeasureItem> = parse_envelope(json)?;
    let first = items.into_iter().next();

    let (parameter, unit) = match first {
        Some(item) => (item.parameter, item.unit_name),
        None => (None, None),
    };

    Ok(MeasureMetadata {
        parameter: parameter.unwrap_or_else(|| UNKNOWN_PARAMETER.to_string()),
        unit: unit.unwrap_or_else(|| UNKNOWN_UNIT.to_string()),
    })
}

// ---------------------------------------------------------------------------
// API Client
// ---------------------------------------------------------------------------

/// Blocking client for the flood-monitoring API.
pub struct EaClient {
    http: reqwest::blocking::Client,
    base_url: String,
    readings_limit: u32,
}

impl EaClient {
    pub fn new(config: &DashboardConfig) -> Result<Self, FetchError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| FetchError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.upstream_base_url.trim_end_matches('/').to_string(),
            readings_limit: config.readings_limit,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GETs a URL and returns the body of a 2xx response.
    fn get_text(&self, url: &str) -> Result<String, FetchError> {
        tracing::debug!(url, "upstream request");

        let response = self
            .http
            .get(url)
            .header("Accept", "application/json")
            .send()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::HttpStatus(response.status().as_u16()));
        }

        response.text().map_err(|e| FetchError::Transport(e.to_string()))
    }
}

impl FloodSource for EaClient {
    fn fetch_stations(&self) -> Result<Vec<Station>, FetchError> {
        let body = self.get_text(&stations_url(&self.base_url))?;
        parse_stations_response(&body)
    }

    fn fetch_warnings(&self) -> Result<Vec<FloodWarning>, FetchError> {
        let body = self.get_text(&floods_url(&self.base_url))?;
        parse_floods_response(&body)
    }

    fn fetch_readings(&self, station_id: &str) -> Result<Vec<RawReading>, FetchError> {
        let body = self.get_text(&readings_url(&self.base_url, station_id, self.readings_limit))?;
        parse_readings_response(&body)
    }

    fn fetch_measures(&self, station_id: &str) -> Result<MeasureMetadata, FetchError> {
        let body = self.get_text(&measures_url(&self.base_url, station_id))?;
        parse_measures_response(&body)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_UPSTREAM_BASE_URL;
    use crate::ingest::fixtures::*;

    // --- URL construction ---------------------------------------------------

    #[test]
    fn test_readings_url_requests_sorted_capped_batch() {
        let url = readings_url(DEFAULT_UPSTREAM_BASE_URL, "1029TH", 100);
        assert_eq!(
            url,
            "https://environment.data.gov.uk/flood-monitoring/id/stations/1029TH/readings?_sorted&_limit=100"
        );
    }

    #[test]
    fn test_station_id_is_percent_encoded_in_paths() {
        let url = measures_url("http://upstream", "E 20/43");
        assert_eq!(url, "http://upstream/id/stations/E%2020%2F43/measures");
    }

    #[test]
    fn test_client_strips_trailing_slash_from_base_url() {
        let config = DashboardConfig {
            upstream_base_url: "http://upstream/".to_string(),
            ..DashboardConfig::default()
        };
        let client = EaClient::new(&config).expect("client should build");
        assert_eq!(client.base_url(), "http://upstream");
    }

    // --- Stations -----------------------------------------------------------

    #[test]
    fn test_parse_stations_reads_notation_and_label() {
        let stations = parse_stations_response(fixture_stations_json()).expect("fixture should parse");
        assert_eq!(stations.len(), 3);
        assert_eq!(stations[0], Station { id: "1029TH".to_string(), name: "Avon".to_string() });
    }

    #[test]
    fn test_parse_stations_coerces_array_label() {
        let stations = parse_stations_response(fixture_stations_json()).expect("fixture should parse");
        assert_eq!(stations[1].name, "Surfleet Sluice, Surfleet Seas End");
    }

    #[test]
    fn test_parse_stations_defaults_missing_notation() {
        let stations = parse_stations_response(fixture_stations_json()).expect("fixture should parse");
        assert_eq!(stations[2].id, "Unknown ID");
        assert_eq!(stations[2].name, "Rainfall station");
    }

    #[test]
    fn test_coerce_text_handles_scalars_and_null() {
        assert_eq!(coerce_text(&serde_json::json!(1234)), Some("1234".to_string()));
        assert_eq!(coerce_text(&serde_json::json!(true)), Some("true".to_string()));
        assert_eq!(coerce_text(&Value::Null), None);
        assert_eq!(coerce_text(&serde_json::json!([null])), None);
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let result = parse_stations_response("{ not json");
        assert!(matches!(result, Err(FetchError::Parse(_))));
    }

    #[test]
    fn test_missing_items_key_yields_empty_list() {
        let stations = parse_stations_response(r#"{"meta": {}}"#).expect("should parse");
        assert!(stations.is_empty());
    }

    // --- Floods -------------------------------------------------------------

    #[test]
    fn test_parse_floods_drops_non_string_area_names() {
        let warnings = parse_floods_response(fixture_floods_json()).expect("fixture should parse");
        assert_eq!(warnings.len(), 2, "missing and numeric area names should be dropped");
        assert_eq!(warnings[0].area_name, "River Avon Area");
        assert_eq!(warnings[0].message, "Flooding expected");
    }

    #[test]
    fn test_parse_floods_defaults_missing_message() {
        let json = r#"{"items": [{"eaAreaName": "Thames"}]}"#;
        let warnings = parse_floods_response(json).expect("should parse");
        assert_eq!(warnings[0].message, "No details available");
    }

    // --- Readings -----------------------------------------------------------

    #[test]
    fn test_parse_readings_keeps_upstream_order() {
        let readings = parse_readings_response(fixture_readings_json()).expect("fixture should parse");
        assert_eq!(readings.len(), 3);
        assert_eq!(readings[0].time, "2024-05-01T12:00:00Z");
        assert!((readings[0].value - 0.512).abs() < 1e-9);
        assert_eq!(readings[2].time, "2024-05-01T11:30:00Z");
    }

    #[test]
    fn test_parse_readings_skips_items_without_value() {
        let json = r#"{"items": [
            {"dateTime": "2024-05-01T12:00:00Z", "value": 1.5},
            {"dateTime": "2024-05-01T11:45:00Z"},
            {"dateTime": "2024-05-01T11:30:00Z", "value": [1.0, 2.0]},
            {"value": 3.0},
            {"dateTime": "2024-05-01T11:00:00Z", "value": "0.25"}
        ]}"#;
        let readings = parse_readings_response(json).expect("should parse");
        assert_eq!(readings.len(), 2);
        assert!((readings[1].value - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_parse_readings_skips_non_finite_values() {
        let json = r#"{"items": [
            {"dateTime": "2024-05-01T12:00:00Z", "value": "NaN"},
            {"dateTime": "2024-05-01T11:45:00Z", "value": "inf"},
            {"dateTime": "2024-05-01T11:30:00Z", "value": "-infinity"},
            {"dateTime": "2024-05-01T11:15:00Z", "value": 0.4}
        ]}"#;
        let readings = parse_readings_response(json).expect("should parse");
        assert_eq!(readings.len(), 1);
        assert!(readings.iter().all(|r| r.value.is_finite()));
    }

    #[test]
    fn test_parse_readings_skips_non_string_timestamps() {
        let json = r#"{"items": [
            {"dateTime": 1714564800, "value": 1.0},
            {"dateTime": null, "value": 2.0},
            {"dateTime": ["2024-05-01T11:00:00Z"], "value": 3.0},
            {"dateTime": "2024-05-01T10:00:00Z", "value": 4.0}
        ]}"#;
        let readings = parse_readings_response(json).expect("one bad item must not fail the batch");
        assert_eq!(readings, vec![RawReading { time: "2024-05-01T10:00:00Z".to_string(), value: 4.0 }]);
    }

    // --- Measures -----------------------------------------------------------

    #[test]
    fn test_parse_measures_uses_first_item_only() {
        let meta = parse_measures_response(fixture_measures_json()).expect("fixture should parse");
        assert_eq!(meta.parameter, "level");
        assert_eq!(meta.unit, "mASD");
    }

    #[test]
    fn test_parse_measures_defaults_when_empty() {
        let meta = parse_measures_response(fixture_empty_items_json()).expect("should parse");
        assert_eq!(meta, MeasureMetadata::default());
    }

    #[test]
    fn test_parse_measures_defaults_missing_unit_independently() {
        let meta = parse_measures_response(r#"{"items": [{"parameter": "flow"}]}"#).expect("should parse");
        assert_eq!(meta.parameter, "flow");
        assert_eq!(meta.unit, "Unknown Unit");
    }
}
