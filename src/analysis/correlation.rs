//! Station ↔ flood warning correlation.
//!
//! A station "has" a warning when the warning's area name contains the
//! station name, ignoring case. `matching_warnings` is the single matching
//! rule; both the home page (every station, every match) and the dashboard
//! (selected station, first match) are built on it.

use serde::Serialize;

use crate::model::{FloodWarning, Station, NO_ACTIVE_WARNINGS, NO_STATION_WARNING};

/// One station with the warnings that apply to it. `warnings` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationWarnings {
    pub id: String,
    pub name: String,
    pub warnings: Vec<String>,
}

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

/// Messages of every warning whose area name contains `station_name`
/// (case-insensitive), in warning order.
///
/// Duplicate area names are all kept. The name is compared as-is, so an
/// empty name matches every warning.
pub fn matching_warnings<'a>(station_name: &str, warnings: &'a [FloodWarning]) -> Vec<&'a str> {
    let needle = station_name.to_lowercase();

    warnings
        .iter()
        .filter(|w| w.area_name.to_lowercase().contains(&needle))
        .map(|w| w.message.as_str())
        .collect()
}

/// Pairs every station with its matching warnings, substituting the
/// "No active flood warnings" sentinel when nothing matches.
///
/// Output has exactly one entry per input station, in input order. A failed
/// upstream side should be passed in as an empty slice.
pub fn correlate(stations: &[Station], warnings: &[FloodWarning]) -> Vec<StationWarnings> {
    stations
        .iter()
        .map(|station| {
            let matched = matching_warnings(&station.name, warnings);
            let warnings = if matched.is_empty() {
                vec![NO_ACTIVE_WARNINGS.to_string()]
            } else {
                matched.into_iter().map(str::to_string).collect()
            };

            StationWarnings {
                id: station.id.clone(),
                name: station.name.clone(),
                warnings,
            }
        })
        .collect()
}

/// The single warning text shown for a selected station: its first match,
/// or "No active flood warnings for this station.".
pub fn first_warning_for(station_id: &str, station_name: Option<&str>, warnings: &[FloodWarning]) -> String {
    let Some(name) = station_name else {
        return NO_STATION_WARNING.to_string();
    };

    match matching_warnings(name, warnings).first() {
        Some(message) => {
            tracing::debug!(station_id, warning = *message, "matched flood warning");
            message.to_string()
        }
        None => NO_STATION_WARNING.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
