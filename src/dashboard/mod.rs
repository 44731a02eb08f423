//! Presentation adapter: turns pipeline output into display structures.
//!
//! The dashboard calls the pipeline in-process. Each view issues its
//! upstream fetches one after another; a failure in one fetch degrades only
//! the part of the page that depends on it.
//!
//! `html` renders these structures as pages, `chart` draws the series.

pub mod chart;
pub mod html;

use chrono::{DateTime, Utc};

use crate::analysis::correlation::{correlate, first_warning_for, StationWarnings};
use crate::analysis::window::filter_window;
use crate::ingest::{or_default, FloodSource};
use crate::model::{FetchError, FloodWarning, MeasureMetadata, RawReading, Reading, Station, UNKNOWN_STATION_NAME};

pub const TITLE_SELECT_STATION: &str = "Select a station to view readings";
pub const TITLE_NO_DATA: &str = "No data available";
pub const TITLE_NO_RECENT: &str = "No readings in the last 24 hours";

// ---------------------------------------------------------------------------
// View types
// ---------------------------------------------------------------------------

/// A line chart of readings against time.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<Reading>,
}

impl ChartSeries {
    /// A chart with a title and nothing to plot.
    pub fn placeholder(title: &str) -> Self {
        Self {
            title: title.to_string(),
            x_label: "Time".to_string(),
            y_label: "Value".to_string(),
            points: Vec::new(),
        }
    }
}

/// One entry of the station selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationOption {
    pub label: String,
    pub value: String,
}

/// Everything shown below the selector for one station.
///
/// `table` and `warning` are only present when there is something to chart.
#[derive(Debug, Clone, PartialEq)]
pub struct StationPanel {
    pub chart: ChartSeries,
    pub table: Vec<Reading>,
    pub warning: Option<String>,
}

impl StationPanel {
    fn empty(title: &str) -> Self {
        Self {
            chart: ChartSeries::placeholder(title),
            table: Vec::new(),
            warning: None,
        }
    }
}

/// The full `/dashboard/` page model.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub options: Vec<StationOption>,
    pub selected: Option<String>,
    pub panel: StationPanel,
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Stations with their correlated warnings, for the home page.
///
/// Either fetch failing leaves that side empty: no stations means an empty
/// table, no warnings means every station shows the sentinel.
pub fn build_home(source: &dyn FloodSource) -> Vec<StationWarnings> {
    let stations = or_default(source.fetch_stations(), "stations", None);
    let warnings = or_default(source.fetch_warnings(), "floods", None);
    correlate(&stations, &warnings)
}

/// Builds the dashboard for an optional selected station.
pub fn build_dashboard(source: &dyn FloodSource, station_id: Option<&str>, now: DateTime<Utc>) -> DashboardView {
    let stations = or_default(source.fetch_stations(), "stations", None);
    let options = station_options(&stations);

    let Some(station_id) = station_id.filter(|id| !id.is_empty()) else {
        return DashboardView {
            options,
            selected: None,
            panel: StationPanel::empty(TITLE_SELECT_STATION),
        };
    };

    let readings = source.fetch_readings(station_id);
    let warnings = or_default(source.fetch_warnings(), "floods", Some(station_id));
    let measures = or_default(source.fetch_measures(station_id), "measures", Some(station_id));

    let station_name = stations
        .iter()
        .find(|s| s.id == station_id)
        .map(|s| s.name.as_str());

    let panel = build_station_panel(station_id, station_name, readings, &warnings, &measures, now);

    DashboardView {
        options,
        selected: Some(station_id.to_string()),
        panel,
    }
}

/// Selector entries: label is the station name, value its id.
pub fn station_options(stations: &[Station]) -> Vec<StationOption> {
    stations
        .iter()
        .map(|s| StationOption {
            label: s.name.clone(),
            value: s.id.clone(),
        })
        .collect()
}

/// Composes chart, table and warning from already-fetched inputs.
pub fn build_station_panel(
    station_id: &str,
    station_name: Option<&str>,
    readings: Result<Vec<RawReading>, FetchError>,
    warnings: &[FloodWarning],
    measures: &MeasureMetadata,
    now: DateTime<Utc>,
) -> StationPanel {
    let readings = match readings {
        Ok(readings) if !readings.is_empty() => readings,
        Ok(_) => return StationPanel::empty(TITLE_NO_DATA),
        Err(e) => {
            tracing::warn!(resource = "readings", station_id, error = %e, "upstream fetch failed, using empty data");
            return StationPanel::empty(TITLE_NO_DATA);
        }
    };

    let windowed = match filter_window(&readings, now) {
        Ok(windowed) => windowed,
        Err(e) => {
            tracing::warn!(station_id, error = %e, "discarding reading batch");
            return StationPanel::empty(TITLE_NO_DATA);
        }
    };

    if windowed.is_empty() {
        return StationPanel::empty(TITLE_NO_RECENT);
    }

    let chart = ChartSeries {
        title: format!(
            "Readings for {} (ID: {})",
            station_name.unwrap_or(UNKNOWN_STATION_NAME),
            station_id
        ),
        x_label: "Time".to_string(),
        y_label: format!("{} ({})", measures.parameter, measures.unit),
        points: windowed.clone(),
    };

    StationPanel {
        chart,
        table: windowed,
        warning: Some(first_warning_for(station_id, station_name, warnings)),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
