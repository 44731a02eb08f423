//! Upstream data access.
//!
//! `FloodSource` is the read-only contract the pipeline depends on; `ea`
//! implements it against the Environment Agency flood-monitoring API.
//! Each call is independent and blocking.

pub mod ea;
pub mod fixtures;

use crate::model::{FetchError, FloodWarning, MeasureMetadata, RawReading, Station};

/// The four upstream reads feeding the dashboard.
pub trait FloodSource {
    fn fetch_stations(&self) -> Result<Vec<Station>, FetchError>;
    fn fetch_warnings(&self) -> Result<Vec<FloodWarning>, FetchError>;
    fn fetch_readings(&self, station_id: &str) -> Result<Vec<RawReading>, FetchError>;
    fn fetch_measures(&self, station_id: &str) -> Result<MeasureMetadata, FetchError>;
}

/// Converts a failed fetch into its empty/default value, logging the cause.
///
/// This is the only place a `FetchError` is swallowed; views call it right
/// at the fetch boundary so nothing downstream sees the error.
pub fn or_default<T: Default>(result: Result<T, FetchError>, resource: &str, station_id: Option<&str>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            match station_id {
                Some(id) => tracing::warn!(resource, station_id = id, error = %e, "upstream fetch failed, using empty data"),
                None => tracing::warn!(resource, error = %e, "upstream fetch failed, using empty data"),
            }
            T::default()
        }
    }
}
