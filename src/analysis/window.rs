//! Trailing 24-hour reading window.
//!
//! Turns upstream readings (text timestamps, arbitrary order) into the
//! chronological series the dashboard charts.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};

use crate::model::{RawReading, Reading, WindowError};

pub const WINDOW_HOURS: i64 = 24;

/// Parses an upstream timestamp into UTC.
///
/// Accepts RFC 3339 with any offset; timestamps without an offset (and bare
/// dates) are taken to be UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, WindowError> {
    let trimmed = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc());
        }
    }

    if let Some(midnight) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight.and_utc());
    }

    Err(WindowError::MalformedTimestamp { raw: raw.to_string() })
}

/// Keeps readings with `time >= now - 24h`, sorted ascending by time.
///
/// A single unparseable timestamp rejects the whole batch. Readings with
/// equal timestamps keep their upstream order.
pub fn filter_window(readings: &[RawReading], now: DateTime<Utc>) -> Result<Vec<Reading>, WindowError> {
    let cutoff = now - Duration::hours(WINDOW_HOURS);

    let mut kept = Vec::with_capacity(readings.len());
    for raw in readings {
        let time = parse_timestamp(&raw.time)?;
        if time >= cutoff {
            kept.push(Reading { time, value: raw.value });
        }
    }

    kept.sort_by(|a, b| a.time.cmp(&b.time));
    Ok(kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::ea::parse_readings_response;
    use crate::ingest::fixtures::fixture_readings_json;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap()
    }

    fn raw_at(time: DateTime<Utc>, value: f64) -> RawReading {
        RawReading { time: time.to_rfc3339(), value }
    }

    // --- Timestamp parsing ----------------------------------------------------

    #[test]
    fn test_parse_timestamp_normalises_offsets_to_utc() {
        let parsed = parse_timestamp("2024-05-01T13:00:00+01:00").expect("should parse");
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_timestamp_treats_naive_as_utc() {
        let parsed = parse_timestamp("2024-05-01T12:00:00").expect("should parse");
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());

        let date_only = parse_timestamp("2024-05-01").expect("should parse");
        assert_eq!(date_only, Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        let err = parse_timestamp("yesterday-ish").unwrap_err();
        assert_eq!(err, WindowError::MalformedTimestamp { raw: "yesterday-ish".to_string() });
    }

    // --- Windowing ------------------------------------------------------------

    #[test]
    fn test_filter_window_drops_readings_older_than_24h() {
        let readings = vec![
            raw_at(now() - Duration::hours(30), 1.0),
            raw_at(now() - Duration::hours(1), 2.0),
        ];

        let windowed = filter_window(&readings, now()).expect("should window");

        assert_eq!(windowed, vec![Reading { time: now() - Duration::hours(1), value: 2.0 }]);
    }

    #[test]
    fn test_filter_window_keeps_reading_exactly_at_cutoff() {
        let readings = vec![raw_at(now() - Duration::hours(24), 5.0)];
        let windowed = filter_window(&readings, now()).expect("should window");
        assert_eq!(windowed.len(), 1);
    }

    #[test]
    fn test_filter_window_sorts_ascending() {
        let readings = parse_readings_response(fixture_readings_json()).expect("fixture should parse");
        let windowed = filter_window(&readings, now()).expect("should window");

        assert_eq!(windowed.len(), 3);
        assert!(windowed.windows(2).all(|pair| pair[0].time <= pair[1].time));
        assert!((windowed[0].value - 0.47).abs() < 1e-9, "oldest reading should come first");
    }

    #[test]
    fn test_filter_window_empty_input_is_empty_output() {
        assert_eq!(filter_window(&[], now()).expect("should window"), Vec::<Reading>::new());
    }

    #[test]
    fn test_filter_window_nothing_recent_is_empty_not_error() {
        let readings = vec![raw_at(now() - Duration::days(3), 1.0)];
        assert!(filter_window(&readings, now()).expect("should window").is_empty());
    }

    #[test]
    fn test_filter_window_malformed_timestamp_rejects_batch() {
        let readings = vec![
            raw_at(now() - Duration::hours(1), 1.0),
            RawReading { time: "not a time".to_string(), value: 2.0 },
        ];
        assert!(matches!(
            filter_window(&readings, now()),
            Err(WindowError::MalformedTimestamp { .. })
        ));
    }

    #[test]
    fn test_filter_window_is_idempotent() {
        let readings = vec![
            raw_at(now() - Duration::hours(2), 2.0),
            raw_at(now() - Duration::hours(5), 5.0),
            raw_at(now() - Duration::hours(2), 3.0),
        ];
        let first = filter_window(&readings, now()).expect("should window");
        let second = filter_window(&readings, now()).expect("should window");

        assert_eq!(first, second);
        assert_eq!(first[1].value, 2.0, "ties keep upstream order");
        assert_eq!(first[2].value, 3.0);
    }
}
