//! Test fixtures: representative JSON payloads from the flood-monitoring API.
//!
//! Trimmed to the fields the parsers read, plus a few they ignore so the
//! parsers are exercised against realistic noise. Shapes follow:
//!   https://environment.data.gov.uk/flood-monitoring/doc/reference
//!
//! Every resource wraps its payload the same way:
//!   { "@context": ..., "meta": {...}, "items": [ ... ] }
//!
//! Station `label` is usually a string but is an array for a handful of
//! stations with alternative names. Flood `eaAreaName` is occasionally
//! missing.

/// Three stations: a plain one, one with a multi-valued label, and one
/// without a notation.
#[cfg(test)]
pub(crate) fn fixture_stations_json() -> &'static str {
    r#"{
      "@context": "http://environment.data.gov.uk/flood-monitoring/meta/context.jsonld",
      "meta": { "publisher": "Environment Agency", "version": "0.9", "limit": 500 },
      "items": [
        {
          "@id": "http://environment.data.gov.uk/flood-monitoring/id/stations/1029TH",
          "RLOIid": "7041",
          "catchmentName": "Cotswolds",
          "label": "Avon",
          "notation": "1029TH",
          "riverName": "River Avon",
          "town": "Bourton-on-the-Water",
          "lat": 51.874767,
          "long": -1.740083
        },
        {
          "@id": "http://environment.data.gov.uk/flood-monitoring/id/stations/E2043",
          "label": ["Surfleet Sluice", "Surfleet Seas End"],
          "notation": "E2043",
          "riverName": "River Glen"
        },
        {
          "@id": "http://environment.data.gov.uk/flood-monitoring/id/stations/anonymous",
          "label": "Rainfall station"
        }
      ]
    }"#
}

/// Four warnings: two usable, one without an area name, one whose area
/// name is a number.
#[cfg(test)]
pub(crate) fn fixture_floods_json() -> &'static str {
    r#"{
      "@context": "http://environment.data.gov.uk/flood-monitoring/meta/context.jsonld",
      "meta": { "publisher": "Environment Agency", "version": "0.9" },
      "items": [
        {
          "@id": "http://environment.data.gov.uk/flood-monitoring/id/floods/061WAF23Avon",
          "description": "River Avon at Bourton",
          "eaAreaName": "River Avon Area",
          "floodAreaID": "061WAF23Avon",
          "message": "Flooding expected",
          "severity": "Flood warning",
          "severityLevel": 2
        },
        {
          "@id": "http://environment.data.gov.uk/flood-monitoring/id/floods/053FWFPUWI06",
          "eaAreaName": "Lincolnshire and Northamptonshire",
          "message": "River levels remain high at Surfleet Sluice.",
          "severityLevel": 3
        },
        {
          "@id": "http://environment.data.gov.uk/flood-monitoring/id/floods/nowhere",
          "message": "Area name withheld"
        },
        {
          "@id": "http://environment.data.gov.uk/flood-monitoring/id/floods/numeric",
          "eaAreaName": 42,
          "message": "Numeric area"
        }
      ]
    }"#
}

/// Readings newest-first, as `_sorted` returns them.
#[cfg(test)]
pub(crate) fn fixture_readings_json() -> &'static str {
    r#"{
      "@context": "http://environment.data.gov.uk/flood-monitoring/meta/context.jsonld",
      "meta": { "publisher": "Environment Agency", "limit": 100 },
      "items": [
        {
          "@id": "http://environment.data.gov.uk/flood-monitoring/data/readings/1029TH-level-stage-i-15_min-mASD/2024-05-01T12-00-00Z",
          "dateTime": "2024-05-01T12:00:00Z",
          "measure": "http://environment.data.gov.uk/flood-monitoring/id/measures/1029TH-level-stage-i-15_min-mASD",
          "value": 0.512
        },
        {
          "dateTime": "2024-05-01T11:45:00Z",
          "measure": "http://environment.data.gov.uk/flood-monitoring/id/measures/1029TH-level-stage-i-15_min-mASD",
          "value": 0.498
        },
        {
          "dateTime": "2024-05-01T11:30:00Z",
          "measure": "http://environment.data.gov.uk/flood-monitoring/id/measures/1029TH-level-stage-i-15_min-mASD",
          "value": 0.47
        }
      ]
    }"#
}

/// Two measures for one station; only the first should be used.
#[cfg(test)]
pub(crate) fn fixture_measures_json() -> &'static str {
    r#"{
      "@context": "http://environment.data.gov.uk/flood-monitoring/meta/context.jsonld",
      "meta": { "publisher": "Environment Agency" },
      "items": [
        {
          "@id": "http://environment.data.gov.uk/flood-monitoring/id/measures/1029TH-level-stage-i-15_min-mASD",
          "label": "Avon - level-stage-i-15_min-mASD",
          "parameter": "level",
          "parameterName": "Water Level",
          "period": 900,
          "qualifier": "Stage",
          "station": "http://environment.data.gov.uk/flood-monitoring/id/stations/1029TH",
          "unitName": "mASD"
        },
        {
          "@id": "http://environment.data.gov.uk/flood-monitoring/id/measures/1029TH-flow--i-15_min-m3_s",
          "parameter": "flow",
          "unitName": "m3/s"
        }
      ]
    }"#
}

/// Envelope with no items at all.
#[cfg(test)]
pub(crate) fn fixture_empty_items_json() -> &'static str {
    r#"{ "meta": { "publisher": "Environment Agency" }, "items": [] }"#
}
