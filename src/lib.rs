//! flood_dashboard: web dashboard over the Environment Agency flood-monitoring API.
//!
//! # Module structure
//!
//! ```text
//! flood_dashboard
//! ├── model       — shared data types (Station, FloodWarning, Reading, FetchError, …)
//! ├── config      — dashboard.toml loader + environment overrides
//! ├── logging     — tracing subscriber setup
//! ├── ingest
//! │   ├── (mod)   — FloodSource trait, failure → default degradation
//! │   ├── ea      — flood-monitoring API: URL construction + JSON parsing + client
//! │   └── fixtures (test only) — representative API response payloads
//! ├── analysis
//! │   ├── correlation — station ↔ warning-area matching
//! │   └── window      — 24-hour reading window
//! ├── dashboard   — view models for the pages, plus HTML and SVG rendering
//! └── endpoint    — HTTP routing and server loop
//! ```

/// Public modules
pub mod analysis;
pub mod config;
pub mod dashboard;
pub mod endpoint;
pub mod ingest;
pub mod logging;
pub mod model;
