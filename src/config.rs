//! Dashboard configuration loader - parses dashboard.toml
//!
//! Keeps the listening port and upstream settings out of code. The values
//! are read once at startup and handed to the server as a plain struct;
//! nothing here is mutable after that.

use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "dashboard.toml";
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://environment.data.gov.uk/flood-monitoring";

pub const ENV_PORT: &str = "FLOOD_DASHBOARD_PORT";
pub const ENV_UPSTREAM: &str = "FLOOD_DASHBOARD_UPSTREAM";

/// Runtime settings for the dashboard process.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Interface the HTTP server binds to.
    pub bind_address: String,
    pub port: u16,

    /// Root of the flood-monitoring API, without trailing slash.
    pub upstream_base_url: String,

    /// `_limit` passed to the per-station readings resource.
    pub readings_limit: u32,

    /// Per-request timeout for upstream calls.
    pub request_timeout_secs: u64,

    /// Fallback log filter when RUST_LOG is unset.
    pub log_level: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8000,
            upstream_base_url: DEFAULT_UPSTREAM_BASE_URL.to_string(),
            readings_limit: 100,
            request_timeout_secs: 30,
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid port {0:?}")]
    InvalidPort(String),
}

impl DashboardConfig {
    /// Address string handed to the HTTP server, e.g. `0.0.0.0:8000`.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

/// Loads configuration from a TOML file.
///
/// A missing file is not an error: the defaults are returned. A file that
/// exists but cannot be parsed is.
pub fn load_config(path: &Path) -> Result<DashboardConfig, ConfigError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(DashboardConfig::default()),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.display().to_string(),
                source,
            });
        }
    };

    parse_config(&contents).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// Parses a TOML document; absent keys take their default values.
pub fn parse_config(contents: &str) -> Result<DashboardConfig, toml::de::Error> {
    toml::from_str(contents)
}

/// Applies environment overrides on top of a loaded configuration.
///
/// `lookup` is usually `|k| std::env::var(k).ok()`; tests pass a closure
/// over a fixed map instead of touching the process environment.
pub fn apply_env_overrides<F>(mut config: DashboardConfig, lookup: F) -> Result<DashboardConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(raw) = lookup(ENV_PORT) {
        config.port = parse_port(&raw)?;
    }
    if let Some(url) = lookup(ENV_UPSTREAM) {
        config.upstream_base_url = url.trim_end_matches('/').to_string();
    }
    Ok(config)
}

/// Parses a port number given on the command line or in the environment.
pub fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    raw.trim()
        .parse::<u16>()
        .map_err(|_| ConfigError::InvalidPort(raw.to_string()))
}
