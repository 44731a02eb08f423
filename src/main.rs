//! Flood Dashboard - HTTP server
//!
//! Proxies the Environment Agency flood-monitoring API and renders:
//! 1. A station list with matching flood warnings
//! 2. A per-station dashboard of the last 24 hours of readings
//! 3. JSON endpoints for stations and readings
//!
//! Usage:
//!   cargo run --release                              # Port from dashboard.toml (default 8000)
//!   cargo run --release -- --port 8080               # Override the port
//!   cargo run --release -- --config other.toml       # Alternative config file
//!
//! Environment:
//!   FLOOD_DASHBOARD_PORT     - listening port (overridden by --port)
//!   FLOOD_DASHBOARD_UPSTREAM - flood-monitoring API root
//!   RUST_LOG                 - log filter

use flood_dashboard::config::{self, DashboardConfig};
use flood_dashboard::endpoint;
use flood_dashboard::ingest::ea::EaClient;
use flood_dashboard::logging;
use std::env;
use std::path::PathBuf;

fn main() {
    println!("🌊 UK Flood Monitoring Dashboard");
    println!("================================\n");

    dotenv::dotenv().ok();

    // Parse command-line arguments
    let args: Vec<String> = env::args().collect();
    let mut config_path = PathBuf::from(config::DEFAULT_CONFIG_PATH);
    let mut port_arg: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--port" | "--config" if i + 1 >= args.len() => {
                eprintln!("Error: {} requires a value", args[i]);
                std::process::exit(1);
            }
            "--port" => {
                port_arg = Some(args[i + 1].clone());
                i += 2;
            }
            "--config" => {
                config_path = PathBuf::from(&args[i + 1]);
                i += 2;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                eprintln!("Usage: {} [--port PORT] [--config PATH]", args[0]);
                std::process::exit(1);
            }
        }
    }

    let config = match load(&config_path, port_arg.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    logging::init_logging(&config.log_level);

    let client = match EaClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("❌ Failed to create upstream client: {}", e);
            std::process::exit(1);
        }
    };

    println!("🚀 Serving on http://{}", config.listen_addr());
    println!("   GET /                       - Stations and flood warnings");
    println!("   GET /dashboard/             - Station readings dashboard");
    println!("   GET /stations               - Station list (JSON)");
    println!("   GET /readings/{{station_id}} - Recent readings (JSON)");
    println!("   Press Ctrl+C to stop\n");

    if let Err(e) = endpoint::start_endpoint_server(&config, &client) {
        eprintln!("❌ Endpoint server error: {}", e);
        std::process::exit(1);
    }
}

/// File, then environment, then command line.
fn load(path: &std::path::Path, port_arg: Option<&str>) -> Result<DashboardConfig, config::ConfigError> {
    let config = config::load_config(path)?;
    let mut config = config::apply_env_overrides(config, |key| env::var(key).ok())?;
    if let Some(raw) = port_arg {
        config.port = config::parse_port(raw)?;
    }
    Ok(config)
}
