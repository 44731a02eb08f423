//! HTTP endpoint for the flood dashboard
//!
//! Serves the HTML views and the JSON proxy endpoints. Requests are handled
//! one at a time on the calling thread; each runs its upstream fetches in
//! sequence and shares nothing with the next.
//!
//! Endpoints:
//! - GET /                      - Stations with correlated flood warnings (HTML)
//! - GET /API/                  - Endpoint documentation (HTML)
//! - GET /dashboard/?station=ID - Interactive station view (HTML)
//! - GET /stations              - Station list (JSON)
//! - GET /readings/{station_id} - Most recent readings for a station (JSON)
//! - GET /health                - Service health check

use chrono::{DateTime, Utc};
use serde_json::json;
use tiny_http::{Header, Method, Response, Server};

use crate::config::DashboardConfig;
use crate::dashboard::{self, html};
use crate::ingest::FloodSource;

const CONTENT_TYPE_JSON: &str = "application/json";
const CONTENT_TYPE_HTML: &str = "text/html; charset=utf-8";

// ---------------------------------------------------------------------------
// Replies
// ---------------------------------------------------------------------------

/// A transport-independent response: status, content type and body.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl Reply {
    fn html(body: String) -> Self {
        Self { status: 200, content_type: CONTENT_TYPE_HTML, body }
    }

    fn json(status: u16, value: serde_json::Value) -> Self {
        let body = serde_json::to_string_pretty(&value).unwrap_or_else(|_| "null".to_string());
        Self { status, content_type: CONTENT_TYPE_JSON, body }
    }

    fn error(status: u16, message: &str) -> Self {
        Self::json(status, json!({ "error": message }))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to start HTTP server on {addr}: {reason}")]
    Bind { addr: String, reason: String },
}

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

/// Dispatches one request to its handler.
///
/// `url` is the request target as received, path plus optional query.
pub fn route(source: &dyn FloodSource, method: &Method, url: &str, now: DateTime<Utc>) -> Reply {
    if *method != Method::Get {
        return Reply::error(405, "Method not allowed");
    }

    let (path, query) = match url.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (url, None),
    };

    match path {
        "/" => handle_home(source),
        "/API" | "/API/" => Reply::html(html::render_api_info()),
        "/dashboard" | "/dashboard/" => {
            let station = query.and_then(|q| query_param(q, "station"));
            handle_dashboard(source, station.as_deref(), now)
        }
        "/stations" => handle_stations(source),
        "/health" => handle_health(),
        _ => match path.strip_prefix("/readings/") {
            Some(raw_id) if !raw_id.is_empty() => match urlencoding::decode(raw_id) {
                Ok(station_id) => handle_readings(source, &station_id),
                Err(_) => Reply::error(400, "Station id is not valid UTF-8"),
            },
            _ => Reply::json(
                404,
                json!({
                    "error": "Not found",
                    "available_endpoints": ["/", "/API/", "/dashboard/", "/stations", "/readings/{station_id}", "/health"]
                }),
            ),
        },
    }
}

/// First value of `name` in a form-encoded query string.
fn query_param(query: &str, name: &str) -> Option<String> {
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        if key != name {
            return None;
        }
        let value = value.replace('+', " ");
        urlencoding::decode(&value).ok().map(|v| v.into_owned())
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

fn handle_home(source: &dyn FloodSource) -> Reply {
    let stations = dashboard::build_home(source);
    Reply::html(html::render_home(&stations))
}

fn handle_dashboard(source: &dyn FloodSource, station_id: Option<&str>, now: DateTime<Utc>) -> Reply {
    let view = dashboard::build_dashboard(source, station_id, now);
    Reply::html(html::render_dashboard(&view))
}

/// Handle /stations endpoint
fn handle_stations(source: &dyn FloodSource) -> Reply {
    match source.fetch_stations() {
        Ok(stations) => Reply::json(200, json!(stations)),
        Err(e) => {
            tracing::warn!(resource = "stations", error = %e, "upstream fetch failed");
            Reply::error(500, "Failed to fetch station data")
        }
    }
}

/// Handle /readings/{station_id} endpoint
fn handle_readings(source: &dyn FloodSource, station_id: &str) -> Reply {
    match source.fetch_readings(station_id) {
        Ok(readings) => Reply::json(200, json!(readings)),
        Err(e) => {
            tracing::warn!(resource = "readings", station_id, error = %e, "upstream fetch failed");
            Reply::error(500, "Failed to fetch readings")
        }
    }
}

/// Handle /health endpoint
fn handle_health() -> Reply {
    Reply::json(
        200,
        json!({
            "status": "ok",
            "service": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION")
        }),
    )
}

// ---------------------------------------------------------------------------
// HTTP Server
// ---------------------------------------------------------------------------

/// Binds the listening socket.
pub fn bind(addr: &str) -> Result<Server, ServerError> {
    Server::http(addr).map_err(|e| ServerError::Bind {
        addr: addr.to_string(),
        reason: e.to_string(),
    })
}

/// Answers requests until the server is dropped.
pub fn serve(server: &Server, source: &dyn FloodSource) {
    for request in server.incoming_requests() {
        let method = request.method().clone();
        let url = request.url().to_string();

        let reply = route(source, &method, &url, Utc::now());
        tracing::info!(method = %method, url = %url, status = reply.status, "request handled");

        if let Err(e) = request.respond(create_response(reply)) {
            tracing::warn!(error = %e, "failed to send response");
        }
    }
}

/// Start HTTP endpoint server on the configured address
pub fn start_endpoint_server(config: &DashboardConfig, source: &dyn FloodSource) -> Result<(), ServerError> {
    let addr = config.listen_addr();
    let server = bind(&addr)?;

    tracing::info!(addr = %addr, upstream = %config.upstream_base_url, "dashboard listening");
    serve(&server, source);
    Ok(())
}

/// Create HTTP response from a reply
fn create_response(reply: Reply) -> Response<std::io::Cursor<Vec<u8>>> {
    let response = Response::from_data(reply.body.into_bytes()).with_status_code(reply.status);

    match Header::from_bytes(&b"Content-Type"[..], reply.content_type.as_bytes()) {
        Ok(header) => response.with_header(header),
        Err(()) => response,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
