//! HTML page rendering.
//!
//! Pages are assembled with `format!`; every piece of upstream text goes
//! through `escape` first.

use std::fmt::Write;

use crate::analysis::correlation::StationWarnings;
use crate::dashboard::chart::render_svg;
use crate::dashboard::DashboardView;

const STYLE: &str = "body { font-family: Arial, sans-serif; margin: 2em; } \
                     table { border-collapse: collapse; } \
                     th, td { border: 1px solid #ccc; padding: 4px 8px; text-align: left; } \
                     .flood-warning { color: red; font-size: 18px; } \
                     nav a { margin-right: 1em; }";

/// Escapes text for use in element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>{}</style>\n</head>\n<body>\n<nav><a href=\"/\">Stations</a><a href=\"/dashboard/\">Dashboard</a><a href=\"/API/\">API</a></nav>\n{}\n</body>\n</html>\n",
        escape(title),
        STYLE,
        body
    )
}

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

/// `GET /`: every station with its warnings.
pub fn render_home(stations: &[StationWarnings]) -> String {
    let mut body = String::from("<h1>Flood Monitoring Stations</h1>\n");

    if stations.is_empty() {
        body.push_str("<p>No station data available.</p>\n");
        return page("Flood Monitoring Stations", &body);
    }

    body.push_str("<table>\n<tr><th>Station ID</th><th>Name</th><th>Flood Warnings</th></tr>\n");
    for station in stations {
        let warnings: String = station
            .warnings
            .iter()
            .map(|w| format!("<li>{}</li>", escape(w)))
            .collect();
        let _ = writeln!(
            body,
            "<tr><td><a href=\"/dashboard/?station={}\">{}</a></td><td>{}</td><td><ul>{}</ul></td></tr>",
            urlencoding::encode(&station.id),
            escape(&station.id),
            escape(&station.name),
            warnings
        );
    }
    body.push_str("</table>\n");

    page("Flood Monitoring Stations", &body)
}

/// `GET /API/`: static description of the JSON endpoints.
pub fn render_api_info() -> String {
    let body = "<h1>API</h1>\n\
        <p>Data is proxied from the Environment Agency \
        <a href=\"https://environment.data.gov.uk/flood-monitoring/doc/reference\">real-time flood-monitoring API</a>.</p>\n\
        <table>\n\
        <tr><th>Endpoint</th><th>Returns</th></tr>\n\
        <tr><td><code>GET /stations</code></td><td>JSON array of <code>{\"id\", \"name\"}</code> for every monitoring station.</td></tr>\n\
        <tr><td><code>GET /readings/{station_id}</code></td><td>JSON array of <code>{\"time\", \"value\"}</code> for the station's most recent readings.</td></tr>\n\
        <tr><td><code>GET /health</code></td><td>Service status.</td></tr>\n\
        </table>\n\
        <p>Failed upstream requests return status 500 with <code>{\"error\": \"...\"}</code>.</p>";

    page("API", body)
}

/// `GET /dashboard/`: selector, warning, chart and table.
pub fn render_dashboard(view: &DashboardView) -> String {
    let mut body = String::from("<h1>UK Flood Monitoring Dashboard</h1>\n");

    body.push_str("<form method=\"get\" action=\"/dashboard/\">\n<select name=\"station\" onchange=\"this.form.submit()\">\n");
    let placeholder_selected = if view.selected.is_none() { " selected" } else { "" };
    let _ = writeln!(body, "<option value=\"\"{}>Select a station</option>", placeholder_selected);
    for option in &view.options {
        let selected = if view.selected.as_deref() == Some(option.value.as_str()) { " selected" } else { "" };
        let _ = writeln!(
            body,
            "<option value=\"{}\"{}>{}</option>",
            escape(&option.value),
            selected,
            escape(&option.label)
        );
    }
    body.push_str("</select>\n<button type=\"submit\">Show</button>\n</form>\n");

    let panel = &view.panel;

    body.push_str("<div id=\"flood-warning\" class=\"flood-warning\">");
    if let Some(warning) = &panel.warning {
        let _ = write!(body, "<h3>Flood Risk</h3><p>{}</p>", escape(warning));
    }
    body.push_str("</div>\n");

    let _ = writeln!(body, "<div id=\"readings-graph\">{}</div>", render_svg(&panel.chart));

    body.push_str("<div id=\"readings-table\">");
    if !panel.table.is_empty() {
        body.push_str("<h3>Data Table</h3>\n<table>\n<tr><th>time</th><th>value</th></tr>\n");
        for reading in &panel.table {
            let _ = writeln!(
                body,
                "<tr><td>{}</td><td>{}</td></tr>",
                reading.time.format("%Y-%m-%d %H:%M:%S%:z"),
                reading.value
            );
        }
        body.push_str("</table>\n");
    }
    body.push_str("</div>\n");

    page("UK Flood Monitoring Dashboard", &body)
}
