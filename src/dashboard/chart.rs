//! Inline SVG line chart for a reading series.

use std::fmt::Write;

use crate::dashboard::html::escape;
use crate::dashboard::ChartSeries;

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 360.0;
const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 50.0;

/// Maps `value` from `[lo, hi]` onto `[out_lo, out_hi]`. A flat range maps
/// to the midpoint.
fn scale(value: f64, lo: f64, hi: f64, out_lo: f64, out_hi: f64) -> f64 {
    if (hi - lo).abs() < f64::EPSILON {
        return (out_lo + out_hi) / 2.0;
    }
    out_lo + (value - lo) / (hi - lo) * (out_hi - out_lo)
}

/// Renders the series as an `<svg>` element. An empty series draws the
/// title only.
pub fn render_svg(series: &ChartSeries) -> String {
    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg class="chart" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}">"#,
        w = WIDTH,
        h = HEIGHT
    );
    let _ = write!(
        svg,
        r#"<text x="{}" y="24" text-anchor="middle" font-size="16">{}</text>"#,
        WIDTH / 2.0,
        escape(&series.title)
    );

    if series.points.is_empty() {
        svg.push_str("</svg>");
        return svg;
    }

    let plot_left = MARGIN_LEFT;
    let plot_right = WIDTH - MARGIN_RIGHT;
    let plot_top = MARGIN_TOP;
    let plot_bottom = HEIGHT - MARGIN_BOTTOM;

    // points are sorted by time, so first/last bound the x range
    let t0 = series.points[0].time.timestamp() as f64;
    let t1 = series.points[series.points.len() - 1].time.timestamp() as f64;
    let (v_min, v_max) = series
        .points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), r| (lo.min(r.value), hi.max(r.value)));

    // axes
    let _ = write!(
        svg,
        r##"<line x1="{l}" y1="{b}" x2="{r}" y2="{b}" stroke="#333"/><line x1="{l}" y1="{t}" x2="{l}" y2="{b}" stroke="#333"/>"##,
        l = plot_left,
        r = plot_right,
        t = plot_top,
        b = plot_bottom
    );

    let coords: Vec<String> = series
        .points
        .iter()
        .map(|r| {
            let x = scale(r.time.timestamp() as f64, t0, t1, plot_left, plot_right);
            let y = scale(r.value, v_min, v_max, plot_bottom, plot_top);
            format!("{:.1},{:.1}", x, y)
        })
        .collect();
    let _ = write!(
        svg,
        r##"<polyline fill="none" stroke="#1f77b4" stroke-width="2" points="{}"/>"##,
        coords.join(" ")
    );

    // tick labels: value extremes on the y axis, first/last time on the x axis
    let _ = write!(
        svg,
        r#"<text x="{x}" y="{y}" text-anchor="end" font-size="11">{v:.3}</text>"#,
        x = plot_left - 6.0,
        y = plot_top + 4.0,
        v = v_max
    );
    let _ = write!(
        svg,
        r#"<text x="{x}" y="{y}" text-anchor="end" font-size="11">{v:.3}</text>"#,
        x = plot_left - 6.0,
        y = plot_bottom,
        v = v_min
    );
    let first = &series.points[0].time;
    let last = &series.points[series.points.len() - 1].time;
    let _ = write!(
        svg,
        r#"<text x="{}" y="{}" font-size="11">{}</text>"#,
        plot_left,
        plot_bottom + 16.0,
        first.format("%d %b %H:%M")
    );
    let _ = write!(
        svg,
        r#"<text x="{}" y="{}" text-anchor="end" font-size="11">{}</text>"#,
        plot_right,
        plot_bottom + 16.0,
        last.format("%d %b %H:%M")
    );

    // axis titles
    let _ = write!(
        svg,
        r#"<text x="{}" y="{}" text-anchor="middle" font-size="13">{}</text>"#,
        (plot_left + plot_right) / 2.0,
        HEIGHT - 10.0,
        escape(&series.x_label)
    );
    let mid_y = (plot_top + plot_bottom) / 2.0;
    let _ = write!(
        svg,
        r#"<text x="16" y="{y}" text-anchor="middle" font-size="13" transform="rotate(-90 16 {y})">{}</text>"#,
        escape(&series.y_label),
        y = mid_y
    );

    svg.push_str("</svg>");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Reading;
    use chrono::{TimeZone, Utc};

    fn series(points: Vec<Reading>) -> ChartSeries {
        ChartSeries {
            title: "Readings for Avon & Co (ID: A1)".to_string(),
            x_label: "Time".to_string(),
            y_label: "level (mASD)".to_string(),
            points,
        }
    }

    #[test]
    fn test_scale_maps_endpoints_and_flat_ranges() {
        assert_eq!(scale(0.0, 0.0, 10.0, 100.0, 200.0), 100.0);
        assert_eq!(scale(10.0, 0.0, 10.0, 100.0, 200.0), 200.0);
        assert_eq!(scale(5.0, 5.0, 5.0, 100.0, 200.0), 150.0);
    }

    #[test]
    fn test_empty_series_draws_title_only() {
        let svg = render_svg(&ChartSeries::placeholder("No data available"));
        assert!(svg.contains("No data available"));
        assert!(!svg.contains("<polyline"));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn test_series_draws_one_vertex_per_point() {
        let points = vec![
            Reading { time: Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap(), value: 0.4 },
            Reading { time: Utc.with_ymd_and_hms(2024, 5, 1, 11, 0, 0).unwrap(), value: 0.6 },
            Reading { time: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(), value: 0.5 },
        ];
        let svg = render_svg(&series(points));

        let polyline = svg.split("points=\"").nth(1).expect("polyline should exist");
        let vertices = polyline.split('"').next().unwrap_or_default();
        assert_eq!(vertices.split(' ').count(), 3);
        assert!(svg.contains("level (mASD)"));
        assert!(svg.contains("Avon &amp; Co"), "title must be escaped");
    }

    #[test]
    fn test_single_point_series_is_centred() {
        let points = vec![Reading { time: Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap(), value: 1.0 }];
        let svg = render_svg(&series(points));
        assert!(svg.contains("points=\"425.0,175.0\""));
    }
}
