//! Daily total line chart.

use super::svg::{format_tick, nice_ticks, PlotArea, SvgCanvas};
use crate::constants::{CHART_HEIGHT, CHART_MARGIN, CHART_WIDTH, MARKER_RADIUS, MAX_DATE_TICKS};
use crate::types::DailyTotal;

pub const DAILY_TITLE: &str = "Total Rentals per Day";

const LINE_COLOR: &str = "#1f4fd1";

/// Render daily totals as a line with point markers, dates on the x axis.
pub fn render_daily_totals(totals: &[DailyTotal]) -> String {
    let mut canvas = SvgCanvas::new(CHART_WIDTH, CHART_HEIGHT);
    let area = PlotArea::new(CHART_WIDTH, CHART_HEIGHT, CHART_MARGIN);
    canvas.title(&area, DAILY_TITLE);

    let (Some(first), Some(last)) = (totals.first(), totals.last()) else {
        canvas.axes(&area, &[], &[], false);
        canvas.axis_labels(&area, "Date", "Total Bikes Rented");
        return canvas.finish();
    };

    let span = (last.date - first.date).num_days() as f64;
    let max_total = totals.iter().map(|t| t.total).max().unwrap_or(0) as f64;
    let y_ticks = nice_ticks(0.0, max_total.max(1.0), 5);
    let y_top = y_ticks.last().copied().unwrap_or(1.0).max(max_total).max(1.0);

    let x = area.x_scale(0.0, span);
    let y = area.y_scale(0.0, y_top);
    let day_offset = |t: &DailyTotal| (t.date - first.date).num_days() as f64;

    let stride = totals.len().div_ceil(MAX_DATE_TICKS).max(1);
    let x_ticks: Vec<(f64, String)> = totals
        .iter()
        .step_by(stride)
        .map(|t| (x.map(day_offset(t)), t.date.format("%Y-%m-%d").to_string()))
        .collect();
    let y_tick_marks: Vec<(f64, String)> =
        y_ticks.iter().map(|v| (y.map(*v), format_tick(*v))).collect();
    canvas.axes(&area, &x_ticks, &y_tick_marks, true);

    let points: Vec<(f64, f64)> = totals
        .iter()
        .map(|t| (x.map(day_offset(t)), y.map(t.total as f64)))
        .collect();
    canvas.polyline(&points, LINE_COLOR, 1.5);
    for (px, py) in &points {
        canvas.circle(*px, *py, MARKER_RADIUS, LINE_COLOR, 1.0);
    }

    canvas.axis_labels(&area, "Date", "Total Bikes Rented");
    canvas.finish()
}
