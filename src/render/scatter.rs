//! Scatter plots: temperature vs. rentals, and the hour/weekday clusters.

use super::colormap::{category_color, ColorMap};
use super::svg::{format_tick, nice_ticks, PlotArea, SvgCanvas};
use crate::constants::{
    CHART_MARGIN, DAYS_PER_WEEK, HOURS_PER_DAY, MARKER_RADIUS, SCATTER_HEIGHT, SCATTER_OPACITY,
    SCATTER_WIDTH,
};
use crate::types::{weekday_label, ClusterView, TemperaturePoint};

pub const TEMPERATURE_TITLE: &str = "Rentals vs. Temperature, Colored by Humidity";
pub const CLUSTER_TITLE: &str = "Rider Clusters by Hour and Day";

/// Smallest and largest of an iterator of floats.
fn extent(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

fn tick_marks(ticks: &[f64], map: impl Fn(f64) -> f64) -> Vec<(f64, String)> {
    ticks.iter().map(|v| (map(*v), format_tick(*v))).collect()
}

/// Temperature on x, ride count on y, humidity as marker color.
pub fn render_temperature_scatter(points: &[TemperaturePoint]) -> String {
    let mut canvas = SvgCanvas::new(SCATTER_WIDTH, SCATTER_HEIGHT);
    let area = PlotArea::new(SCATTER_WIDTH, SCATTER_HEIGHT, CHART_MARGIN);
    canvas.title(&area, TEMPERATURE_TITLE);

    let (t_min, t_max) = extent(points.iter().map(|p| p.temperature)).unwrap_or((0.0, 1.0));
    let (h_min, h_max) = extent(points.iter().map(|p| p.humidity)).unwrap_or((0.0, 1.0));
    let c_max = points.iter().map(|p| p.count).max().unwrap_or(0) as f64;

    let x_ticks = nice_ticks(t_min.min(0.0), t_max.max(1.0), 5);
    let y_ticks = nice_ticks(0.0, c_max.max(1.0), 5);
    let x_lo = x_ticks.first().copied().unwrap_or(0.0).min(t_min);
    let x_hi = x_ticks.last().copied().unwrap_or(1.0).max(t_max);
    let y_hi = y_ticks.last().copied().unwrap_or(1.0).max(c_max).max(1.0);

    let x = area.x_scale(x_lo, x_hi);
    let y = area.y_scale(0.0, y_hi);
    canvas.axes(
        &area,
        &tick_marks(&x_ticks, |v| x.map(v)),
        &tick_marks(&y_ticks, |v| y.map(v)),
        false,
    );

    for p in points {
        let color = ColorMap::CoolWarm.sample_range(p.humidity, h_min, h_max);
        canvas.circle(
            x.map(p.temperature),
            y.map(p.count as f64),
            MARKER_RADIUS,
            &color.to_string(),
            SCATTER_OPACITY,
        );
    }

    canvas.axis_labels(&area, "Temperature", "Rentals");
    canvas.colorbar(&area, ColorMap::CoolWarm, h_min, h_max, "Humidity");
    canvas.finish()
}

/// Hour on x, weekday on y, one color per cluster.
///
/// `cluster_count` fixes the palette so colors stay stable across renders
/// even when a label is unused.
pub fn render_cluster_scatter(view: &ClusterView, cluster_count: usize) -> String {
    let mut canvas = SvgCanvas::new(SCATTER_WIDTH, SCATTER_HEIGHT);
    let area = PlotArea::new(SCATTER_WIDTH, SCATTER_HEIGHT, CHART_MARGIN);
    canvas.title(&area, CLUSTER_TITLE);

    let x = area.x_scale(-0.5, HOURS_PER_DAY as f64 - 0.5);
    let y = area.y_scale(-0.5, DAYS_PER_WEEK as f64 - 0.5);

    let x_ticks: Vec<(f64, String)> = (0..HOURS_PER_DAY)
        .step_by(2)
        .map(|h| (x.map(h as f64), h.to_string()))
        .collect();
    let y_ticks: Vec<(f64, String)> = (0..DAYS_PER_WEEK)
        .map(|d| (y.map(d as f64), weekday_label(d).to_string()))
        .collect();
    canvas.axes(&area, &x_ticks, &y_ticks, false);

    let palette_size = cluster_count.max(view.centroids.len()).max(1);
    let colors: Vec<String> = (0..palette_size)
        .map(|i| category_color(i, palette_size).to_string())
        .collect();

    // Many rows share a (hour, weekday) cell; draw each distinct marker once.
    let mut drawn = std::collections::HashSet::new();
    for p in &view.points {
        if !drawn.insert((p.hour, p.weekday, p.cluster)) {
            continue;
        }
        let color = &colors[p.cluster.min(palette_size - 1)];
        canvas.circle(
            x.map(p.hour as f64),
            y.map(p.weekday as f64),
            MARKER_RADIUS + 1.5,
            color,
            1.0,
        );
    }

    let legend: Vec<(String, String)> = colors
        .iter()
        .enumerate()
        .map(|(i, c)| (i.to_string(), c.clone()))
        .collect();
    canvas.legend(&area, "cluster", &legend);
    canvas.axis_labels(&area, "Hour", "Day of Week");
    canvas.finish()
}
