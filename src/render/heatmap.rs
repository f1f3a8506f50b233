//! Hour × weekday heatmap of mean ride counts.

use super::colormap::ColorMap;
use super::svg::{Anchor, PlotArea, SvgCanvas};
use crate::constants::{CHART_HEIGHT, CHART_MARGIN, CHART_WIDTH, DAYS_PER_WEEK, HOURS_PER_DAY};
use crate::types::{weekday_label, HourlyWeekdayMatrix};

pub const HEATMAP_TITLE: &str = "Average Rentals by Day of Week and Hour";

/// Render the matrix as an annotated SVG heatmap.
///
/// Cells without observations are left blank.
pub fn render_heatmap(matrix: &HourlyWeekdayMatrix) -> String {
    let mut canvas = SvgCanvas::new(CHART_WIDTH, CHART_HEIGHT);
    let area = PlotArea::new(CHART_WIDTH, CHART_HEIGHT, CHART_MARGIN);
    let cell_w = area.width() / HOURS_PER_DAY as f64;
    let cell_h = area.height() / DAYS_PER_WEEK as f64;
    let (min, max) = matrix.value_range().unwrap_or((0.0, 0.0));

    canvas.title(&area, HEATMAP_TITLE);

    for weekday in 0..DAYS_PER_WEEK {
        let y = area.top + weekday as f64 * cell_h;
        for hour in 0..HOURS_PER_DAY {
            let Some(mean) = matrix.get(weekday, hour) else {
                continue;
            };
            let x = area.left + hour as f64 * cell_w;
            let color = ColorMap::YlGnBu.sample_range(mean, min, max);
            canvas.rect(x, y, cell_w, cell_h, &color.to_string());

            let text_color = if color.is_dark() { "#ffffff" } else { "#222222" };
            canvas.text(
                x + cell_w / 2.0,
                y + cell_h / 2.0 + 4.0,
                &format!("{mean:.0}"),
                Anchor::Middle,
                10.0,
                text_color,
            );
        }
        canvas.text(
            area.left - 8.0,
            y + cell_h / 2.0 + 4.0,
            weekday_label(weekday),
            Anchor::End,
            11.0,
            "#444444",
        );
    }

    for hour in 0..HOURS_PER_DAY {
        let x = area.left + (hour as f64 + 0.5) * cell_w;
        canvas.text_rotated(x, area.bottom + 16.0, &format!("{hour}:00"), Anchor::End, 10.0, -45.0);
    }

    canvas.axis_labels(&area, "Hour of Day", "Day of Week");
    canvas.colorbar(&area, ColorMap::YlGnBu, min, max, "Average rentals");
    canvas.finish()
}
