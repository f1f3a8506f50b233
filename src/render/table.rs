//! HTML table for the rows of the selected date.
//!
//! Renders a title bar with a row count badge, a header row and one row per
//! observation. An empty selection renders the header and a placeholder row.

use super::escape_html;
use crate::constants::REQUIRED_COLUMNS;
use crate::types::Observation;
use std::fmt::Write;

/// Format row count for display (e.g., "1.2K rows")
pub fn format_row_count(count: usize) -> String {
    if count >= 1_000_000 {
        format!("{:.1}M rows", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K rows", count as f64 / 1_000.0)
    } else if count == 1 {
        "1 row".to_string()
    } else {
        format!("{} rows", count)
    }
}

/// Cell text for each displayed column, in [`REQUIRED_COLUMNS`] order.
fn row_cells(row: &Observation) -> [String; 6] {
    [
        row.date.format("%Y-%m-%d").to_string(),
        row.hour.to_string(),
        row.weekday.to_string(),
        format!("{:.2}", row.temperature),
        format!("{:.2}", row.humidity),
        row.count.to_string(),
    ]
}

/// Render the filtered rows as an HTML table fragment.
pub fn render_table(title: &str, rows: &[Observation]) -> String {
    let mut html = String::new();

    let _ = writeln!(
        html,
        r#"<div class="table-header"><span class="table-title">{}</span><span class="badge">{}</span></div>"#,
        escape_html(title),
        format_row_count(rows.len())
    );

    html.push_str("<table class=\"data-table\">\n<thead><tr><th>#</th>");
    for col in REQUIRED_COLUMNS {
        let _ = write!(html, "<th>{}</th>", escape_html(col));
    }
    html.push_str("</tr></thead>\n<tbody>\n");

    if rows.is_empty() {
        let _ = writeln!(
            html,
            r#"<tr class="empty"><td colspan="{}">No rows for this date.</td></tr>"#,
            REQUIRED_COLUMNS.len() + 1
        );
    }

    for (idx, row) in rows.iter().enumerate() {
        html.push_str("<tr>");
        let _ = write!(html, "<td class=\"index\">{idx}</td>");
        for cell in row_cells(row) {
            let _ = write!(html, "<td>{}</td>", escape_html(&cell));
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table>\n");
    html
}
