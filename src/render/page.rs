//! Full dashboard page assembly.
//!
//! Sections appear in a fixed order: filtered table, heatmap, daily totals,
//! temperature scatter, clusters.

use super::escape_html;
use super::heatmap::{render_heatmap, HEATMAP_TITLE};
use super::line_chart::{render_daily_totals, DAILY_TITLE};
use super::scatter::{
    render_cluster_scatter, render_temperature_scatter, CLUSTER_TITLE, TEMPERATURE_TITLE,
};
use super::table::render_table;
use crate::constants::{PAGE_CAPTION, PAGE_INTRO, PAGE_OUTRO, PAGE_TITLE};
use crate::data::Report;
use std::fmt::Write;

/// Section ids in render order
pub const SECTION_IDS: [&str; 5] = ["filtered", "heatmap", "daily", "temperature", "clusters"];

const STYLE: &str = r#"
* { box-sizing: border-box; }
body { margin: 0; font-family: sans-serif; color: #222; display: flex; }
aside { width: 240px; min-height: 100vh; padding: 24px 16px; background: #f0f2f6; }
main { flex: 1; padding: 24px 48px; max-width: 1100px; }
section { margin: 32px 0; }
.table-header { display: flex; gap: 8px; align-items: center; margin-bottom: 8px; }
.badge { padding: 2px 8px; border-radius: 10px; background: #e3ebfb; color: #1f4fd1; font-size: 12px; }
.data-table { border-collapse: collapse; font-size: 13px; }
.data-table th, .data-table td { border: 1px solid #ddd; padding: 4px 10px; text-align: right; }
.data-table th { background: #f6f6f6; }
.data-table tbody tr:nth-child(even) { background: #fafafa; }
.data-table td.index { color: #888; }
.data-table tr.empty td { text-align: center; color: #888; }
footer { color: #888; font-size: 12px; margin-top: 48px; }
"#;

/// Render the complete HTML document for a report.
pub fn render_page(report: &Report, cluster_count: usize) -> String {
    let mut html = String::with_capacity(256 * 1024);
    let selected = report.selected_date.format("%Y-%m-%d").to_string();

    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n<title>{}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n",
        escape_html(PAGE_TITLE)
    );

    // Sidebar date picker
    let bounds = report
        .date_range
        .map(|r| {
            format!(
                " min=\"{}\" max=\"{}\"",
                r.start.format("%Y-%m-%d"),
                r.end.format("%Y-%m-%d")
            )
        })
        .unwrap_or_default();
    let _ = write!(
        html,
        concat!(
            "<aside>\n<h2>Date Filter</h2>\n",
            "<form method=\"get\" action=\"/\">\n",
            "<label for=\"date\">Choose a date</label><br>\n",
            "<input type=\"date\" id=\"date\" name=\"date\" value=\"{}\"{} onchange=\"this.form.submit()\">\n",
            "<noscript><button type=\"submit\">Show</button></noscript>\n",
            "</form>\n</aside>\n"
        ),
        selected, bounds
    );

    let _ = write!(
        html,
        "<main>\n<h1>{}</h1>\n<p>{}</p>\n",
        escape_html(PAGE_TITLE),
        escape_html(PAGE_INTRO)
    );

    let table_title = format!("Bike Rentals on {selected}");
    let sections: [(&str, String, String); 5] = [
        (SECTION_IDS[0], table_title.clone(), render_table(&table_title, &report.filtered)),
        (SECTION_IDS[1], HEATMAP_TITLE.to_string(), render_heatmap(&report.heatmap)),
        (SECTION_IDS[2], DAILY_TITLE.to_string(), render_daily_totals(&report.daily_totals)),
        (
            SECTION_IDS[3],
            TEMPERATURE_TITLE.to_string(),
            render_temperature_scatter(&report.temperature),
        ),
        (
            SECTION_IDS[4],
            CLUSTER_TITLE.to_string(),
            render_cluster_scatter(&report.clusters, cluster_count),
        ),
    ];

    for (id, heading, body) in &sections {
        let _ = write!(
            html,
            "<section id=\"{id}\">\n<h3>{}</h3>\n{body}</section>\n",
            escape_html(heading)
        );
    }

    let _ = write!(
        html,
        "<p>{}</p>\n<footer>{}</footer>\n</main>\n</body>\n</html>\n",
        escape_html(PAGE_OUTRO),
        escape_html(PAGE_CAPTION)
    );

    html
}
