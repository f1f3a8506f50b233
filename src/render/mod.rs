//! HTML and SVG rendering of the dashboard views.
//!
//! Every chart is a standalone inline SVG string; [`render_page`] stitches
//! them into one document.

pub mod colormap;
pub mod heatmap;
pub mod line_chart;
pub mod page;
pub mod scatter;
pub mod svg;
pub mod table;

pub use page::{render_page, SECTION_IDS};

/// Escape text for inclusion in HTML or SVG content and attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
