//! Minimal SVG builder shared by the charts.
//!
//! Charts draw into an [`SvgCanvas`] in pixel coordinates and map data with
//! [`LinearScale`]. All text goes through [`escape_html`].

use super::colormap::ColorMap;
use super::escape_html;
use std::fmt::Write;

const FONT: &str = "font-family=\"sans-serif\"";
const AXIS_COLOR: &str = "#444444";
const GRID_COLOR: &str = "#e5e5e5";

/// Maps a data interval onto a pixel interval.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Pixel position of `value`. A zero-width domain maps to the range midpoint.
    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }
}

/// Pixel rectangle the data is drawn into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl PlotArea {
    /// Area inside `margin` (top, right, bottom, left) of a `width` x `height` canvas.
    pub fn new(width: f64, height: f64, margin: (f64, f64, f64, f64)) -> Self {
        let (top, right, bottom, left) = margin;
        Self {
            left,
            top,
            right: width - right,
            bottom: height - bottom,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Scale for the horizontal axis.
    pub fn x_scale(&self, min: f64, max: f64) -> LinearScale {
        LinearScale::new((min, max), (self.left, self.right))
    }

    /// Scale for the vertical axis (data grows upward).
    pub fn y_scale(&self, min: f64, max: f64) -> LinearScale {
        LinearScale::new((min, max), (self.bottom, self.top))
    }
}

/// Text anchoring for labels
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    fn as_str(&self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

/// An SVG document under construction.
pub struct SvgCanvas {
    width: f64,
    height: f64,
    body: String,
}

impl SvgCanvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            body: String::new(),
        }
    }

    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: &str) {
        let _ = writeln!(
            self.body,
            r#"<rect x="{x:.1}" y="{y:.1}" width="{w:.1}" height="{h:.1}" fill="{fill}"/>"#
        );
    }

    pub fn circle(&mut self, cx: f64, cy: f64, r: f64, fill: &str, opacity: f64) {
        let _ = writeln!(
            self.body,
            r#"<circle cx="{cx:.1}" cy="{cy:.1}" r="{r:.1}" fill="{fill}" fill-opacity="{opacity:.2}"/>"#
        );
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: &str, width: f64) {
        let _ = writeln!(
            self.body,
            r#"<line x1="{x1:.1}" y1="{y1:.1}" x2="{x2:.1}" y2="{y2:.1}" stroke="{stroke}" stroke-width="{width:.1}"/>"#
        );
    }

    pub fn polyline(&mut self, points: &[(f64, f64)], stroke: &str, width: f64) {
        if points.len() < 2 {
            return;
        }
        let coords: Vec<String> = points.iter().map(|(x, y)| format!("{x:.1},{y:.1}")).collect();
        let _ = writeln!(
            self.body,
            r#"<polyline points="{}" fill="none" stroke="{stroke}" stroke-width="{width:.1}"/>"#,
            coords.join(" ")
        );
    }

    pub fn text(&mut self, x: f64, y: f64, content: &str, anchor: Anchor, size: f64, fill: &str) {
        let _ = writeln!(
            self.body,
            r#"<text x="{x:.1}" y="{y:.1}" text-anchor="{}" font-size="{size:.0}" fill="{fill}" {FONT}>{}</text>"#,
            anchor.as_str(),
            escape_html(content)
        );
    }

    /// Text rotated around its anchor point (negative degrees turn counter-clockwise).
    pub fn text_rotated(
        &mut self,
        x: f64,
        y: f64,
        content: &str,
        anchor: Anchor,
        size: f64,
        degrees: f64,
    ) {
        let _ = writeln!(
            self.body,
            r#"<text x="{x:.1}" y="{y:.1}" text-anchor="{}" font-size="{size:.0}" fill="{AXIS_COLOR}" transform="rotate({degrees:.0} {x:.1} {y:.1})" {FONT}>{}</text>"#,
            anchor.as_str(),
            escape_html(content)
        );
    }

    /// Chart title centered above the plot area.
    pub fn title(&mut self, area: &PlotArea, title: &str) {
        let x = area.left + area.width() / 2.0;
        self.text(x, area.top - 16.0, title, Anchor::Middle, 15.0, "#222222");
    }

    /// Axis titles below and left of the plot area.
    pub fn axis_labels(&mut self, area: &PlotArea, x_label: &str, y_label: &str) {
        let x = area.left + area.width() / 2.0;
        self.text(x, area.bottom + 58.0, x_label, Anchor::Middle, 13.0, AXIS_COLOR);
        let y = area.top + area.height() / 2.0;
        self.text_rotated(area.left - 58.0, y, y_label, Anchor::Middle, 13.0, -90.0);
    }

    /// Frame, grid lines and tick labels for numeric axes.
    pub fn axes(
        &mut self,
        area: &PlotArea,
        x_ticks: &[(f64, String)],
        y_ticks: &[(f64, String)],
        rotate_x_labels: bool,
    ) {
        for (y, label) in y_ticks {
            self.line(area.left, *y, area.right, *y, GRID_COLOR, 1.0);
            self.text(area.left - 6.0, y + 4.0, label, Anchor::End, 11.0, AXIS_COLOR);
        }
        for (x, label) in x_ticks {
            self.line(*x, area.bottom, *x, area.bottom + 4.0, AXIS_COLOR, 1.0);
            if rotate_x_labels {
                self.text_rotated(*x, area.bottom + 16.0, label, Anchor::End, 11.0, -45.0);
            } else {
                self.text(*x, area.bottom + 16.0, label, Anchor::Middle, 11.0, AXIS_COLOR);
            }
        }
        self.line(area.left, area.bottom, area.right, area.bottom, AXIS_COLOR, 1.0);
        self.line(area.left, area.top, area.left, area.bottom, AXIS_COLOR, 1.0);
    }

    /// Vertical color bar right of the plot area.
    pub fn colorbar(&mut self, area: &PlotArea, map: ColorMap, min: f64, max: f64, label: &str) {
        const STEPS: usize = 32;
        let x = area.right + 20.0;
        let w = 14.0;
        let step_h = area.height() / STEPS as f64;
        for i in 0..STEPS {
            let t = 1.0 - (i as f64 + 0.5) / STEPS as f64;
            let y = area.top + i as f64 * step_h;
            let color = map.sample(t).to_string();
            self.rect(x, y, w, step_h + 0.5, &color);
        }
        self.text(x + w + 4.0, area.top + 4.0, &format_tick(max), Anchor::Start, 10.0, AXIS_COLOR);
        self.text(x + w + 4.0, area.bottom, &format_tick(min), Anchor::Start, 10.0, AXIS_COLOR);
        let mid_y = area.top + area.height() / 2.0;
        self.text_rotated(x + w + 40.0, mid_y, label, Anchor::Middle, 11.0, -90.0);
    }

    /// Small legend of colored swatches in the top-right margin.
    pub fn legend(&mut self, area: &PlotArea, title: &str, entries: &[(String, String)]) {
        let x = area.right + 16.0;
        let mut y = area.top + 4.0;
        self.text(x, y, title, Anchor::Start, 11.0, AXIS_COLOR);
        for (label, color) in entries {
            y += 18.0;
            self.circle(x + 5.0, y - 4.0, 5.0, color, 1.0);
            self.text(x + 14.0, y, label, Anchor::Start, 11.0, AXIS_COLOR);
        }
    }

    pub fn finish(self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w:.0}\" height=\"{h:.0}\" viewBox=\"0 0 {w:.0} {h:.0}\" role=\"img\">\n{body}</svg>\n",
            w = self.width,
            h = self.height,
            body = self.body
        )
    }
}

/// Roughly `target` evenly spaced round tick values covering `[min, max]`.
pub fn nice_ticks(min: f64, max: f64, target: usize) -> Vec<f64> {
    if !min.is_finite() || !max.is_finite() || target == 0 {
        return Vec::new();
    }
    if max <= min {
        return vec![min];
    }

    let raw_step = (max - min) / target as f64;
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let residual = raw_step / magnitude;
    let factor = if residual > 5.0 {
        10.0
    } else if residual > 2.0 {
        5.0
    } else if residual > 1.0 {
        2.0
    } else {
        1.0
    };
    let step = factor * magnitude;

    let first = (min / step).ceil();
    let last = (max / step + 1e-9).floor();
    (first as i64..=last as i64)
        .map(|i| if i == 0 { 0.0 } else { i as f64 * step })
        .collect()
}

/// Format a tick value without trailing zeros.
pub fn format_tick(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        let s = format!("{value:.3}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
