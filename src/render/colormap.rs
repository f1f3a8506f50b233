//! Color maps for the charts.
//!
//! Each map is a short list of evenly spaced anchor colors; values in
//! between are linearly interpolated.

use std::fmt;

/// An sRGB color
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Relative luminance in 0..1 (ITU-R BT.709 weights, no gamma)
    pub fn luminance(&self) -> f64 {
        (0.2126 * self.0 as f64 + 0.7152 * self.1 as f64 + 0.0722 * self.2 as f64) / 255.0
    }

    /// Whether light text reads better on top of this color
    pub fn is_dark(&self) -> bool {
        self.luminance() < 0.5
    }

    fn lerp(a: Rgb, b: Rgb, t: f64) -> Rgb {
        let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * t).round() as u8;
        Rgb(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

const YL_GN_BU: [Rgb; 9] = [
    Rgb(0xff, 0xff, 0xd9),
    Rgb(0xed, 0xf8, 0xb1),
    Rgb(0xc7, 0xe9, 0xb4),
    Rgb(0x7f, 0xcd, 0xbb),
    Rgb(0x41, 0xb6, 0xc4),
    Rgb(0x1d, 0x91, 0xc0),
    Rgb(0x22, 0x5e, 0xa8),
    Rgb(0x25, 0x34, 0x94),
    Rgb(0x08, 0x1d, 0x58),
];

const COOL_WARM: [Rgb; 5] = [
    Rgb(59, 76, 192),
    Rgb(124, 159, 249),
    Rgb(221, 221, 221),
    Rgb(244, 154, 123),
    Rgb(180, 4, 38),
];

const VIRIDIS: [Rgb; 5] = [
    Rgb(0x44, 0x01, 0x54),
    Rgb(0x3b, 0x52, 0x8b),
    Rgb(0x21, 0x91, 0x8c),
    Rgb(0x5e, 0xc9, 0x62),
    Rgb(0xfd, 0xe7, 0x25),
];

/// Available color maps
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorMap {
    /// Sequential yellow-green-blue (heatmap)
    YlGnBu,
    /// Diverging blue-red (humidity)
    CoolWarm,
    /// Perceptually uniform purple-yellow (cluster ids)
    Viridis,
}

impl ColorMap {
    fn anchors(&self) -> &'static [Rgb] {
        match self {
            ColorMap::YlGnBu => &YL_GN_BU,
            ColorMap::CoolWarm => &COOL_WARM,
            ColorMap::Viridis => &VIRIDIS,
        }
    }

    /// Color at position `t` in 0..1 (clamped; NaN maps to the low end).
    pub fn sample(&self, t: f64) -> Rgb {
        let anchors = self.anchors();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let scaled = t * (anchors.len() - 1) as f64;
        let idx = (scaled.floor() as usize).min(anchors.len() - 2);
        Rgb::lerp(anchors[idx], anchors[idx + 1], scaled - idx as f64)
    }

    /// Color for `value` normalized into `[min, max]`.
    pub fn sample_range(&self, value: f64, min: f64, max: f64) -> Rgb {
        if max > min {
            self.sample((value - min) / (max - min))
        } else {
            self.sample(0.5)
        }
    }
}

/// Distinct color for category `index` out of `total`, spread over viridis.
pub fn category_color(index: usize, total: usize) -> Rgb {
    if total <= 1 {
        return ColorMap::Viridis.sample(0.0);
    }
    ColorMap::Viridis.sample(index as f64 / (total - 1) as f64)
}
