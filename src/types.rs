//! Core types for the bike-sharing dashboard.
//!
//! This module defines the loaded dataset and the value types of the five
//! derived views. Every view is a plain owned value so it can be rendered
//! or serialized without borrowing the dataset.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{DAYS_PER_WEEK, HOURS_PER_DAY};

// ============================================================================
// Dataset Types
// ============================================================================

/// One hourly bike-rental bucket with its weather readings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Calendar date of the bucket
    pub date: NaiveDate,
    /// Hour of day, 0-23
    pub hour: u8,
    /// Day of week, 0 = Sunday .. 6 = Saturday
    pub weekday: u8,
    /// Normalized temperature
    pub temperature: f64,
    /// Normalized humidity
    pub humidity: f64,
    /// Number of rides in the bucket
    pub count: u32,
}

/// The loaded dataset. Immutable once built; views borrow it.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    /// Human-readable name (from the file stem)
    name: String,
    /// File the rows were read from, if any
    origin: Option<PathBuf>,
    /// Rows in source order
    rows: Vec<Observation>,
}

impl Dataset {
    /// Build a dataset from rows already in memory.
    pub fn new(name: impl Into<String>, rows: Vec<Observation>) -> Self {
        Self {
            name: name.into(),
            origin: None,
            rows,
        }
    }

    /// Attach the file the rows came from.
    pub fn with_origin(mut self, path: PathBuf) -> Self {
        self.origin = Some(path);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn origin(&self) -> Option<&Path> {
        self.origin.as_deref()
    }

    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Earliest and latest date present, or `None` for an empty dataset.
    pub fn date_range(&self) -> Option<DateRange> {
        let first = self.rows.first()?.date;
        let (start, end) = self
            .rows
            .iter()
            .fold((first, first), |(lo, hi), row| (lo.min(row.date), hi.max(row.date)));
        Some(DateRange { start, end })
    }

    /// The date the picker starts on.
    pub fn earliest_date(&self) -> Option<NaiveDate> {
        self.date_range().map(|r| r.start)
    }
}

/// Inclusive range of dates covered by a dataset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

// ============================================================================
// View Types
// ============================================================================

/// Mean ride count per (weekday, hour). `None` where no rows fell in the cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HourlyWeekdayMatrix {
    /// Indexed as `cells[weekday][hour]`
    pub cells: [[Option<f64>; HOURS_PER_DAY]; DAYS_PER_WEEK],
}

impl Default for HourlyWeekdayMatrix {
    fn default() -> Self {
        Self {
            cells: [[None; HOURS_PER_DAY]; DAYS_PER_WEEK],
        }
    }
}

impl HourlyWeekdayMatrix {
    /// Mean for a cell; `None` for out-of-range indices or empty cells.
    pub fn get(&self, weekday: usize, hour: usize) -> Option<f64> {
        self.cells.get(weekday)?.get(hour).copied().flatten()
    }

    /// Smallest and largest defined mean, for color scaling.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.cells
            .iter()
            .flatten()
            .flatten()
            .fold(None, |acc, &v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
            })
    }

    /// Number of cells with at least one observation.
    pub fn defined_cells(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }
}

/// Total rides for one date.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total: u64,
}

/// One point of the temperature scatter.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TemperaturePoint {
    pub temperature: f64,
    pub count: u32,
    pub humidity: f64,
}

/// One row of the clustering view with its assigned label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterPoint {
    pub hour: u8,
    pub weekday: u8,
    pub cluster: usize,
}

/// Clustering result over (hour, weekday).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterView {
    /// One entry per dataset row, in dataset order
    pub points: Vec<ClusterPoint>,
    /// Final centroids as (hour, weekday)
    pub centroids: Vec<(f64, f64)>,
    /// Sum of squared distances to the assigned centroid
    pub inertia: f64,
    /// Lloyd iterations performed
    pub iterations: usize,
}

impl ClusterView {
    /// Number of distinct labels used.
    pub fn label_count(&self) -> usize {
        let mut seen: Vec<usize> = self.points.iter().map(|p| p.cluster).collect();
        seen.sort_unstable();
        seen.dedup();
        seen.len()
    }
}

/// Weekday labels, indexed by the dataset's weekday convention.
pub const WEEKDAY_LABELS: [&str; DAYS_PER_WEEK] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Label for a weekday index, or `"?"` when out of range.
pub fn weekday_label(weekday: usize) -> &'static str {
    WEEKDAY_LABELS.get(weekday).copied().unwrap_or("?")
}
