//! One render pass worth of views.
//!
//! [`build_report`] runs all five projections for a selected date. Nothing
//! is cached between calls; every page request builds a fresh report.

use crate::data::error::DataResult;
use crate::data::kmeans::{cluster, KMeansConfig};
use crate::data::views::{daily_total, filter_by_date, hourly_weekday_average, temperature_scatter};
use crate::perf::ScopedTimer;
use crate::types::{
    ClusterView, DailyTotal, Dataset, DateRange, HourlyWeekdayMatrix, Observation,
    TemperaturePoint,
};
use chrono::NaiveDate;
use serde::Serialize;

/// Per-view timing threshold before a stage is reported as slow
const STAGE_WARN_MS: f64 = 100.0;

/// All views for one selected date.
#[derive(Clone, Debug, Serialize)]
pub struct Report {
    /// Date whose rows populate the table
    pub selected_date: NaiveDate,
    /// Bounds for the date picker; `None` for an empty dataset
    pub date_range: Option<DateRange>,
    /// Total rows in the dataset
    pub total_rows: usize,
    pub filtered: Vec<Observation>,
    pub heatmap: HourlyWeekdayMatrix,
    pub daily_totals: Vec<DailyTotal>,
    pub temperature: Vec<TemperaturePoint>,
    pub clusters: ClusterView,
}

/// Compute every view for `date`.
pub fn build_report(
    dataset: &Dataset,
    date: NaiveDate,
    clustering: &KMeansConfig,
) -> DataResult<Report> {
    let filtered = {
        let _t = ScopedTimer::new("filter_by_date", STAGE_WARN_MS);
        filter_by_date(dataset, date)
    };
    let heatmap = {
        let _t = ScopedTimer::new("hourly_weekday_average", STAGE_WARN_MS);
        hourly_weekday_average(dataset)
    };
    let daily_totals = {
        let _t = ScopedTimer::new("daily_total", STAGE_WARN_MS);
        daily_total(dataset)
    };
    let temperature = {
        let _t = ScopedTimer::new("temperature_scatter", STAGE_WARN_MS);
        temperature_scatter(dataset)
    };
    let clusters = {
        let _t = ScopedTimer::new("cluster", STAGE_WARN_MS);
        cluster(dataset, clustering)?
    };

    Ok(Report {
        selected_date: date,
        date_range: dataset.date_range(),
        total_rows: dataset.len(),
        filtered,
        heatmap,
        daily_totals,
        temperature,
        clusters,
    })
}

/// The date a fresh page opens on: the earliest in the dataset, or today's
/// date for an empty dataset.
pub fn default_date(dataset: &Dataset) -> NaiveDate {
    dataset
        .earliest_date()
        .unwrap_or_else(|| chrono::Local::now().date_naive())
}
