//! View projections over the dataset
//!
//! Each function derives one dashboard view from the immutable dataset.
//! Heavy operations (grouping, aggregation, sorting) are performed here
//! rather than in the render path.

use crate::constants::{DAYS_PER_WEEK, HOURS_PER_DAY};
use crate::types::{
    DailyTotal, Dataset, HourlyWeekdayMatrix, Observation, TemperaturePoint,
};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Rows recorded on `date`, in dataset order. An absent date yields an empty vec.
pub fn filter_by_date(dataset: &Dataset, date: NaiveDate) -> Vec<Observation> {
    dataset
        .rows()
        .iter()
        .filter(|row| row.date == date)
        .cloned()
        .collect()
}

/// Mean ride count for every (weekday, hour) cell.
///
/// Cells without observations stay `None`. Rows with an out-of-range
/// weekday or hour are skipped (the loader never produces them).
pub fn hourly_weekday_average(dataset: &Dataset) -> HourlyWeekdayMatrix {
    let mut sums = [[0u64; HOURS_PER_DAY]; DAYS_PER_WEEK];
    let mut counts = [[0u32; HOURS_PER_DAY]; DAYS_PER_WEEK];

    for row in dataset.rows() {
        let (d, h) = (row.weekday as usize, row.hour as usize);
        if d >= DAYS_PER_WEEK || h >= HOURS_PER_DAY {
            continue;
        }
        sums[d][h] += row.count as u64;
        counts[d][h] += 1;
    }

    let mut matrix = HourlyWeekdayMatrix::default();
    for d in 0..DAYS_PER_WEEK {
        for h in 0..HOURS_PER_DAY {
            if counts[d][h] > 0 {
                matrix.cells[d][h] = Some(sums[d][h] as f64 / counts[d][h] as f64);
            }
        }
    }
    matrix
}

/// Ride counts summed per date, ascending by date.
pub fn daily_total(dataset: &Dataset) -> Vec<DailyTotal> {
    let mut totals: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for row in dataset.rows() {
        *totals.entry(row.date).or_default() += row.count as u64;
    }
    totals
        .into_iter()
        .map(|(date, total)| DailyTotal { date, total })
        .collect()
}

/// Pass-through projection of (temperature, count, humidity) in dataset order.
pub fn temperature_scatter(dataset: &Dataset) -> Vec<TemperaturePoint> {
    dataset
        .rows()
        .iter()
        .map(|row| TemperaturePoint {
            temperature: row.temperature,
            count: row.count,
            humidity: row.humidity,
        })
        .collect()
}
