//! Unit tests for the view projections.

use crate::helpers::{date, two_day_builder, TestDatasetBuilder};
use bikeboard::data::{daily_total, filter_by_date, hourly_weekday_average, temperature_scatter};
use bikeboard::types::Dataset;

#[test]
fn test_filter_by_date_selects_only_that_date() {
    let ds = two_day_builder().build();
    let rows = filter_by_date(&ds, date("2011-01-02"));

    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.date == date("2011-01-02")));
    // dataset order preserved
    assert_eq!(rows.iter().map(|r| r.hour).collect::<Vec<_>>(), vec![0, 1]);
}

#[test]
fn test_filter_by_absent_date_is_empty() {
    let ds = two_day_builder().build();
    assert!(filter_by_date(&ds, date("2012-12-31")).is_empty());
}

#[test]
fn test_hourly_weekday_average_means_and_gaps() {
    let ds = TestDatasetBuilder::new()
        .with_row("2011-01-03", 8, 1, 100)
        .with_row("2011-01-10", 8, 1, 200)
        .with_row("2011-01-03", 9, 1, 50)
        .build();
    let m = hourly_weekday_average(&ds);

    assert_eq!(m.get(1, 8), Some(150.0));
    assert_eq!(m.get(1, 9), Some(50.0));
    assert_eq!(m.get(2, 8), None);
    assert_eq!(m.defined_cells(), 2);
    assert_eq!(m.value_range(), Some((50.0, 150.0)));
}

#[test]
fn test_daily_totals_sum_to_dataset_total() {
    let ds = two_day_builder().build();
    let totals = daily_total(&ds);

    assert_eq!(totals.len(), 2);
    assert_eq!(totals[0].date, date("2011-01-01"));
    assert_eq!(totals[0].total, 88);
    assert_eq!(totals[1].total, 34);

    let all: u64 = ds.rows().iter().map(|r| r.count as u64).sum();
    assert_eq!(totals.iter().map(|t| t.total).sum::<u64>(), all);
}

#[test]
fn test_daily_totals_sorted_even_when_rows_are_not() {
    let ds = TestDatasetBuilder::new()
        .with_row("2011-03-01", 0, 2, 5)
        .with_row("2011-01-01", 0, 6, 7)
        .with_row("2011-03-01", 1, 2, 5)
        .build();
    let dates: Vec<_> = daily_total(&ds).iter().map(|t| t.date).collect();
    assert_eq!(dates, vec![date("2011-01-01"), date("2011-03-01")]);
}

#[test]
fn test_temperature_scatter_is_one_point_per_row() {
    let ds = two_day_builder().build();
    let points = temperature_scatter(&ds);

    assert_eq!(points.len(), ds.len());
    assert_eq!(points[3].count, 17);
    assert!((points[3].temperature - 0.46).abs() < 1e-9);
    assert!((points[3].humidity - 0.88).abs() < 1e-9);
}

#[test]
fn test_views_on_empty_dataset() {
    let ds = Dataset::default();
    assert!(daily_total(&ds).is_empty());
    assert!(temperature_scatter(&ds).is_empty());
    assert_eq!(hourly_weekday_average(&ds).defined_cells(), 0);
}

#[test]
fn test_full_days_average_per_hour() {
    // Two Saturdays a week apart
    let ds = TestDatasetBuilder::new()
        .with_day("2011-01-01", 6, &[16, 40, 32])
        .with_day("2011-01-08", 6, &[24, 10, 8])
        .build();
    let m = hourly_weekday_average(&ds);

    assert_eq!(m.get(6, 0), Some(20.0));
    assert_eq!(m.get(6, 1), Some(25.0));
    assert_eq!(m.get(6, 2), Some(20.0));
    assert_eq!(m.get(6, 3), None);
    assert_eq!(filter_by_date(&ds, date("2011-01-08")).len(), 3);
}
