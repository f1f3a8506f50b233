//! Unit tests for CSV loading.

use crate::helpers::{date, two_day_builder, write_csv, CSV_HEADER};
use bikeboard::data::{load_dataset, resolve_data_path, DataError, MAX_CSV_SIZE_MB};
use std::path::Path;

#[test]
fn test_load_valid_csv() {
    let (_dir, path) = write_csv("all_data.csv", &two_day_builder().to_csv());
    let ds = load_dataset(&path).unwrap();

    assert_eq!(ds.len(), 5);
    assert_eq!(ds.name(), "all_data");
    assert_eq!(ds.origin(), Some(path.as_path()));

    let first = &ds.rows()[0];
    assert_eq!(first.date, date("2011-01-01"));
    assert_eq!(first.hour, 0);
    assert_eq!(first.weekday, 6);
    assert!((first.temperature - 0.24).abs() < 1e-9);
    assert!((first.humidity - 0.81).abs() < 1e-9);
    assert_eq!(first.count, 16);
}

#[test]
fn test_missing_file_is_unavailable() {
    let dir = tempfile::TempDir::new().unwrap();
    let err = load_dataset(&dir.path().join("nope.csv")).unwrap_err();
    assert!(err.is_unavailable(), "got {err:?}");
}

#[test]
fn test_directory_is_unavailable() {
    let dir = tempfile::TempDir::new().unwrap();
    assert!(load_dataset(dir.path()).unwrap_err().is_unavailable());
}

#[test]
fn test_empty_file_is_unavailable() {
    let (_dir, path) = write_csv("empty.csv", "");
    assert!(load_dataset(&path).unwrap_err().is_unavailable());
}

#[test]
fn test_missing_column_is_unavailable() {
    let csv = "dteday,hr,weekday_x,temp_x,hum_x\n2011-01-01,0,6,0.24,0.81\n";
    let (_dir, path) = write_csv("no_count.csv", csv);

    match load_dataset(&path).unwrap_err() {
        DataError::DataUnavailable { reason, .. } => assert!(reason.contains("cnt_x"), "{reason}"),
        other => panic!("expected DataUnavailable, got {other:?}"),
    }
}

#[test]
fn test_header_only_loads_empty() {
    let (_dir, path) = write_csv("header.csv", &format!("{CSV_HEADER}\n"));
    let ds = load_dataset(&path).unwrap();
    assert!(ds.is_empty());
    assert_eq!(ds.date_range(), None);
}

#[test]
fn test_extra_columns_ignored() {
    let csv = "instant,dteday,season_x,hr,weekday_x,temp_x,hum_x,casual,cnt_x\n\
               1,2011-01-01,1,0,6,0.24,0.81,3,16\n\
               2,2011-01-01,1,1,6,0.22,0.8,8,40\n";
    let (_dir, path) = write_csv("wide.csv", csv);
    let ds = load_dataset(&path).unwrap();

    assert_eq!(ds.len(), 2);
    assert_eq!(ds.rows()[1].count, 40);
    assert_eq!(ds.rows()[1].hour, 1);
}

#[test]
fn test_datetime_dates_accepted() {
    let csv = format!("{CSV_HEADER}\n2011-01-01 00:00:00,0,6,0.24,0.81,16\n");
    let (_dir, path) = write_csv("dt.csv", &csv);
    let ds = load_dataset(&path).unwrap();
    assert_eq!(ds.rows()[0].date, date("2011-01-01"));
}

#[test]
fn test_out_of_range_hour_is_invalid() {
    let csv = format!("{CSV_HEADER}\n2011-01-01,0,6,0.24,0.81,16\n2011-01-01,24,6,0.24,0.81,16\n");
    let (_dir, path) = write_csv("bad_hour.csv", &csv);

    match load_dataset(&path).unwrap_err() {
        DataError::InvalidData { row, column, .. } => {
            assert_eq!(row, 2);
            assert_eq!(column, "hr");
        }
        other => panic!("expected InvalidData, got {other:?}"),
    }
}

#[test]
fn test_unparsable_date_is_invalid() {
    let csv = format!("{CSV_HEADER}\nyesterday,0,6,0.24,0.81,16\n");
    let (_dir, path) = write_csv("bad_date.csv", &csv);
    assert!(matches!(
        load_dataset(&path).unwrap_err(),
        DataError::InvalidData { row: 1, .. }
    ));
}

#[test]
fn test_resolve_existing_relative_path_unchanged() {
    // Cargo runs tests from the package root
    let p = Path::new("Cargo.toml");
    assert_eq!(resolve_data_path(p), p.to_path_buf());
}

#[test]
fn test_resolve_missing_relative_path_unchanged() {
    let p = Path::new("no_such_dir/no_such_file.csv");
    assert_eq!(resolve_data_path(p), p.to_path_buf());
}

/// Load a one-row file and return the `(row, column, message)` of the failure.
fn invalid_single_row(row: &str) -> (usize, String, String) {
    let (_dir, path) = write_csv("bad.csv", &format!("{CSV_HEADER}\n{row}\n"));
    match load_dataset(&path).unwrap_err() {
        DataError::InvalidData {
            row,
            column,
            message,
        } => (row, column, message),
        other => panic!("expected InvalidData, got {other:?}"),
    }
}

#[test]
fn test_negative_count_is_invalid() {
    let (row, column, message) = invalid_single_row("2011-01-01,0,6,0.24,0.81,-3");
    assert_eq!((row, column.as_str()), (1, "cnt_x"));
    assert!(message.contains("outside"), "{message}");
}

#[test]
fn test_fractional_count_is_invalid() {
    let (_, column, message) = invalid_single_row("2011-01-01,0,6,0.24,0.81,16.5");
    assert_eq!(column, "cnt_x");
    assert!(message.contains("whole number"), "{message}");
}

#[test]
fn test_out_of_range_weekday_is_invalid() {
    let (_, column, message) = invalid_single_row("2011-01-01,0,7,0.24,0.81,16");
    assert_eq!(column, "weekday_x");
    assert!(message.contains("0..=6"), "{message}");
}

#[test]
fn test_missing_count_is_invalid() {
    let (_, column, message) = invalid_single_row("2011-01-01,0,6,0.24,0.81,");
    assert_eq!(column, "cnt_x");
    assert_eq!(message, "missing value");
}

#[test]
fn test_missing_date_is_invalid() {
    let (_, column, message) = invalid_single_row(",0,6,0.24,0.81,16");
    assert_eq!(column, "dteday");
    assert_eq!(message, "missing value");
}

#[test]
fn test_oversized_file_is_rejected_before_parsing() {
    let (_dir, path) = write_csv("huge.csv", "");
    // Sparse file one byte over the limit
    let limit = MAX_CSV_SIZE_MB as u64 * 1024 * 1024;
    std::fs::File::create(&path).unwrap().set_len(limit + 1).unwrap();

    match load_dataset(&path).unwrap_err() {
        DataError::TooLarge { size_mb, max_mb } => {
            assert_eq!(max_mb, MAX_CSV_SIZE_MB);
            assert_eq!(size_mb, MAX_CSV_SIZE_MB as u64 + 1);
        }
        other => panic!("expected TooLarge, got {other:?}"),
    }
}
