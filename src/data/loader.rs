//! CSV loading with the polars reader.
//!
//! The file is read in one pass with [`LazyCsvReader`], the required columns
//! are checked, and each row is converted into a typed [`Observation`].
//!
//! ## Limits
//!
//! Files larger than [`MAX_CSV_SIZE_MB`] are rejected with [`DataError::TooLarge`]
//! before anything is parsed.

use crate::constants::{
    COL_COUNT, COL_DATE, COL_HOUR, COL_HUMIDITY, COL_TEMP, COL_WEEKDAY, DAYS_PER_WEEK,
    HOURS_PER_DAY, MAX_CSV_SIZE_MB, REQUIRED_COLUMNS, SCHEMA_INFER_ROWS,
};
use crate::data::error::{DataError, DataResult};
use crate::types::{Dataset, Observation};
use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;
use std::path::{Path, PathBuf};

/// Date formats accepted in the `dteday` column and in date queries
const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const BYTES_PER_MB: u64 = 1024 * 1024;
const MAX_CSV_SIZE_BYTES: u64 = MAX_CSV_SIZE_MB as u64 * BYTES_PER_MB;

/// Load the dataset from a CSV file.
///
/// Fails with [`DataError::DataUnavailable`] when the file does not exist or
/// a required column is missing. A header-only file loads as an empty dataset.
pub fn load_dataset(path: &Path) -> DataResult<Dataset> {
    let start = std::time::Instant::now();

    let metadata = match std::fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(unavailable(path, "file not found"));
        }
        Err(e) => return Err(e.into()),
    };
    if metadata.is_dir() {
        return Err(unavailable(path, "path is a directory"));
    }
    if metadata.len() == 0 {
        return Err(unavailable(path, "file is empty"));
    }

    if metadata.len() > MAX_CSV_SIZE_BYTES {
        return Err(DataError::TooLarge {
            size_mb: metadata.len().div_ceil(BYTES_PER_MB),
            max_mb: MAX_CSV_SIZE_MB,
        });
    }

    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_separator(b',')
        .with_infer_schema_length(Some(SCHEMA_INFER_ROWS))
        .finish()?
        .collect()?;

    for name in REQUIRED_COLUMNS {
        if df.column(name).is_err() {
            return Err(unavailable(path, &format!("missing required column `{name}`")));
        }
    }

    let rows = observations_from_frame(&df)?;
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Data")
        .to_string();

    tracing::debug!(
        "Loaded CSV {} with {} rows in {:?}",
        path.display(),
        rows.len(),
        start.elapsed()
    );

    Ok(Dataset::new(name, rows).with_origin(path.to_path_buf()))
}

/// Pick the file to load for a configured dataset path.
///
/// A relative path that does not exist under the working directory is
/// retried next to the running executable. If neither exists the configured
/// path is returned unchanged so the load reports it.
pub fn resolve_data_path(configured: &Path) -> PathBuf {
    if configured.is_absolute() || configured.exists() {
        return configured.to_path_buf();
    }

    let beside_exe = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(configured)));

    match beside_exe {
        Some(candidate) if candidate.exists() => {
            tracing::debug!(
                "Dataset {} not in working directory, using {}",
                configured.display(),
                candidate.display()
            );
            candidate
        }
        _ => configured.to_path_buf(),
    }
}

/// Parse a calendar date as written in the dataset (`YYYY-MM-DD`, optionally
/// followed by a midnight time component).
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, DATETIME_FORMAT)
                .ok()
                .map(|dt| dt.date())
        })
}

fn unavailable(path: &Path, reason: &str) -> DataError {
    DataError::DataUnavailable {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

/// Convert every frame row into an observation, validating ranges.
fn observations_from_frame(df: &DataFrame) -> DataResult<Vec<Observation>> {
    let date_col = df.column(COL_DATE)?;
    let hour_col = df.column(COL_HOUR)?;
    let weekday_col = df.column(COL_WEEKDAY)?;
    let temp_col = df.column(COL_TEMP)?;
    let hum_col = df.column(COL_HUMIDITY)?;
    let count_col = df.column(COL_COUNT)?;

    let mut rows = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let row = idx + 1;

        let date_text = text_value(date_col.get(idx)?)
            .ok_or_else(|| DataError::invalid(row, COL_DATE, "missing value"))?;
        let date = parse_date(&date_text).ok_or_else(|| {
            DataError::invalid(row, COL_DATE, format!("unparsable date `{date_text}`"))
        })?;

        let hour = integer_value(hour_col, idx, row, COL_HOUR, (HOURS_PER_DAY - 1) as u64)?;
        let weekday =
            integer_value(weekday_col, idx, row, COL_WEEKDAY, (DAYS_PER_WEEK - 1) as u64)?;
        let count = integer_value(count_col, idx, row, COL_COUNT, u32::MAX as u64)?;
        let temperature = float_value(temp_col, idx, row, COL_TEMP)?;
        let humidity = float_value(hum_col, idx, row, COL_HUMIDITY)?;

        rows.push(Observation {
            date,
            hour: hour as u8,
            weekday: weekday as u8,
            temperature,
            humidity,
            count: count as u32,
        });
    }

    Ok(rows)
}

fn float_value(column: &Column, idx: usize, row: usize, name: &str) -> DataResult<f64> {
    let value = column.get(idx)?;
    match numeric_value(&value) {
        Some(v) if v.is_finite() => Ok(v),
        Some(v) => Err(DataError::invalid(row, name, format!("non-finite value {v}"))),
        None => Err(DataError::invalid(row, name, describe_missing(&value))),
    }
}

/// Read a whole number in `0..=max`.
fn integer_value(
    column: &Column,
    idx: usize,
    row: usize,
    name: &str,
    max: u64,
) -> DataResult<u64> {
    let v = float_value(column, idx, row, name)?;
    if v.fract() != 0.0 {
        return Err(DataError::invalid(row, name, format!("expected a whole number, got {v}")));
    }
    if v < 0.0 || v > max as f64 {
        return Err(DataError::invalid(row, name, format!("{v} outside 0..={max}")));
    }
    Ok(v as u64)
}

fn describe_missing(value: &AnyValue) -> String {
    match value {
        AnyValue::Null => "missing value".to_string(),
        other => format!("not a number: {other}"),
    }
}

/// Convert a polars cell to f64 where it holds a number (or numeric text)
fn numeric_value(value: &AnyValue) -> Option<f64> {
    match value {
        AnyValue::Int8(v) => Some(*v as f64),
        AnyValue::Int16(v) => Some(*v as f64),
        AnyValue::Int32(v) => Some(*v as f64),
        AnyValue::Int64(v) => Some(*v as f64),
        AnyValue::UInt8(v) => Some(*v as f64),
        AnyValue::UInt16(v) => Some(*v as f64),
        AnyValue::UInt32(v) => Some(*v as f64),
        AnyValue::UInt64(v) => Some(*v as f64),
        AnyValue::Float32(v) => Some(*v as f64),
        AnyValue::Float64(v) => Some(*v),
        AnyValue::String(s) => s.trim().parse().ok(),
        AnyValue::StringOwned(s) => {
            let s_str: &str = s;
            s_str.trim().parse().ok()
        }
        _ => None,
    }
}

/// Convert a polars cell to text, `None` for nulls
fn text_value(value: AnyValue) -> Option<String> {
    match value {
        AnyValue::Null => None,
        AnyValue::String(s) => Some(s.to_string()),
        AnyValue::StringOwned(s) => {
            let s_str: &str = &s;
            Some(s_str.to_string())
        }
        other => Some(format!("{}", other)),
    }
}
