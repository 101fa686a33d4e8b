//! Timestamp parsing and derived calendar columns.

use crate::error::{ExplorerError, Result};
use chrono::{DateTime, Datelike, NaiveDateTime, Timelike};
use polars::prelude::*;
use tracing::debug;

pub const START_TIME: &str = "Start Time";
pub const MONTH: &str = "month";
pub const WEEKDAY: &str = "weekday";
pub const HOUR: &str = "hour";

/// Accepted `Start Time` layouts. `%.f` also matches a missing fraction.
const TIMESTAMP_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

fn datetime_ms() -> DataType {
    DataType::Datetime(TimeUnit::Milliseconds, None)
}

/// Parse one timestamp string.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

/// Whether the table defines `name`.
pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_index(name).is_some()
}

/// Replace `Start Time` with a millisecond datetime column.
///
/// String columns are parsed; datetime and date columns are only cast.
pub fn parse_start_times(df: &mut DataFrame) -> Result<()> {
    if !has_column(df, START_TIME) {
        return Err(ExplorerError::ColumnNotFound(START_TIME.to_string()));
    }
    let series = df.column(START_TIME)?.as_materialized_series().clone();

    let parsed = match series.dtype() {
        DataType::String => {
            let strings = series.str()?;
            let mut millis: Vec<Option<i64>> = Vec::with_capacity(strings.len());
            for opt_val in strings.into_iter() {
                let Some(raw) = opt_val else {
                    millis.push(None);
                    continue;
                };
                let timestamp = parse_timestamp(raw).ok_or_else(|| {
                    ExplorerError::TimestampParse {
                        column: START_TIME.to_string(),
                        value: raw.to_string(),
                    }
                })?;
                millis.push(Some(timestamp.and_utc().timestamp_millis()));
            }
            Series::new(START_TIME.into(), millis).cast(&datetime_ms())?
        }
        DataType::Datetime(_, _) | DataType::Date => series.cast(&datetime_ms())?,
        other => {
            return Err(ExplorerError::TimestampParse {
                column: START_TIME.to_string(),
                value: format!("<{}>", other),
            });
        }
    };

    df.with_column(parsed)?;
    Ok(())
}

/// `Start Time` as naive timestamps. Nulls stay `None`.
pub fn start_times(df: &DataFrame) -> Result<Vec<Option<NaiveDateTime>>> {
    let millis = df
        .column(START_TIME)?
        .as_materialized_series()
        .cast(&datetime_ms())?
        .cast(&DataType::Int64)?;

    Ok(millis
        .i64()?
        .into_iter()
        .map(|v| {
            v.and_then(DateTime::from_timestamp_millis)
                .map(|dt| dt.naive_utc())
        })
        .collect())
}

/// Add `name` computed from each start time, unless the column already exists.
///
/// Returns whether the column was added.
fn derive_field(
    df: &mut DataFrame,
    name: &str,
    extract: impl Fn(&NaiveDateTime) -> u32,
) -> Result<bool> {
    if has_column(df, name) {
        debug!("Column '{}' already present, keeping it", name);
        return Ok(false);
    }

    let values: Vec<Option<u32>> = start_times(df)?
        .iter()
        .map(|ts| ts.as_ref().map(&extract))
        .collect();
    df.with_column(Series::new(name.into(), values))?;
    Ok(true)
}

/// Parse `Start Time` and derive `month` (1-12) and `weekday` (0 = Monday).
pub fn add_calendar_fields(df: &mut DataFrame) -> Result<()> {
    parse_start_times(df)?;
    derive_field(df, MONTH, |ts| ts.month())?;
    derive_field(df, WEEKDAY, |ts| ts.weekday().num_days_from_monday())?;
    Ok(())
}

/// Derive `hour` (0-23) from `Start Time` if it is not there yet.
pub fn add_hour_field(df: &mut DataFrame) -> Result<bool> {
    derive_field(df, HOUR, |ts| ts.hour())
}
