//! Total and average trip duration.

use super::frequency::f64_column;
use super::{NO_TRIPS, timed_section};
use crate::error::Result;
use polars::prelude::DataFrame;
use std::io::Write;

pub const TRIP_DURATION: &str = "Trip Duration";

/// Split a number of seconds into whole hours, minutes and seconds.
///
/// The fractional part is dropped; negative or non-finite input counts as
/// zero.
pub fn convert_seconds(total_seconds: f64) -> (u64, u64, u64) {
    if !total_seconds.is_finite() || total_seconds <= 0.0 {
        return (0, 0, 0);
    }
    let whole = total_seconds.floor() as u64;
    let hours = whole / 3600;
    let minutes = (whole % 3600) / 60;
    let seconds = (whole % 3600) % 60;
    (hours, minutes, seconds)
}

/// `"H hour(s) M minute(s) S second(s)"` for a number of seconds.
pub fn format_duration(total_seconds: f64) -> String {
    let (h, m, s) = convert_seconds(total_seconds);
    format!("{} hour(s) {} minute(s) {} second(s)", h, m, s)
}

/// Sum and mean of the trip durations, in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct DurationStats {
    pub trips: usize,
    pub total: f64,
    pub mean: Option<f64>,
}

impl DurationStats {
    pub fn compute(df: &DataFrame) -> Result<Self> {
        let durations = f64_column(df, TRIP_DURATION)?;
        let total: f64 = durations.iter().sum();
        let mean = (!durations.is_empty()).then(|| total / durations.len() as f64);

        Ok(Self {
            trips: durations.len(),
            total,
            mean,
        })
    }
}

/// Print the total and mean travel time.
pub fn duration_stats(df: &DataFrame, out: &mut dyn Write) -> Result<()> {
    timed_section(out, "Calculating Trip Duration...", |out| {
        let stats = DurationStats::compute(df)?;

        match stats.mean {
            Some(mean) => {
                writeln!(
                    out,
                    "A total travel time of {} was recorded.",
                    format_duration(stats.total)
                )?;
                writeln!(
                    out,
                    "Each trip had an average travel time of {}.",
                    format_duration(mean)
                )?;
            }
            None => writeln!(out, "{}", NO_TRIPS)?,
        }
        Ok(())
    })
}
