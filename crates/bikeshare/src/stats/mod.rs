//! Statistics reporters.
//!
//! Each reporter computes a small stats struct from the working table and
//! prints it, followed by how long the whole section took. Reporters never
//! hand data back to the caller and never fail because an optional column
//! is missing.

mod duration;
pub mod frequency;
mod station;
mod time;
mod users;

pub use duration::{DurationStats, convert_seconds, duration_stats, format_duration};
pub use station::{StationStats, station_stats};
pub use time::{TimeStats, time_stats};
pub use users::{BirthYears, UserStats, user_stats};

use crate::error::Result;
use polars::prelude::DataFrame;
use std::io::Write;
use std::time::Instant;
use tracing::debug;

/// Printed in place of a statistic when the filters left no usable rows.
pub const NO_TRIPS: &str = "No trips matched the selected filters.";

/// Run all four reporters in order.
pub fn report_all(df: &mut DataFrame, out: &mut dyn Write) -> Result<()> {
    time_stats(df, out)?;
    station_stats(df, out)?;
    duration_stats(df, out)?;
    user_stats(df, out)?;
    Ok(())
}

/// Print `heading`, run `body`, then print the elapsed time and a rule.
pub(crate) fn timed_section<F>(out: &mut dyn Write, heading: &str, body: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    writeln!(out, "\n{}\n", heading)?;
    let start = Instant::now();

    body(out)?;

    let elapsed = start.elapsed();
    debug!("{} finished in {:?}", heading, elapsed);
    writeln!(out, "\nThis took {} seconds.", elapsed.as_secs_f64())?;
    writeln!(out, "{}", "-".repeat(40))?;
    Ok(())
}
