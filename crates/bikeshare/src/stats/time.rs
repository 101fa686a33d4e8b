//! Most frequent times of travel.

use super::frequency::{most_frequent, u32_column};
use super::{NO_TRIPS, timed_section};
use crate::error::Result;
use crate::loader::{HOUR, MONTH, WEEKDAY, add_hour_field};
use crate::types::{month_from_number, month_name, title_case, weekday_from_index, weekday_name};
use chrono::{Month, Weekday};
use polars::prelude::DataFrame;
use std::io::Write;

/// Busiest month, weekday and start hour, with their trip counts.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeStats {
    pub month: Option<(Month, usize)>,
    pub weekday: Option<(Weekday, usize)>,
    pub hour: Option<(u32, usize)>,
}

impl TimeStats {
    /// Compute from a table that already has `month`, `weekday` and `hour`.
    pub fn compute(df: &DataFrame) -> Result<Self> {
        let month = most_frequent(u32_column(df, MONTH)?)
            .and_then(|(n, count)| month_from_number(n).map(|m| (m, count)));
        let weekday = most_frequent(u32_column(df, WEEKDAY)?)
            .and_then(|(n, count)| weekday_from_index(n).map(|d| (d, count)));
        let hour = most_frequent(u32_column(df, HOUR)?);

        Ok(Self {
            month,
            weekday,
            hour,
        })
    }
}

/// Print the busiest month, weekday and hour.
///
/// Adds the `hour` column to the table if it is not there yet.
pub fn time_stats(df: &mut DataFrame, out: &mut dyn Write) -> Result<()> {
    timed_section(out, "Calculating The Most Frequent Times of Travel...", |out| {
        add_hour_field(df)?;
        let stats = TimeStats::compute(df)?;

        match stats.month {
            Some((month, _)) => writeln!(
                out,
                "{} had the most bikeshares.",
                title_case(month_name(month))
            )?,
            None => writeln!(out, "{}", NO_TRIPS)?,
        }

        if let Some((day, _)) = stats.weekday {
            writeln!(out, "{}s had the most bikeshares.", title_case(weekday_name(day)))?;
        }

        if let Some((hour, _)) = stats.hour {
            writeln!(
                out,
                "The most bikeshares happened from {}:00 to {}:59.",
                hour, hour
            )?;
        }
        Ok(())
    })
}
