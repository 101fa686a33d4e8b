//! Most popular stations and trip.

use super::frequency::{most_frequent, optional_string_column};
use super::{NO_TRIPS, timed_section};
use crate::error::Result;
use polars::prelude::DataFrame;
use std::io::Write;

pub const START_STATION: &str = "Start Station";
pub const END_STATION: &str = "End Station";

/// Busiest start station, end station and start/end pair.
#[derive(Debug, Clone, PartialEq)]
pub struct StationStats {
    pub start: Option<(String, usize)>,
    pub end: Option<(String, usize)>,
    pub trip: Option<((String, String), usize)>,
}

impl StationStats {
    pub fn compute(df: &DataFrame) -> Result<Self> {
        let starts = optional_string_column(df, START_STATION)?;
        let ends = optional_string_column(df, END_STATION)?;

        let start = most_frequent(starts.iter().flatten().cloned());
        let end = most_frequent(ends.iter().flatten().cloned());
        // a trip is only counted when both ends are known
        let trip = most_frequent(
            starts
                .into_iter()
                .zip(ends)
                .filter_map(|pair| match pair {
                    (Some(from), Some(to)) => Some((from, to)),
                    _ => None,
                }),
        );

        Ok(Self { start, end, trip })
    }
}

/// Print the most popular stations and trip.
pub fn station_stats(df: &DataFrame, out: &mut dyn Write) -> Result<()> {
    timed_section(out, "Calculating The Most Popular Stations and Trip...", |out| {
        let stats = StationStats::compute(df)?;

        match stats.start {
            Some((station, _)) => {
                writeln!(out, "'{}' is the most commonly used start station.", station)?
            }
            None => writeln!(out, "{}", NO_TRIPS)?,
        }

        if let Some((station, _)) = stats.end {
            writeln!(out, "'{}' is the most commonly used end station.", station)?;
        }

        if let Some(((from, to), _)) = stats.trip {
            writeln!(
                out,
                "'{}' to '{}' is the most frequent combination of start station and end station trip.",
                from, to
            )?;
        }
        Ok(())
    })
}
