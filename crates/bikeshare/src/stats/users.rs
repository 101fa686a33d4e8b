//! User demographics.
//!
//! `Gender` and `Birth Year` are not recorded for every city, so both are
//! looked up with an explicit presence check first.

use super::frequency::{f64_column, most_frequent, string_column, value_counts};
use super::timed_section;
use crate::error::Result;
use crate::loader::has_column;
use polars::prelude::DataFrame;
use std::io::Write;

pub const USER_TYPE: &str = "User Type";
pub const GENDER: &str = "Gender";
pub const BIRTH_YEAR: &str = "Birth Year";

const GENDER_UNAVAILABLE: &str = "Gender data unavailable for the selected filters.";
const BIRTH_YEAR_UNAVAILABLE: &str = "Birth year data unavailable for the selected filters.";

/// Earliest, latest and most common birth year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthYears {
    pub earliest: i64,
    pub latest: i64,
    pub most_common: i64,
}

/// Counts per user type, plus gender and birth year details when known.
#[derive(Debug, Clone, PartialEq)]
pub struct UserStats {
    pub user_types: Vec<(String, usize)>,
    pub genders: Option<Vec<(String, usize)>>,
    pub birth_years: Option<BirthYears>,
}

impl UserStats {
    pub fn compute(df: &DataFrame) -> Result<Self> {
        let user_types = value_counts(string_column(df, USER_TYPE)?);

        let genders = if has_column(df, GENDER) {
            let counts = value_counts(string_column(df, GENDER)?);
            (!counts.is_empty()).then_some(counts)
        } else {
            None
        };

        let birth_years = if has_column(df, BIRTH_YEAR) {
            let years: Vec<i64> = f64_column(df, BIRTH_YEAR)?
                .into_iter()
                .map(|year| year as i64)
                .collect();
            summarize_birth_years(&years)
        } else {
            None
        };

        Ok(Self {
            user_types,
            genders,
            birth_years,
        })
    }
}

fn summarize_birth_years(years: &[i64]) -> Option<BirthYears> {
    let earliest = *years.iter().min()?;
    let latest = *years.iter().max()?;
    let (most_common, _) = most_frequent(years.iter().copied())?;
    Some(BirthYears {
        earliest,
        latest,
        most_common,
    })
}

/// Print user type counts, gender counts and birth year statistics.
pub fn user_stats(df: &DataFrame, out: &mut dyn Write) -> Result<()> {
    timed_section(out, "Calculating User Stats...", |out| {
        let stats = UserStats::compute(df)?;

        writeln!(
            out,
            "There are {} types of users in the database:",
            stats.user_types.len()
        )?;
        for (user_type, count) in &stats.user_types {
            writeln!(out, "{} {}(s).", count, user_type.to_lowercase())?;
        }

        writeln!(out, "\nGender:")?;
        match &stats.genders {
            Some(genders) => {
                for (gender, count) in genders {
                    writeln!(out, "{} users were {}.", count, gender.to_lowercase())?;
                }
            }
            None => writeln!(out, "{}", GENDER_UNAVAILABLE)?,
        }

        writeln!(out, "\nAge:")?;
        match stats.birth_years {
            Some(years) => {
                writeln!(out, "Oldest user was born in {}.", years.earliest)?;
                writeln!(out, "Youngest user was born in {}.", years.latest)?;
                writeln!(out, "Most common year of birth was {}.", years.most_common)?;
            }
            None => writeln!(out, "{}", BIRTH_YEAR_UNAVAILABLE)?,
        }
        Ok(())
    })
}
