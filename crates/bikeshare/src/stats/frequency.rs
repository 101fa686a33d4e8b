//! Group-and-count helpers shared by the reporters.
//!
//! Keys are grouped in sorted order, so "first encountered" for tie
//! breaking means the smallest key.

use crate::error::Result;
use polars::prelude::*;
use std::collections::BTreeMap;

/// Number of occurrences of each key, ascending by key.
pub fn count_by_key<K, I>(keys: I) -> BTreeMap<K, usize>
where
    K: Ord,
    I: IntoIterator<Item = K>,
{
    let mut counts = BTreeMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

/// The key with the most occurrences and its count.
///
/// Ties go to the smallest key. `None` when there are no keys.
pub fn most_frequent<K, I>(keys: I) -> Option<(K, usize)>
where
    K: Ord,
    I: IntoIterator<Item = K>,
{
    let mut best: Option<(K, usize)> = None;
    for (key, count) in count_by_key(keys) {
        if best.as_ref().is_none_or(|(_, best_count)| count > *best_count) {
            best = Some((key, count));
        }
    }
    best
}

/// All keys with their counts, most frequent first; ties by ascending key.
pub fn value_counts<K, I>(keys: I) -> Vec<(K, usize)>
where
    K: Ord,
    I: IntoIterator<Item = K>,
{
    let mut counts: Vec<(K, usize)> = count_by_key(keys).into_iter().collect();
    // stable sort keeps ascending key order within equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Non-null values of a column read as text.
pub fn string_column(df: &DataFrame, column: &str) -> Result<Vec<String>> {
    let series = df
        .column(column)?
        .as_materialized_series()
        .cast(&DataType::String)?;
    Ok(series
        .str()?
        .into_iter()
        .flatten()
        .map(str::to_string)
        .collect())
}

/// Values of a column read as text, nulls kept in place.
pub fn optional_string_column(df: &DataFrame, column: &str) -> Result<Vec<Option<String>>> {
    let series = df
        .column(column)?
        .as_materialized_series()
        .cast(&DataType::String)?;
    Ok(series
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect())
}

/// Non-null values of a derived calendar column.
pub fn u32_column(df: &DataFrame, column: &str) -> Result<Vec<u32>> {
    let series = df
        .column(column)?
        .as_materialized_series()
        .cast(&DataType::UInt32)?;
    Ok(series.u32()?.into_iter().flatten().collect())
}

/// Non-null, non-NaN values of a numeric column as `f64`.
pub fn f64_column(df: &DataFrame, column: &str) -> Result<Vec<f64>> {
    let series = df
        .column(column)?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    Ok(series
        .f64()?
        .into_iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .collect())
}
