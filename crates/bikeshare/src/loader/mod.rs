//! Dataset loading: reading a city's trip file and applying the filters.

mod calendar;

pub use calendar::{
    HOUR, MONTH, START_TIME, WEEKDAY, add_calendar_fields, add_hour_field, has_column,
    parse_start_times, parse_timestamp, start_times,
};

use crate::config::{CityTable, ExplorerConfig};
use crate::console::Console;
use crate::error::{ExplorerError, Result, ResultExt};
use crate::filters::FilterResolver;
use crate::types::{City, FilterSpec, Selection, month_from_number, month_name, title_case};
use chrono::Month;
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, info};

/// Columns every trip file must have.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "Start Time",
    "End Time",
    "Trip Duration",
    "Start Station",
    "End Station",
    "User Type",
];

/// Row position in the source file, kept through filtering so raw rows can
/// be shown with their original labels.
pub const ROW_NUMBER: &str = "row_number";

const MONTH_REPROMPT: &str = "Enter the month to be analyzed. \n\
                              Input 'all' if you would like to analyze the complete data: ";

/// Reads trip files and narrows them to the requested month and day.
#[derive(Debug, Clone)]
pub struct DatasetLoader {
    city_table: CityTable,
    resolver: FilterResolver,
}

impl DatasetLoader {
    pub fn new(config: &ExplorerConfig) -> Self {
        Self {
            city_table: config.city_table.clone(),
            resolver: FilterResolver::new(config),
        }
    }

    /// Read a city's file, label each row with its file position and add
    /// the derived calendar columns.
    pub fn read_city(&self, city: City) -> Result<DataFrame> {
        let path = self
            .city_table
            .path(city)
            .ok_or_else(|| ExplorerError::UnknownCity(city.to_string()))?;

        let mut df = read_trips(path)?.with_row_index(ROW_NUMBER.into(), None)?;
        add_calendar_fields(&mut df)
            .context(format!("Failed to prepare {}", path.display()))?;
        Ok(df)
    }

    /// Load the working table for `spec`.
    ///
    /// If the requested month has no trips, the months that do are listed
    /// and the user is asked again, until a present month or "all" is chosen.
    pub fn load(&self, spec: &FilterSpec, console: &mut dyn Console) -> Result<DataFrame> {
        let mut df = self.read_city(spec.city)?;
        let total_rows = df.height();

        let mut month = spec.month;
        while let Selection::Only(requested) = month {
            let available = available_months(&df)?;
            if available.contains(&requested) {
                df = filter_equal(&df, MONTH, requested.number_from_month())?;
                break;
            }

            debug!("No trips in {} for {}", spec.city, requested.name());
            console.say("\nData unavailable for the entered month")?;
            console.say("These are the months available in the data:")?;
            for present in &available {
                console.say(&title_case(month_name(*present)))?;
            }
            month = self.resolver.resolve_month(console, MONTH_REPROMPT)?;
        }

        if let Selection::Only(day) = spec.day {
            df = filter_equal(&df, WEEKDAY, day.num_days_from_monday())?;
        }

        info!(
            "Loaded {} of {} trips for {}",
            df.height(),
            total_rows,
            spec.city
        );
        Ok(df)
    }
}

/// Read one trip CSV and check the required columns are there.
pub fn read_trips(path: &Path) -> Result<DataFrame> {
    info!("Loading trips from: {}", path.display());

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(10_000))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .context(format!("Failed to read {}", path.display()))?;

    for column in REQUIRED_COLUMNS {
        if !has_column(&df, column) {
            return Err(ExplorerError::ColumnNotFound(column.to_string())
                .with_context(format!("Invalid trip file {}", path.display())));
        }
    }

    debug!("Read {:?} from {}", df.shape(), path.display());
    Ok(df)
}

/// Distinct months present in the `month` column, in calendar order.
pub fn available_months(df: &DataFrame) -> Result<Vec<Month>> {
    let numbers = distinct_values(df, MONTH)?;
    Ok(numbers.into_iter().filter_map(month_from_number).collect())
}

/// Distinct non-null values of a derived `u32` column, ascending.
fn distinct_values(df: &DataFrame, column: &str) -> Result<BTreeSet<u32>> {
    let values = df
        .column(column)?
        .as_materialized_series()
        .cast(&DataType::UInt32)?;
    Ok(values.u32()?.into_iter().flatten().collect())
}

/// Rows whose `column` equals `value`, in their original order.
pub fn filter_equal(df: &DataFrame, column: &str, value: u32) -> Result<DataFrame> {
    let values = df
        .column(column)?
        .as_materialized_series()
        .cast(&DataType::UInt32)?;
    let mask: BooleanChunked = values
        .u32()?
        .into_iter()
        .map(|v| v == Some(value))
        .collect();
    Ok(df.filter(&mask)?)
}
