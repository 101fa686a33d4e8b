//! Integration tests for loading, reporting and the interactive session.
//!
//! These run against the small trip files in `tests/fixtures`, which only
//! contain trips from the first half of 2017.

use bikeshare::browser::render_page;
use bikeshare::loader::{HOUR, MONTH, ROW_NUMBER, WEEKDAY, available_months, has_column, read_trips};
use bikeshare::stats::{duration_stats, station_stats, time_stats, user_stats};
use bikeshare::{
    City, CityTable, DatasetLoader, Explorer, ExplorerConfig, FilterSpec, ScriptedConsole,
    Selection, report_all,
};
use chrono::{Month, Weekday};
use polars::prelude::*;
use pretty_assertions::assert_eq;
use std::path::PathBuf;

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn fixture_config() -> ExplorerConfig {
    ExplorerConfig::builder()
        .data_dir(fixtures_path())
        .build()
        .expect("fixture config should be valid")
}

fn loader() -> DatasetLoader {
    DatasetLoader::new(&fixture_config())
}

fn report_text(df: &mut DataFrame) -> String {
    let mut out = Vec::new();
    report_all(df, &mut out).expect("report should succeed");
    String::from_utf8(out).expect("report should be UTF-8")
}

fn u32_values(df: &DataFrame, column: &str) -> Vec<Option<u32>> {
    df.column(column)
        .unwrap()
        .as_materialized_series()
        .cast(&DataType::UInt32)
        .unwrap()
        .u32()
        .unwrap()
        .into_iter()
        .collect()
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_unfiltered_load_keeps_every_row() {
    let mut console = ScriptedConsole::new(Vec::<String>::new());
    let df = loader()
        .load(&FilterSpec::unfiltered(City::Chicago), &mut console)
        .unwrap();

    assert_eq!(df.height(), 6);
    assert!(has_column(&df, MONTH));
    assert!(has_column(&df, WEEKDAY));
    assert!(!has_column(&df, HOUR));
    assert_eq!(
        u32_values(&df, MONTH),
        vec![Some(1), Some(1), Some(3), Some(6), Some(6), Some(6)]
    );
    assert_eq!(console.transcript(), "");
}

#[test]
fn test_month_and_day_filters_combine() {
    let spec = FilterSpec {
        city: City::Chicago,
        month: Selection::Only(Month::June),
        day: Selection::Only(Weekday::Mon),
    };
    let mut console = ScriptedConsole::new(Vec::<String>::new());
    let df = loader().load(&spec, &mut console).unwrap();

    assert_eq!(df.height(), 2);
    assert_eq!(u32_values(&df, WEEKDAY), vec![Some(0), Some(0)]);
    assert_eq!(u32_values(&df, MONTH), vec![Some(6), Some(6)]);
}

#[test]
fn test_filtered_rows_keep_their_file_row_numbers() {
    let spec = FilterSpec {
        city: City::Chicago,
        month: Selection::Only(Month::June),
        day: Selection::Only(Weekday::Mon),
    };
    let mut console = ScriptedConsole::new(Vec::<String>::new());
    let df = loader().load(&spec, &mut console).unwrap();

    assert_eq!(u32_values(&df, ROW_NUMBER), vec![Some(3), Some(5)]);

    let text = render_page(&df, 0).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("3  "));
    assert!(lines[2].starts_with("5  "));
    assert!(!lines[0].contains(ROW_NUMBER));
}

#[test]
fn test_day_without_trips_yields_empty_table() {
    let spec = FilterSpec {
        city: City::Washington,
        month: Selection::All,
        day: Selection::Only(Weekday::Sun),
    };
    let mut console = ScriptedConsole::new(Vec::<String>::new());
    let mut df = loader().load(&spec, &mut console).unwrap();

    assert_eq!(df.height(), 0);
    let text = report_text(&mut df);
    assert!(text.contains("No trips matched the selected filters."));
}

#[test]
fn test_absent_month_lists_present_months_and_reprompts() {
    let spec = FilterSpec {
        city: City::Chicago,
        month: Selection::Only(Month::December),
        day: Selection::All,
    };
    let mut console = ScriptedConsole::new(["march"]);
    let df = loader().load(&spec, &mut console).unwrap();

    assert_eq!(df.height(), 1);
    assert_eq!(u32_values(&df, MONTH), vec![Some(3)]);

    let transcript = console.transcript();
    assert!(transcript.contains(
        "\nData unavailable for the entered month\n\
         These are the months available in the data:\n\
         January\nMarch\nJune\n"
    ));
    assert_eq!(console.prompts().len(), 1);
}

#[test]
fn test_absent_month_can_fall_back_to_all() {
    let spec = FilterSpec {
        city: City::Washington,
        month: Selection::Only(Month::July),
        day: Selection::All,
    };
    let mut console = ScriptedConsole::new(["augst", "al"]);
    let df = loader().load(&spec, &mut console).unwrap();

    assert_eq!(df.height(), 3);
    let transcript = console.transcript();
    assert_eq!(
        transcript
            .matches("These are the months available in the data:")
            .count(),
        2
    );
    assert!(transcript.contains("Filtering data for August."));
    assert!(transcript.contains("Filtering data for All."));
}

#[test]
fn test_available_months_for_each_city() {
    let table = CityTable::with_data_dir(fixtures_path());
    let months_of = |city| {
        let mut df = read_trips(table.path(city).unwrap()).unwrap();
        bikeshare::loader::add_calendar_fields(&mut df).unwrap();
        available_months(&df).unwrap()
    };

    assert_eq!(
        months_of(City::Chicago),
        vec![Month::January, Month::March, Month::June]
    );
    assert_eq!(months_of(City::NewYorkCity), vec![Month::May]);
    assert_eq!(
        months_of(City::Washington),
        vec![Month::February, Month::April]
    );
}

#[test]
fn test_trip_file_without_required_columns_is_rejected() {
    let path = fixtures_path().join("missing_columns.csv");
    let err = read_trips(&path).unwrap_err();
    assert_eq!(err.error_code(), "COLUMN_NOT_FOUND");
    assert!(err.to_string().contains("missing_columns.csv"));
}

#[test]
fn test_missing_city_file_is_fatal() {
    let config = ExplorerConfig::builder()
        .data_dir(fixtures_path().join("nowhere"))
        .build()
        .unwrap();
    let mut console = ScriptedConsole::new(Vec::<String>::new());
    let err = DatasetLoader::new(&config)
        .load(&FilterSpec::unfiltered(City::Chicago), &mut console)
        .unwrap_err();

    assert!(!err.is_input_closed());
    assert!(err.to_string().contains("chicago.csv"));
}

// ============================================================================
// Reporters
// ============================================================================

#[test]
fn test_chicago_report() {
    let mut console = ScriptedConsole::new(Vec::<String>::new());
    let mut df = loader()
        .load(&FilterSpec::unfiltered(City::Chicago), &mut console)
        .unwrap();

    let text = report_text(&mut df);

    assert!(has_column(&df, HOUR));
    assert!(text.contains("June had the most bikeshares."));
    assert!(text.contains("Mondays had the most bikeshares."));
    assert!(text.contains("The most bikeshares happened from 8:00 to 8:59."));
    assert!(text.contains("'Canal St & Adams St' is the most commonly used start station."));
    assert!(text.contains("'Clinton St & Madison St' is the most commonly used end station."));
    assert!(text.contains(
        "'Canal St & Adams St' to 'Clinton St & Madison St' is the most frequent combination"
    ));
    assert!(
        text.contains("A total travel time of 1 hour(s) 58 minute(s) 1 second(s) was recorded.")
    );
    assert!(text.contains(
        "Each trip had an average travel time of 0 hour(s) 19 minute(s) 40 second(s)."
    ));
    assert!(text.contains(
        "There are 2 types of users in the database:\n4 subscriber(s).\n2 customer(s)."
    ));
    assert!(text.contains("3 users were male.\n1 users were female."));
    assert!(text.contains("Oldest user was born in 1975."));
    assert!(text.contains("Youngest user was born in 1992."));
    assert!(text.contains("Most common year of birth was 1989."));
}

#[test]
fn test_sections_print_in_order() {
    let mut console = ScriptedConsole::new(Vec::<String>::new());
    let mut df = loader()
        .load(&FilterSpec::unfiltered(City::NewYorkCity), &mut console)
        .unwrap();

    let mut out = Vec::new();
    time_stats(&mut df, &mut out).unwrap();
    station_stats(&df, &mut out).unwrap();
    duration_stats(&df, &mut out).unwrap();
    user_stats(&df, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    let headings = [
        "Calculating The Most Frequent Times of Travel...",
        "Calculating The Most Popular Stations and Trip...",
        "Calculating Trip Duration...",
        "Calculating User Stats...",
    ];
    let positions: Vec<usize> = headings
        .iter()
        .map(|h| text.find(h).unwrap_or_else(|| panic!("missing heading {h}")))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(text.matches("This took ").count(), 4);
    assert!(text.contains("May had the most bikeshares."));
}

#[test]
fn test_washington_report_without_demographics() {
    let mut console = ScriptedConsole::new(Vec::<String>::new());
    let mut df = loader()
        .load(&FilterSpec::unfiltered(City::Washington), &mut console)
        .unwrap();

    let text = report_text(&mut df);

    assert!(text.contains("April had the most bikeshares."));
    assert!(text.contains("Mondays had the most bikeshares."));
    assert!(text.contains("The most bikeshares happened from 7:00 to 7:59."));
    assert!(text.contains("'Lincoln Memorial' is the most commonly used start station."));
    assert!(
        text.contains("A total travel time of 0 hour(s) 48 minute(s) 9 second(s) was recorded.")
    );
    assert!(text.contains("Gender data unavailable for the selected filters."));
    assert!(text.contains("Birth year data unavailable for the selected filters."));
}

// ============================================================================
// Full Sessions
// ============================================================================

#[test]
fn test_session_with_typos_browsing_and_restart() {
    let explorer = Explorer::new(&fixture_config());
    let first_cycle = ["chicgo", "june", "monday", "yes", "no", "yes"];
    let second_cycle = ["washington", "all", "all", "no", "no"];
    let mut console = ScriptedConsole::new(first_cycle.into_iter().chain(second_cycle));

    explorer.run(&mut console).unwrap();

    assert_eq!(console.remaining(), 0);
    let transcript = console.transcript();
    assert!(transcript.contains("Filtering data for Chicago."));
    assert_eq!(
        transcript
            .matches("Hello! Let's explore some US bikeshare data!")
            .count(),
        2
    );
    assert!(transcript.contains("Canal St & Adams St  Clinton St & Madison St"));
    assert!(transcript.contains("Gender data unavailable for the selected filters."));
    assert_eq!(transcript.matches("Calculating User Stats...").count(), 2);
}

#[test]
fn test_session_ends_cleanly_when_input_runs_out() {
    let explorer = Explorer::new(&fixture_config());
    let mut console = ScriptedConsole::new(["new york city", "may"]);

    explorer.run(&mut console).unwrap();

    assert_eq!(console.remaining(), 0);
    assert!(!console.transcript().contains("Calculating"));
}

#[test]
fn test_session_propagates_load_failures() {
    let config = ExplorerConfig::builder()
        .data_dir(fixtures_path().join("nowhere"))
        .build()
        .unwrap();
    let mut console = ScriptedConsole::new(["chicago", "all", "all"]);

    let err = Explorer::new(&config).run(&mut console).unwrap_err();
    assert!(!err.is_input_closed());
}

#[test]
fn test_session_aborts_with_error_code_on_invalid_trip_file() {
    let path = fixtures_path().join("missing_columns.csv");
    let table = CityTable::new().insert(City::Chicago, path);
    let config = ExplorerConfig::builder().city_table(table).build().unwrap();
    let mut console = ScriptedConsole::new(["chicago", "all", "all", "no", "no"]);

    let err = Explorer::new(&config).run(&mut console).unwrap_err();

    assert_eq!(err.error_code(), "COLUMN_NOT_FOUND");
    assert!(!console.transcript().contains("Calculating"));
    assert_eq!(console.remaining(), 2);
}
