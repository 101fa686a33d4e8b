//! Filter resolution: turning typed answers into a [`FilterSpec`].
//!
//! Each field accepts an exact (case-insensitive) answer, or else the
//! closest valid value if it is similar enough. Anything else is rejected
//! and the same question is asked again.

mod fuzzy;

pub use fuzzy::{CloseMatch, close_matches, similarity};

use crate::config::{CityTable, ExplorerConfig};
use crate::console::Console;
use crate::error::{ExplorerError, Result};
use crate::types::{
    ALL, City, DAY_NAMES, FilterSpec, MONTH_NAMES, Selection, month_from_name, title_case,
    weekday_from_name,
};
use chrono::{Month, Weekday};
use tracing::debug;

const CITY_PROMPT: &str = "\nEnter the name of the city to be analyzed: ";
const MONTH_PROMPT: &str =
    "\nEnter the month to be analyzed.\n(Input 'all' if you would like to analyze entire data): ";
const DAY_PROMPT: &str =
    "\nEnter the day to be analyzed.\n(Input 'all' if you would like to analyze entire data): ";
const INVALID_INPUT: &str = "Invalid input, please try again";

/// How an answer was matched to a valid value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// The answer was a valid value.
    Exact(&'a str),
    /// The answer was corrected to a close valid value.
    Corrected(&'a str),
    /// Nothing valid was close enough.
    Rejected,
}

/// Prompts for city, month and day and validates the answers.
#[derive(Debug, Clone)]
pub struct FilterResolver {
    city_table: CityTable,
    cutoff: f64,
    max_suggestions: usize,
}

impl FilterResolver {
    pub fn new(config: &ExplorerConfig) -> Self {
        Self {
            city_table: config.city_table.clone(),
            cutoff: config.fuzzy_cutoff,
            max_suggestions: config.max_suggestions,
        }
    }

    /// Ask for all three filters.
    pub fn resolve(&self, console: &mut dyn Console) -> Result<FilterSpec> {
        console.say("Hello! Let's explore some US bikeshare data!")?;
        console.say(&"_".repeat(40))?;
        console.say("\nGiven below is the list of cities with available data:")?;
        for city in self.city_table.cities() {
            console.say(&city.to_string())?;
        }

        let city = self.resolve_city(console, CITY_PROMPT)?;
        let month = self.resolve_month(console, MONTH_PROMPT)?;
        let day = self.resolve_day(console, DAY_PROMPT)?;

        console.say(&"-".repeat(40))?;
        let spec = FilterSpec { city, month, day };
        debug!("Resolved filters: {}", spec);
        Ok(spec)
    }

    /// Ask for a city until a known one is given.
    pub fn resolve_city(&self, console: &mut dyn Console, prompt: &str) -> Result<City> {
        let cities = self.city_table.cities();
        let names: Vec<&str> = cities.iter().map(City::name).collect();
        let name = self.ask_until_valid(console, prompt, &names)?;
        City::from_name(name).ok_or_else(|| ExplorerError::UnknownCity(name.to_string()))
    }

    /// Ask for a month name or "all" until a valid answer is given.
    pub fn resolve_month(
        &self,
        console: &mut dyn Console,
        prompt: &str,
    ) -> Result<Selection<Month>> {
        let choices: Vec<&str> = MONTH_NAMES.iter().copied().chain([ALL]).collect();
        let name = self.ask_until_valid(console, prompt, &choices)?;
        Ok(month_from_name(name).map_or(Selection::All, Selection::Only))
    }

    /// Ask for a day name or "all" until a valid answer is given.
    pub fn resolve_day(
        &self,
        console: &mut dyn Console,
        prompt: &str,
    ) -> Result<Selection<Weekday>> {
        let choices: Vec<&str> = DAY_NAMES.iter().copied().chain([ALL]).collect();
        let name = self.ask_until_valid(console, prompt, &choices)?;
        Ok(weekday_from_name(name).map_or(Selection::All, Selection::Only))
    }

    /// Match one answer against `choices`.
    pub fn match_answer<'a>(&self, answer: &str, choices: &[&'a str]) -> Resolution<'a> {
        let answer = answer.trim().to_lowercase();
        if answer.is_empty() {
            return Resolution::Rejected;
        }

        if let Some(&exact) = choices.iter().find(|&&choice| choice == answer) {
            return Resolution::Exact(exact);
        }

        match close_matches(&answer, choices, self.max_suggestions, self.cutoff).first() {
            Some(best) => {
                debug!(
                    "Corrected '{}' to '{}' (score {:.3})",
                    answer, best.candidate, best.score
                );
                Resolution::Corrected(best.candidate)
            }
            None => Resolution::Rejected,
        }
    }

    fn ask_until_valid<'a>(
        &self,
        console: &mut dyn Console,
        prompt: &str,
        choices: &[&'a str],
    ) -> Result<&'a str> {
        loop {
            let answer = console.ask(prompt)?;
            match self.match_answer(&answer, choices) {
                Resolution::Exact(value) => return Ok(value),
                Resolution::Corrected(value) => {
                    console.say(&format!("Filtering data for {}.", title_case(value)))?;
                    return Ok(value);
                }
                Resolution::Rejected => console.say(INVALID_INPUT)?,
            }
        }
    }
}
