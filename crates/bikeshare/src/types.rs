//! Core domain types: cities, calendar names and the filter specification.

use chrono::{Month, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lower-case month names, indexed by `month number - 1`.
pub const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Lower-case weekday names, indexed by days from Monday.
pub const DAY_NAMES: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Answer that disables a month or day filter.
pub const ALL: &str = "all";

const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Cities with trip data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    /// Every supported city, in menu order.
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Lower-case name, as typed at the prompt.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Chicago => "chicago",
            Self::NewYorkCity => "new york city",
            Self::Washington => "washington",
        }
    }

    /// File name of the city's trip export.
    pub fn default_file_name(&self) -> &'static str {
        match self {
            Self::Chicago => "chicago.csv",
            Self::NewYorkCity => "new_york_city.csv",
            Self::Washington => "washington.csv",
        }
    }

    /// Look a city up by its lower-case name.
    pub fn from_name(name: &str) -> Option<City> {
        Self::ALL.into_iter().find(|city| city.name() == name)
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&title_case(self.name()))
    }
}

/// A filter value: either everything, or a single value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selection<T> {
    All,
    Only(T),
}

/// The resolved city/month/day triple for one analysis cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSpec {
    pub city: City,
    pub month: Selection<Month>,
    pub day: Selection<Weekday>,
}

impl FilterSpec {
    /// Spec for a whole city with no month or day restriction.
    pub fn unfiltered(city: City) -> Self {
        Self {
            city,
            month: Selection::All,
            day: Selection::All,
        }
    }
}

impl fmt::Display for FilterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let month = match self.month {
            Selection::All => "all months".to_string(),
            Selection::Only(month) => month.name().to_string(),
        };
        let day = match self.day {
            Selection::All => "all days".to_string(),
            Selection::Only(day) => title_case(weekday_name(day)),
        };
        write!(f, "{} ({}, {})", self.city, month, day)
    }
}

static_assertions::assert_impl_all!(FilterSpec: Send, Sync);

/// Month for a lower-case month name.
pub fn month_from_name(name: &str) -> Option<Month> {
    MONTH_NAMES
        .iter()
        .position(|&m| m == name)
        .map(|idx| MONTHS[idx])
}

/// Month for a 1-based month number.
pub fn month_from_number(number: u32) -> Option<Month> {
    let idx = usize::try_from(number).ok()?.checked_sub(1)?;
    MONTHS.get(idx).copied()
}

/// Lower-case name of a month.
pub fn month_name(month: Month) -> &'static str {
    MONTH_NAMES[month.number_from_month() as usize - 1]
}

/// Weekday for a lower-case day name.
pub fn weekday_from_name(name: &str) -> Option<Weekday> {
    DAY_NAMES
        .iter()
        .position(|&d| d == name)
        .map(|idx| WEEKDAYS[idx])
}

/// Weekday for an index counted from Monday (0) to Sunday (6).
pub fn weekday_from_index(index: u32) -> Option<Weekday> {
    WEEKDAYS.get(usize::try_from(index).ok()?).copied()
}

/// Lower-case name of a weekday.
pub fn weekday_name(day: Weekday) -> &'static str {
    DAY_NAMES[day.num_days_from_monday() as usize]
}

/// Upper-case the first letter of every word.
pub fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_names_round_trip() {
        for city in City::ALL {
            assert_eq!(City::from_name(city.name()), Some(city));
        }
        assert_eq!(City::from_name("boston"), None);
    }

    #[test]
    fn test_city_display_is_title_case() {
        assert_eq!(City::NewYorkCity.to_string(), "New York City");
        assert_eq!(City::Chicago.to_string(), "Chicago");
    }

    #[test]
    fn test_month_lookup() {
        assert_eq!(month_from_name("june"), Some(Month::June));
        assert_eq!(month_from_name("augustseptember"), None);
        assert_eq!(month_from_number(9), Some(Month::September));
        assert_eq!(month_from_number(0), None);
        assert_eq!(month_from_number(13), None);
    }

    #[test]
    fn test_every_month_name_matches_its_number() {
        for (idx, name) in MONTH_NAMES.iter().enumerate() {
            let month = month_from_name(name).unwrap();
            assert_eq!(month.number_from_month() as usize, idx + 1);
            assert_eq!(month_name(month), *name);
        }
    }

    #[test]
    fn test_weekday_lookup() {
        assert_eq!(weekday_from_name("monday"), Some(Weekday::Mon));
        assert_eq!(weekday_from_index(6), Some(Weekday::Sun));
        assert_eq!(weekday_from_index(7), None);
        assert_eq!(weekday_name(Weekday::Thu), "thursday");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("new york city"), "New York City");
        assert_eq!(title_case("subscriber"), "Subscriber");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_filter_spec_display() {
        let spec = FilterSpec {
            city: City::Washington,
            month: Selection::Only(Month::March),
            day: Selection::All,
        };
        assert_eq!(spec.to_string(), "Washington (March, all days)");
    }
}
