//! Configuration for the explorer.
//!
//! The city-to-file mapping lives here rather than in a global so tests can
//! point the loader at fixture files.

use crate::types::City;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Mapping from each supported city to its trip file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityTable {
    files: BTreeMap<City, PathBuf>,
}

impl CityTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard three-city table with files rooted at `data_dir`.
    pub fn with_data_dir(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        City::ALL
            .into_iter()
            .fold(Self::new(), |table, city| {
                table.insert(city, data_dir.join(city.default_file_name()))
            })
    }

    /// Add or replace the file for a city.
    pub fn insert(mut self, city: City, path: impl Into<PathBuf>) -> Self {
        self.files.insert(city, path.into());
        self
    }

    /// File configured for a city.
    pub fn path(&self, city: City) -> Option<&Path> {
        self.files.get(&city).map(PathBuf::as_path)
    }

    /// Cities that have a file, in menu order.
    pub fn cities(&self) -> Vec<City> {
        City::ALL
            .into_iter()
            .filter(|city| self.files.contains_key(city))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Configuration for one explorer session.
///
/// Use [`ExplorerConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use bikeshare::config::{CityTable, ExplorerConfig};
///
/// let config = ExplorerConfig::builder()
///     .city_table(CityTable::with_data_dir("data"))
///     .page_size(10)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorerConfig {
    /// Trip file for each city.
    /// Default: the three standard files in the working directory
    pub city_table: CityTable,

    /// Number of rows shown per page by the raw data browser.
    /// Default: 5
    pub page_size: usize,

    /// Minimum similarity (0.0 - 1.0) for a fuzzy correction to be accepted.
    /// Default: 0.6
    pub fuzzy_cutoff: f64,

    /// Number of close matches considered when correcting a typo.
    /// Default: 3
    pub max_suggestions: usize,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            city_table: CityTable::with_data_dir("."),
            page_size: 5,
            fuzzy_cutoff: 0.6,
            max_suggestions: 3,
        }
    }
}

impl ExplorerConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ExplorerConfigBuilder {
        ExplorerConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.city_table.is_empty() {
            return Err(ConfigValidationError::NoCities);
        }

        if self.page_size == 0 {
            return Err(ConfigValidationError::InvalidPageSize(self.page_size));
        }

        if !(0.0..=1.0).contains(&self.fuzzy_cutoff) {
            return Err(ConfigValidationError::InvalidCutoff(self.fuzzy_cutoff));
        }

        if self.max_suggestions == 0 {
            return Err(ConfigValidationError::InvalidMaxSuggestions(
                self.max_suggestions,
            ));
        }

        Ok(())
    }
}

static_assertions::assert_impl_all!(ExplorerConfig: Send, Sync);

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("City table is empty")]
    NoCities,

    #[error("Invalid page size: {0} (must be at least 1)")]
    InvalidPageSize(usize),

    #[error("Invalid fuzzy cutoff: {0} (must be between 0.0 and 1.0)")]
    InvalidCutoff(f64),

    #[error("Invalid max suggestions: {0} (must be at least 1)")]
    InvalidMaxSuggestions(usize),
}

impl From<ConfigValidationError> for crate::error::ExplorerError {
    fn from(err: ConfigValidationError) -> Self {
        crate::error::ExplorerError::InvalidConfig(err.to_string())
    }
}

/// Builder for [`ExplorerConfig`].
#[derive(Debug, Default)]
pub struct ExplorerConfigBuilder {
    config: ExplorerConfig,
}

impl ExplorerConfigBuilder {
    /// Set the city-to-file table.
    pub fn city_table(mut self, table: CityTable) -> Self {
        self.config.city_table = table;
        self
    }

    /// Use the standard file names inside `dir`.
    pub fn data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.config.city_table = CityTable::with_data_dir(dir);
        self
    }

    /// Set the raw data page size.
    pub fn page_size(mut self, rows: usize) -> Self {
        self.config.page_size = rows;
        self
    }

    /// Set the fuzzy match cutoff.
    pub fn fuzzy_cutoff(mut self, cutoff: f64) -> Self {
        self.config.fuzzy_cutoff = cutoff;
        self
    }

    /// Set how many close matches are considered.
    pub fn max_suggestions(mut self, n: usize) -> Self {
        self.config.max_suggestions = n;
        self
    }

    /// Build the configuration, validating all values.
    pub fn build(self) -> Result<ExplorerConfig, ConfigValidationError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
