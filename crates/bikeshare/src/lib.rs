//! US Bikeshare Explorer
//!
//! An interactive tool for exploring bikeshare trip exports, built on
//! Polars.
//!
//! # Overview
//!
//! One analysis cycle runs four stages in order:
//!
//! - **Filter resolution**: city, month and day are asked for, with typo
//!   correction ([`FilterResolver`])
//! - **Loading**: the city's CSV is read, calendar columns are derived and
//!   the filters applied ([`DatasetLoader`])
//! - **Reporting**: busiest times, popular stations, trip durations and user
//!   demographics ([`stats`])
//! - **Browsing**: raw rows, five at a time ([`RawDataBrowser`])
//!
//! [`Explorer`] repeats the cycle until the user stops.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use bikeshare::{Explorer, ExplorerConfig, TerminalConsole};
//!
//! let config = ExplorerConfig::builder().data_dir("data").build()?;
//! Explorer::new(&config).run(&mut TerminalConsole::new())?;
//! ```
//!
//! # Testing
//!
//! All prompting goes through the [`Console`] trait. [`ScriptedConsole`]
//! answers from a fixed list and records the output, so every loop ends
//! once the script does.

pub mod browser;
pub mod config;
pub mod console;
pub mod error;
pub mod filters;
pub mod loader;
pub mod session;
pub mod stats;
pub mod types;

// Re-exports for convenient access
pub use browser::RawDataBrowser;
pub use config::{CityTable, ConfigValidationError, ExplorerConfig, ExplorerConfigBuilder};
pub use console::{Console, ScriptedConsole, TerminalConsole, is_affirmative};
pub use error::{ExplorerError, Result as ExplorerResult, ResultExt};
pub use filters::{FilterResolver, Resolution};
pub use loader::DatasetLoader;
pub use session::Explorer;
pub use stats::{convert_seconds, report_all};
pub use types::{City, FilterSpec, Selection};
