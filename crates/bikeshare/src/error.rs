//! Error types for the bikeshare explorer.
//!
//! Only unrecoverable conditions are modelled here. Invalid answers, months
//! missing from the data and absent optional columns are handled where they
//! occur and never surface as an [`ExplorerError`].

use thiserror::Error;

/// The main error type for the explorer.
#[derive(Error, Debug)]
pub enum ExplorerError {
    /// The input source has no more answers (EOF on stdin, or a scripted
    /// console that ran out of responses).
    #[error("Input closed")]
    InputClosed,

    /// A required column is missing from a city's trip file.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// The configured city table has no file for the requested city.
    #[error("No trip data configured for city '{0}'")]
    UnknownCity(String),

    /// A timestamp in the trip file could not be parsed.
    #[error("Failed to parse '{value}' in column '{column}' as a timestamp")]
    TimestampParse { column: String, value: String },

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ExplorerError>,
    },
}

impl ExplorerError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ExplorerError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Stable error code, logged when a session aborts.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InputClosed => "INPUT_CLOSED",
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::UnknownCity(_) => "UNKNOWN_CITY",
            Self::TimestampParse { .. } => "TIMESTAMP_PARSE",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error means the user simply stopped answering.
    pub fn is_input_closed(&self) -> bool {
        match self {
            Self::InputClosed => true,
            Self::WithContext { source, .. } => source.is_input_closed(),
            _ => false,
        }
    }
}

/// Result type alias for explorer operations.
pub type Result<T> = std::result::Result<T, ExplorerError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| ExplorerError::Polars(e).with_context(context))
    }
}
