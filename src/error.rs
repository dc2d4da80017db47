//! Error types for the Salary Advisor.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while producing recommendations.

use thiserror::Error;

/// The main error type for the Salary Advisor.
///
/// All fallible operations in the crate return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use salary_advisor::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/columns.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/columns.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed or is inconsistent.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The uploaded employee table could not be read.
    #[error("Failed to read employee table: {message}")]
    InputParseError {
        /// A description of the read failure.
        message: String,
    },

    /// A recognized column held a value that cannot be interpreted.
    #[error("Invalid value in column '{column}' at row {row}: {message}")]
    InvalidField {
        /// The 0-based row index in the uploaded table.
        row: usize,
        /// The column holding the invalid value.
        column: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// There is not enough data to train or run the model.
    #[error("Insufficient data: {message}")]
    InsufficientData {
        /// A description of what was missing.
        message: String,
    },

    /// A trained model could not be written or read back.
    #[error("Model persistence failed for '{path}': {message}")]
    ModelPersistence {
        /// The model file path.
        path: String,
        /// A description of the failure.
        message: String,
    },

    /// A market benchmark lookup failed.
    #[error("Market lookup failed for '{role}' in '{location}': {message}")]
    MarketLookupFailed {
        /// The job role that was looked up.
        role: String,
        /// The location that was looked up.
        location: String,
        /// A description of the failure.
        message: String,
    },

    /// A report could not be written.
    #[error("Failed to write report: {message}")]
    ReportError {
        /// A description of the write failure.
        message: String,
    },

    /// Salary arithmetic left the range a `Decimal` can hold.
    #[error("Arithmetic overflow: {message}")]
    Overflow {
        /// The operation that overflowed.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
