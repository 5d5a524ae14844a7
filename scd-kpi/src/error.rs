/// Error types for the KPI library
use crate::month::Month;
use thiserror::Error;

/// Main error type for loading and keying KPI data
#[derive(Error, Debug)]
pub enum KpiError {
    /// Failed to parse CSV data
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// Failed to read a data table from disk
    #[error("Failed to read data table: {0}")]
    Io(#[from] std::io::Error),

    /// Month key is not one of the twelve 3-letter abbreviations
    #[error("Unknown month abbreviation: {0:?}")]
    UnknownMonth(String),

    /// Category key is not part of the tracked set
    #[error("Unknown category: {0:?}")]
    UnknownCategory(String),

    /// A revenue field was negative, NaN or infinite
    #[error("Invalid value for {field} in {month} {year}: {value} (expected a finite amount >= 0)")]
    InvalidValue {
        field: &'static str,
        month: Month,
        year: i32,
        value: f64,
    },
}

/// Type alias for Results using KpiError
pub type Result<T> = std::result::Result<T, KpiError>;
