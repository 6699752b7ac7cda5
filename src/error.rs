//! Error handling for WITS trade processing.
//!
//! Per-country errors (missing files, unreadable payloads, bad headers) are
//! contained by the pipeline and only logged. Registry conflicts, invalid
//! configuration and a fan-out that cannot complete are the errors a caller
//! actually sees.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WitsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Trade source not found for {code} at path: {path}")]
    SourceNotFound { code: String, path: PathBuf },

    #[error("Invalid trade CSV for {code}: {reason}")]
    InvalidFormat { code: String, reason: String },

    #[error("Code registry conflict for {code}: maps to both {first} and {second}")]
    RegistryConflict {
        code: String,
        first: String,
        second: String,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Fan-out for year {year} could not complete: {reason}")]
    FanOutFailed { year: i32, reason: String },

    #[error("Export failed for {path}: {reason}")]
    Export { path: PathBuf, reason: String },
}

impl WitsError {
    /// Whether this error is scoped to a single country's source and can be
    /// skipped without failing the whole year.
    pub fn is_per_country(&self) -> bool {
        matches!(
            self,
            WitsError::Io(_)
                | WitsError::Csv(_)
                | WitsError::SourceNotFound { .. }
                | WitsError::InvalidFormat { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, WitsError>;
