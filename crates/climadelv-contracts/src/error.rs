//! Error types for the ClimaDelv action logger.
//!
//! Every fallible operation returns `ClimaResult<T>`. Variants carry the
//! context a user-facing layer needs to explain what went wrong.

use thiserror::Error;

/// The unified error type for the ClimaDelv crates.
#[derive(Debug, Error)]
pub enum ClimaError {
    /// The submitted action was rejected before estimation. Nothing was logged.
    #[error("validation failed: {reason}")]
    Validation { reason: String },

    /// Persisted wallet state exists but could not be parsed.
    ///
    /// There is no automatic recovery; the file is left untouched.
    #[error("wallet storage at '{path}' is corrupt: {reason}")]
    StorageCorruption { path: String, reason: String },

    /// Reading or writing the wallet storage failed.
    #[error("wallet storage I/O failed at '{path}': {reason}")]
    Io { path: String, reason: String },

    /// A rule table or other configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    Config { reason: String },
}

/// Convenience alias used throughout the ClimaDelv crates.
pub type ClimaResult<T> = Result<T, ClimaError>;
