//! Error types for cellmath

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur outside the pure conversion engine
#[derive(Debug, Error)]
pub enum Error {
    /// Reading or writing a file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A rename table file is not a JSON object of strings
    #[error("Invalid rename table: {0}")]
    RenameTable(#[from] serde_json::Error),

    /// Formula conversion failed
    #[error(transparent)]
    Formula(#[from] cellmath_formula::FormulaError),
}
