//! Formula error types

use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur while converting a formula
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormulaError {
    /// The tokenizer met a character outside the accepted set
    #[error("Invalid character: {0}")]
    InvalidCharacter(char),

    /// The token stream does not match the formula grammar
    #[error("{0}")]
    Syntax(String),
}

impl FormulaError {
    pub(crate) fn syntax(message: impl Into<String>) -> Self {
        FormulaError::Syntax(message.into())
    }
}
