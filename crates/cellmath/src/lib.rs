//! # cellmath
//!
//! Convert spreadsheet formulas into typeset (LaTeX) notation.
//!
//! ## Features
//!
//! - Precise conversion: tokenize, parse into an AST, render per operator and function
//! - Quick conversion: regex substitutions for a handful of functions
//! - Rename tables mapping cell references to display symbols, persisted as JSON
//! - Interactive sessions that grow the rename table as references appear
//!
//! ## Example
//!
//! ```rust
//! use cellmath::prelude::*;
//!
//! let mut renames = RenameTable::new();
//! renames.insert("A1", "x");
//!
//! assert_eq!(convert("=3*A1+5", &renames), "3 \\cdot x + 5");
//! assert_eq!(convert("=A1/B1", &renames), "\\frac{x}{B1}");
//! ```

pub mod error;
pub mod prelude;
pub mod session;

pub use error::{Error, Result};
pub use session::Session;

// Re-export formula types
pub use cellmath_formula::{
    convert, convert_with_options, detect_variables, format_error, parse, parse_formula,
    parse_with_options, quick, render, render_with_options, tokenize, tokenize_with_options,
    try_convert, BinaryOperator, ConversionMode, ConvertOptions, DecimalSeparators, DecimalStyle,
    FormulaError, FormulaExpr, FormulaResult, NotationRule, ParserOptions, PowerAssociativity,
    RenameTable, RenderOptions, Token, TokenKind, TokenizerOptions, UnaryOperator,
};

use std::path::Path;

/// Extension trait for RenameTable to add file I/O
pub trait RenameTableExt: Sized {
    /// Load a rename table from a JSON object file (`{"A1": "x"}`)
    fn open<P: AsRef<Path>>(path: P) -> Result<Self>;

    /// Save the rename table as a JSON object file
    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()>;
}

impl RenameTableExt for RenameTable {
    fn open<P: AsRef<Path>>(path: P) -> Result<RenameTable> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let table: RenameTable = serde_json::from_str(&text)?;
        tracing::debug!("loaded {} renames from {}", table.len(), path.display());
        Ok(table)
    }

    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        tracing::debug!("saved {} renames to {}", self.len(), path.display());
        Ok(())
    }
}
