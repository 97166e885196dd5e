//! # cellmath-formula
//!
//! Spreadsheet formula → LaTeX engine for cellmath.
//!
//! This crate provides:
//! - Formula tokenizing (text → tokens)
//! - Formula parsing (tokens → AST)
//! - Rendering (AST → LaTeX, with a variable rename table)
//! - A quick regex-based conversion mode
//!
//! ## Example
//!
//! ```rust
//! use cellmath_formula::{convert, RenameTable};
//!
//! let mut renames = RenameTable::new();
//! renames.insert("A1", "x");
//!
//! assert_eq!(convert("=SQRT(A1^2+B1^2)", &renames), "\\sqrt{{x}^{2} + {B1}^{2}}");
//! ```

pub mod ast;
pub mod convert;
pub mod error;
pub mod options;
pub mod parser;
pub mod quick;
pub mod render;
pub mod renames;
pub mod token;
pub mod tokenizer;

pub use ast::{BinaryOperator, FormulaExpr, UnaryOperator};
pub use convert::{convert, convert_with_options, format_error, try_convert};
pub use error::{FormulaError, FormulaResult};
pub use options::{
    ConversionMode, ConvertOptions, DecimalSeparators, DecimalStyle, ParserOptions,
    PowerAssociativity, RenderOptions, TokenizerOptions, DEFAULT_MAX_DEPTH,
};
pub use parser::{parse, parse_formula, parse_with_options};
pub use render::{notation_rule, render, render_with_options, NotationRule};
pub use renames::RenameTable;
pub use token::{Token, TokenKind};
pub use tokenizer::{detect_variables, tokenize, tokenize_with_options};
