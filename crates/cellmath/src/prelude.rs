//! Prelude module - common imports for cellmath users
//!
//! ```rust
//! use cellmath::prelude::*;
//! ```

pub use crate::{
    // Conversion entry points
    convert,
    convert_with_options,
    try_convert,

    // Options
    ConversionMode,
    ConvertOptions,
    DecimalSeparators,
    DecimalStyle,
    ParserOptions,
    PowerAssociativity,
    RenderOptions,
    TokenizerOptions,

    // Error types
    Error,
    FormulaError,
    FormulaResult,
    Result,

    // Main types
    FormulaExpr,
    RenameTable,
    Session,

    // Extension traits
    RenameTableExt,
};
