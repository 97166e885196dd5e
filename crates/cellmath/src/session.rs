//! Interactive conversion sessions
//!
//! A [`Session`] is what an editor keeps alive while the user types: the rename
//! table persists across conversions and grows with identity entries as new cell
//! references appear.
//!
//! # Example
//!
//! ```rust
//! use cellmath::Session;
//!
//! let mut session = Session::new();
//! assert_eq!(session.convert("=3*A1 + 5"), "3 \\cdot A1 + 5");
//!
//! session.rename("A1", "x");
//! assert_eq!(session.convert("=3*A1 + 5"), "3 \\cdot x + 5");
//! assert_eq!(session.variables(), vec!["A1"]);
//! ```

use cellmath_formula::{
    convert_with_options, detect_variables, try_convert, ConvertOptions, FormulaResult,
    RenameTable,
};

/// A rename table plus conversion options shared by successive conversions
#[derive(Debug, Clone, Default)]
pub struct Session {
    renames: RenameTable,
    options: ConvertOptions,
    last_formula: String,
}

impl Session {
    /// Create a session with default options and an empty rename table
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session with the given options
    pub fn with_options(options: ConvertOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Create a session starting from an existing rename table
    pub fn with_renames(renames: RenameTable, options: ConvertOptions) -> Self {
        Self {
            renames,
            options,
            last_formula: String::new(),
        }
    }

    /// Conversion options
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Mutable conversion options
    pub fn options_mut(&mut self) -> &mut ConvertOptions {
        &mut self.options
    }

    /// Current rename table
    pub fn renames(&self) -> &RenameTable {
        &self.renames
    }

    /// Set the display symbol for a cell reference
    pub fn rename(&mut self, reference: &str, symbol: impl Into<String>) {
        self.renames.insert(reference, symbol);
    }

    /// Convert a formula, seeding the rename table with any new references first
    pub fn convert(&mut self, formula: &str) -> String {
        self.seed(formula);
        convert_with_options(formula, &self.renames, &self.options)
    }

    /// Like [`Session::convert`], returning errors as values
    pub fn try_convert(&mut self, formula: &str) -> FormulaResult<String> {
        self.seed(formula);
        try_convert(formula, &self.renames, &self.options)
    }

    /// Cell references in the most recently converted formula
    pub fn variables(&self) -> Vec<String> {
        detect_variables(&self.last_formula, &self.options.tokenizer)
    }

    fn seed(&mut self, formula: &str) {
        self.renames
            .seed_from_formula(formula, &self.options.tokenizer);
        self.last_formula = formula.to_string();
    }
}
