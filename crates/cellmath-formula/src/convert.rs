//! Formula → LaTeX conversion
//!
//! Ties the tokenizer, parser and renderer together. [`convert`] never fails: errors
//! are rendered as `\text{...}` notation so a caller can display whatever comes back.

use crate::error::{FormulaError, FormulaResult};
use crate::options::{ConversionMode, ConvertOptions};
use crate::parser::{first_unknown, parse_with_options};
use crate::quick::convert_quick;
use crate::render::{escape_text, render_with_options};
use crate::renames::RenameTable;
use crate::tokenizer::tokenize_with_options;

/// Convert a formula to LaTeX with default options
///
/// # Example
/// ```rust
/// use cellmath_formula::{convert, RenameTable};
///
/// let renames: RenameTable = [("A1", "x")].into_iter().collect();
/// assert_eq!(convert("=3*A1+5", &renames), "3 \\cdot x + 5");
/// assert_eq!(convert("=A1#2", &renames), "\\text{Invalid character: \\#}");
/// ```
pub fn convert(formula: &str, renames: &RenameTable) -> String {
    convert_with_options(formula, renames, &ConvertOptions::default())
}

/// Convert a formula to LaTeX, formatting any error as notation
pub fn convert_with_options(formula: &str, renames: &RenameTable, options: &ConvertOptions) -> String {
    match try_convert(formula, renames, options) {
        Ok(latex) => latex,
        Err(err) => format_error(&err),
    }
}

/// Convert a formula to LaTeX, returning errors as values
///
/// An input without any tokens (such as `""` or `"="`) converts to an empty string.
pub fn try_convert(
    formula: &str,
    renames: &RenameTable,
    options: &ConvertOptions,
) -> FormulaResult<String> {
    if options.mode == ConversionMode::Quick {
        return Ok(convert_quick(formula));
    }

    let tokens = tokenize_with_options(formula, &options.tokenizer);
    if tokens.is_empty() {
        return Ok(String::new());
    }

    if let Some(bad) = first_unknown(&tokens) {
        tracing::debug!("rejected {:?}: invalid character {:?}", formula, bad);
        return Err(FormulaError::InvalidCharacter(bad));
    }

    let ast = parse_with_options(&tokens, &options.parser).map_err(|err| {
        tracing::debug!("failed to parse {:?}: {}", formula, err);
        err
    })?;

    let latex = render_with_options(&ast, renames, &options.render);
    tracing::debug!("converted {:?} to {:?}", formula, latex);
    Ok(latex)
}

/// LaTeX notation for a conversion error
pub fn format_error(err: &FormulaError) -> String {
    match err {
        FormulaError::InvalidCharacter(c) => {
            format!("\\text{{Invalid character: {}}}", escape_text(&c.to_string()))
        }
        FormulaError::Syntax(message) => format!("\\text{{Error: {}}}", escape_text(message)),
    }
}
