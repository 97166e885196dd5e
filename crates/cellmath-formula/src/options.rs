//! Conversion options

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Characters the tokenizer accepts as a decimal separator inside a number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DecimalSeparators {
    /// Both `.` and `,`; `,` between digits is never an argument separator
    Both,
    /// Only `.`
    #[default]
    Point,
    /// Only `,`
    Comma,
}

impl DecimalSeparators {
    /// Whether `c` may act as the decimal separator of a number
    pub fn accepts(self, c: char) -> bool {
        match self {
            DecimalSeparators::Both => c == '.' || c == ',',
            DecimalSeparators::Point => c == '.',
            DecimalSeparators::Comma => c == ',',
        }
    }
}

/// Options for tokenizing formulas
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TokenizerOptions {
    /// Accepted decimal separators (default: point)
    pub decimal_separators: DecimalSeparators,
    /// Treat `=`, `<` and `>` as operators (default: true)
    pub comparisons: bool,
}

impl Default for TokenizerOptions {
    fn default() -> Self {
        Self {
            decimal_separators: DecimalSeparators::Point,
            comparisons: true,
        }
    }
}

/// Associativity of the `^` operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PowerAssociativity {
    /// `a^b^c` is `(a^b)^c`
    #[default]
    Left,
    /// `a^b^c` is `a^(b^c)`
    Right,
}

/// Options for parsing token streams
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParserOptions {
    /// Maximum nesting depth of parentheses, calls and unary minus
    pub max_depth: usize,
    /// How chains of `^` are grouped
    pub power_associativity: PowerAssociativity,
}

/// Default nesting limit, the function nesting limit of common spreadsheet applications
pub const DEFAULT_MAX_DEPTH: usize = 64;

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            power_associativity: PowerAssociativity::Left,
        }
    }
}

/// Decimal separator written into rendered numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DecimalStyle {
    /// Write `,`
    #[default]
    Comma,
    /// Write `.`
    Point,
    /// Keep the source text
    Preserve,
}

/// Options for rendering an AST
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RenderOptions {
    /// Decimal separator in number literals (default: comma)
    pub decimal_style: DecimalStyle,
}

/// Which conversion path to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ConversionMode {
    /// Tokenize, parse and render the AST
    #[default]
    Precise,
    /// Regex substitutions over the raw text
    Quick,
}

/// Options for a whole conversion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConvertOptions {
    pub tokenizer: TokenizerOptions,
    pub parser: ParserOptions,
    pub render: RenderOptions,
    pub mode: ConversionMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_separators_accepts() {
        assert!(DecimalSeparators::Both.accepts('.'));
        assert!(DecimalSeparators::Both.accepts(','));
        assert!(DecimalSeparators::Point.accepts('.'));
        assert!(!DecimalSeparators::Point.accepts(','));
        assert!(DecimalSeparators::Comma.accepts(','));
        assert!(!DecimalSeparators::Comma.accepts('.'));
        assert!(!DecimalSeparators::Both.accepts(';'));
    }

    #[test]
    fn test_defaults() {
        let options = ConvertOptions::default();
        assert_eq!(options.tokenizer.decimal_separators, DecimalSeparators::Point);
        assert!(options.tokenizer.comparisons);
        assert_eq!(options.parser.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(options.parser.power_associativity, PowerAssociativity::Left);
        assert_eq!(options.render.decimal_style, DecimalStyle::Comma);
        assert_eq!(options.mode, ConversionMode::Precise);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_partial_options_from_json() {
        let options: ConvertOptions =
            serde_json::from_str(r#"{"render":{"decimal_style":"preserve"},"mode":"quick"}"#)
                .unwrap();
        assert_eq!(options.render.decimal_style, DecimalStyle::Preserve);
        assert_eq!(options.mode, ConversionMode::Quick);
        assert_eq!(options.parser, ParserOptions::default());
    }
}
