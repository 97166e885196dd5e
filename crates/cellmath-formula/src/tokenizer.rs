//! Formula tokenizer
//!
//! Turns raw formula text into a flat list of [`Token`]s. Scanning never fails:
//! characters outside the accepted set become [`TokenKind::Unknown`] tokens so the
//! caller can report them.

use crate::options::TokenizerOptions;
use crate::token::{Token, TokenKind};

/// Tokenize a formula with default options
///
/// # Example
/// ```rust
/// use cellmath_formula::{tokenize, TokenKind};
///
/// let tokens = tokenize("=SQRT(A1)");
/// assert_eq!(tokens[0].kind, TokenKind::FunctionName);
/// assert_eq!(tokens[2].kind, TokenKind::CellReference);
/// ```
pub fn tokenize(formula: &str) -> Vec<Token> {
    tokenize_with_options(formula, &TokenizerOptions::default())
}

/// Tokenize a formula
pub fn tokenize_with_options(formula: &str, options: &TokenizerOptions) -> Vec<Token> {
    let input = formula.strip_prefix('=').unwrap_or(formula);
    let mut scanner = Scanner::new(input, formula.len() - input.len(), options);
    let mut tokens = Vec::new();

    while let Some(token) = scanner.next_token() {
        tokens.push(token);
    }

    tracing::trace!("tokenized {} tokens from {:?}", tokens.len(), formula);
    tokens
}

/// Sorted, de-duplicated cell references appearing in a formula
pub fn detect_variables(formula: &str, options: &TokenizerOptions) -> Vec<String> {
    let mut names: Vec<String> = tokenize_with_options(formula, options)
        .into_iter()
        .filter(|t| t.kind == TokenKind::CellReference)
        .map(|t| t.text)
        .collect();
    names.sort();
    names.dedup();
    names
}

struct Scanner<'a> {
    input: &'a str,
    pos: usize,
    /// Bytes stripped from the front of the formula
    base: usize,
    options: &'a TokenizerOptions,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str, base: usize, options: &'a TokenizerOptions) -> Self {
        Self {
            input,
            pos: 0,
            base,
            options,
        }
    }

    fn token(&self, kind: TokenKind, text: impl Into<String>, start: usize) -> Token {
        Token::at(kind, text, self.base + start)
    }

    fn next_token(&mut self) -> Option<Token> {
        self.skip_whitespace();

        let c = self.peek_char()?;
        let start = self.pos;

        if c.is_ascii_digit() {
            return Some(self.scan_number());
        }

        if c.is_alphabetic() || c == '$' {
            return Some(self.scan_identifier());
        }

        self.advance();
        let kind = match c {
            '+' | '-' | '*' | '/' | '^' => TokenKind::Operator,
            '=' | '<' | '>' if self.options.comparisons => TokenKind::Operator,
            '(' => TokenKind::ParenOpen,
            ')' => TokenKind::ParenClose,
            ',' | ';' => TokenKind::ArgumentSeparator,
            _ => TokenKind::Unknown,
        };
        let text = if kind == TokenKind::ArgumentSeparator {
            ",".to_string()
        } else {
            c.to_string()
        };
        Some(self.token(kind, text, start))
    }

    fn scan_number(&mut self) -> Token {
        let start = self.pos;
        let mut seen_separator = false;

        while let Some(c) = self.peek_char() {
            if c.is_ascii_digit() {
                self.advance();
            } else if !seen_separator
                && self.options.decimal_separators.accepts(c)
                && self.peek_char_at(1).map_or(false, |n| n.is_ascii_digit())
            {
                seen_separator = true;
                self.advance();
            } else {
                break;
            }
        }

        self.token(TokenKind::Number, &self.input[start..self.pos], start)
    }

    fn scan_identifier(&mut self) -> Token {
        let start = self.pos;

        while self
            .peek_char()
            .map_or(false, |c| c.is_alphanumeric() || c == '_' || c == '$')
        {
            self.advance();
        }

        let name: String = self.input[start..self.pos]
            .chars()
            .filter(|&c| c != '$')
            .collect::<String>()
            .to_uppercase();

        if name.is_empty() {
            return self.token(TokenKind::Unknown, "$", start);
        }

        // Function names are followed by '(' once whitespace is skipped
        let kind = if self.input[self.pos..].trim_start().starts_with('(') {
            TokenKind::FunctionName
        } else {
            TokenKind::CellReference
        };

        self.token(kind, name, start)
    }

    // === Helper methods ===

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_char_at(&self, offset: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(offset)
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().map_or(false, |c| c.is_whitespace()) {
            self.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::DecimalSeparators;
    use pretty_assertions::assert_eq;

    fn kinds(formula: &str) -> Vec<TokenKind> {
        tokenize(formula).into_iter().map(|t| t.kind).collect()
    }

    fn texts(formula: &str) -> Vec<String> {
        tokenize(formula).into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn test_leading_equals_skipped_once() {
        assert_eq!(texts("=A1"), vec!["A1"]);
        assert_eq!(texts("A1"), vec!["A1"]);
        assert_eq!(kinds("==A1"), vec![TokenKind::Operator, TokenKind::CellReference]);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(texts("=42"), vec!["42"]);
        assert_eq!(texts("=3.14"), vec!["3.14"]);
        assert_eq!(kinds("=3.14"), vec![TokenKind::Number]);
    }

    #[test]
    fn test_comma_separates_arguments_by_default() {
        assert_eq!(texts("=SUM(1,2)"), vec!["SUM", "(", "1", ",", "2", ")"]);
        assert_eq!(
            kinds("=SE(A1>0,1,-1)"),
            vec![
                TokenKind::FunctionName,
                TokenKind::ParenOpen,
                TokenKind::CellReference,
                TokenKind::Operator,
                TokenKind::Number,
                TokenKind::ArgumentSeparator,
                TokenKind::Number,
                TokenKind::ArgumentSeparator,
                TokenKind::Operator,
                TokenKind::Number,
                TokenKind::ParenClose,
            ]
        );
    }

    #[test]
    fn test_comma_decimals_with_semicolon_arguments() {
        let comma = TokenizerOptions {
            decimal_separators: DecimalSeparators::Comma,
            ..Default::default()
        };
        let texts: Vec<String> = tokenize_with_options("=SUM(1,5;2)", &comma)
            .into_iter()
            .map(|t| t.text)
            .collect();
        assert_eq!(texts, vec!["SUM", "(", "1,5", ",", "2", ")"]);

        let both = TokenizerOptions {
            decimal_separators: DecimalSeparators::Both,
            ..Default::default()
        };
        let tokens = tokenize_with_options("=3,14", &both);
        assert_eq!(tokens, vec![Token::new(TokenKind::Number, "3,14")]);
    }

    #[test]
    fn test_offsets() {
        let tokens = tokenize("=A1 <= 10");
        let offsets: Vec<usize> = tokens.iter().map(|t| t.offset).collect();
        assert_eq!(offsets, vec![1, 4, 5, 7]);
        assert!(tokens[1].adjoins(&tokens[2]));
        assert!(!tokens[0].adjoins(&tokens[1]));

        let tokens = tokenize("SQRT($a$1)");
        assert_eq!(tokens[2].offset, 5);
    }

    #[test]
    fn test_trailing_separator_is_not_decimal() {
        assert_eq!(
            kinds("=SUM(1,A1)"),
            vec![
                TokenKind::FunctionName,
                TokenKind::ParenOpen,
                TokenKind::Number,
                TokenKind::ArgumentSeparator,
                TokenKind::CellReference,
                TokenKind::ParenClose,
            ]
        );
        // "1." followed by nothing: the point is not part of the number
        assert_eq!(kinds("=1."), vec![TokenKind::Number, TokenKind::Unknown]);
    }

    #[test]
    fn test_single_decimal_separator() {
        assert_eq!(texts("=1.2.3"), vec!["1.2", ".", "3"]);
        assert_eq!(
            kinds("=1.2.3"),
            vec![TokenKind::Number, TokenKind::Unknown, TokenKind::Number]
        );
    }

    #[test]
    fn test_decimal_separator_policy() {
        let point = TokenizerOptions {
            decimal_separators: DecimalSeparators::Point,
            ..Default::default()
        };
        let tokens = tokenize_with_options("=3,5", &point);
        assert_eq!(
            tokens,
            vec![
                Token::new(TokenKind::Number, "3"),
                Token::new(TokenKind::ArgumentSeparator, ","),
                Token::new(TokenKind::Number, "5"),
            ]
        );

        let comma = TokenizerOptions {
            decimal_separators: DecimalSeparators::Comma,
            ..Default::default()
        };
        let tokens = tokenize_with_options("=3.5", &comma);
        assert_eq!(tokens[0], Token::new(TokenKind::Number, "3"));
        assert_eq!(tokens[1].kind, TokenKind::Unknown);
    }

    #[test]
    fn test_identifiers_canonicalized() {
        assert_eq!(texts("=$b$2+c3"), vec!["B2", "+", "C3"]);
        assert_eq!(kinds("=$b$2"), vec![TokenKind::CellReference]);
        assert_eq!(texts("=my_var1"), vec!["MY_VAR1"]);
    }

    #[test]
    fn test_function_lookahead_skips_whitespace() {
        let tokens = tokenize("=sqrt  (A1)");
        assert_eq!(tokens[0], Token::new(TokenKind::FunctionName, "SQRT"));
        assert_eq!(tokens[1].kind, TokenKind::ParenOpen);
    }

    #[test]
    fn test_unicode_function_name() {
        let tokens = tokenize("=média(A1;B1)");
        assert_eq!(tokens[0], Token::new(TokenKind::FunctionName, "MÉDIA"));
        assert_eq!(tokens[3], Token::new(TokenKind::ArgumentSeparator, ","));
    }

    #[test]
    fn test_operators_and_comparisons() {
        assert_eq!(texts("=A1<=B1"), vec!["A1", "<", "=", "B1"]);
        assert!(kinds("=1+2-3*4/5^6")
            .iter()
            .skip(1)
            .step_by(2)
            .all(|k| *k == TokenKind::Operator));
    }

    #[test]
    fn test_strict_operators() {
        let strict = TokenizerOptions {
            comparisons: false,
            ..Default::default()
        };
        let tokens = tokenize_with_options("=A1>B1", &strict);
        assert_eq!(tokens[1], Token::new(TokenKind::Unknown, ">"));
    }

    #[test]
    fn test_unknown_characters() {
        let tokens = tokenize("=A1 # B1");
        assert_eq!(tokens[1], Token::new(TokenKind::Unknown, "#"));
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn test_lone_dollar_is_unknown() {
        let tokens = tokenize("=$ + 1");
        assert_eq!(tokens[0], Token::new(TokenKind::Unknown, "$"));
    }

    #[test]
    fn test_whitespace_and_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("=").is_empty());
        assert!(tokenize("=   ").is_empty());
    }

    #[test]
    fn test_detect_variables() {
        let vars = detect_variables("=b1*A1 + a1/SQRT(C2)", &TokenizerOptions::default());
        assert_eq!(vars, vec!["A1", "B1", "C2"]);
    }
}
