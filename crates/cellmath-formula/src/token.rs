//! Lexical tokens

use std::fmt;

/// Token kinds produced by the tokenizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Decimal literal, kept as source text
    Number,
    /// Identifier not followed by `(`
    CellReference,
    /// One of `+ - * / ^ = < >`
    Operator,
    /// Identifier followed by `(`
    FunctionName,
    ParenOpen,
    ParenClose,
    /// `,` or `;` outside a number
    ArgumentSeparator,
    /// Any character the tokenizer does not recognize
    Unknown,
}

impl TokenKind {
    /// Upper-case name used in listings
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Number => "NUMBER",
            TokenKind::CellReference => "CELL_REFERENCE",
            TokenKind::Operator => "OPERATOR",
            TokenKind::FunctionName => "FUNCTION_NAME",
            TokenKind::ParenOpen => "PAREN_OPEN",
            TokenKind::ParenClose => "PAREN_CLOSE",
            TokenKind::ArgumentSeparator => "ARGUMENT_SEPARATOR",
            TokenKind::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A token: its kind, the text it carries and where it starts
///
/// Tokens compare by kind and text only; `offset` is ignored.
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// Byte offset of the token in the formula text
    pub offset: usize,
}

impl Token {
    /// Create a token at offset 0
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self::at(kind, text, 0)
    }

    /// Create a token starting at `offset`
    pub fn at(kind: TokenKind, text: impl Into<String>, offset: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            offset,
        }
    }

    /// Whether `next` starts right where this token ends, with nothing in between
    pub fn adjoins(&self, next: &Token) -> bool {
        self.offset + self.text.len() == next.offset
    }

    /// Whether this is an operator token with the given symbol
    pub fn is_operator(&self, symbol: &str) -> bool {
        self.kind == TokenKind::Operator && self.text == symbol
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.text == other.text
    }
}

impl Eq for Token {}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
