//! Formula parser
//!
//! A recursive descent parser over the token stream with a fixed precedence ladder.
//! Every binary level builds a left-leaning chain; `^` does too unless
//! [`PowerAssociativity::Right`] is selected.

use crate::ast::{BinaryOperator, FormulaExpr, UnaryOperator};
use crate::error::{FormulaError, FormulaResult};
use crate::options::{ParserOptions, PowerAssociativity, TokenizerOptions};
use crate::token::{Token, TokenKind};
use crate::tokenizer::tokenize_with_options;

/// Parse a formula string into an AST
///
/// Unknown characters are reported as [`FormulaError::InvalidCharacter`] before any
/// parsing happens.
///
/// # Example
/// ```rust
/// use cellmath_formula::parse_formula;
///
/// let ast = parse_formula("=1+2").unwrap();
/// let ast = parse_formula("=SQRT(A1^2+B1^2)").unwrap();
/// let ast = parse_formula("=IF(A1>0,1,-1)").unwrap();
/// assert!(parse_formula("=(A1+B1").is_err());
/// ```
pub fn parse_formula(formula: &str) -> FormulaResult<FormulaExpr> {
    let tokens = tokenize_with_options(formula, &TokenizerOptions::default());
    if let Some(bad) = first_unknown(&tokens) {
        return Err(FormulaError::InvalidCharacter(bad));
    }
    parse(&tokens)
}

/// Parse a token stream with default options
pub fn parse(tokens: &[Token]) -> FormulaResult<FormulaExpr> {
    parse_with_options(tokens, &ParserOptions::default())
}

/// Parse a token stream
///
/// [`TokenKind::Unknown`] tokens are dropped before parsing; callers are expected to
/// have reported them already.
pub fn parse_with_options(tokens: &[Token], options: &ParserOptions) -> FormulaResult<FormulaExpr> {
    let tokens: Vec<&Token> = tokens
        .iter()
        .filter(|t| t.kind != TokenKind::Unknown)
        .collect();

    let mut parser = FormulaParser::new(tokens, options);
    let expr = parser.parse_expression()?;

    // Make sure we consumed all input
    if let Some(token) = parser.peek() {
        return Err(FormulaError::syntax(format!("Unexpected token: {}", token)));
    }

    Ok(expr)
}

/// First unrecognized character in a token stream
pub(crate) fn first_unknown(tokens: &[Token]) -> Option<char> {
    tokens
        .iter()
        .find(|t| t.kind == TokenKind::Unknown)
        .and_then(|t| t.text.chars().next())
}

/// Formula parser
struct FormulaParser<'a> {
    tokens: Vec<&'a Token>,
    pos: usize,
    depth: usize,
    options: &'a ParserOptions,
}

impl<'a> FormulaParser<'a> {
    fn new(tokens: Vec<&'a Token>, options: &'a ParserOptions) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
            options,
        }
    }

    // === Helper methods ===

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<&'a Token> {
        self.tokens.get(self.pos + offset).copied()
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    fn peek_is_operator(&self, symbol: &str) -> bool {
        self.peek().map_or(false, |t| t.is_operator(symbol))
    }

    fn consume(&mut self) -> Option<&'a Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, kind: TokenKind, message: impl FnOnce() -> String) -> FormulaResult<()> {
        if self.peek_kind() == Some(kind) {
            self.consume();
            Ok(())
        } else {
            Err(FormulaError::Syntax(message()))
        }
    }

    /// Run `f` one nesting level deeper, enforcing the depth limit
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> FormulaResult<T>) -> FormulaResult<T> {
        if self.depth >= self.options.max_depth {
            return Err(FormulaError::syntax(format!(
                "Maximum nesting depth of {} exceeded",
                self.options.max_depth
            )));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    // === Expression parsing with precedence ===
    // Precedence (lowest to highest):
    // 1. Comparison: =, <>, <, <=, >, >=
    // 2. Addition/Subtraction: +, -
    // 3. Multiplication/Division: *, /
    // 4. Exponentiation: ^
    // 5. Primary: numbers, references, function calls, parentheses, unary minus

    fn parse_expression(&mut self) -> FormulaResult<FormulaExpr> {
        self.parse_comparison()
    }

    /// Comparison operator at the cursor and how many tokens it spans.
    /// `<=`, `>=` and `<>` arrive as two single-character tokens and are fused
    /// only when nothing separates them in the source.
    fn peek_comparison(&self) -> Option<(BinaryOperator, usize)> {
        let token = self.peek()?;
        if token.kind != TokenKind::Operator {
            return None;
        }
        let next = self.peek_at(1).filter(|next| token.adjoins(next));
        let next_is = |symbol: &str| next.map_or(false, |t| t.is_operator(symbol));

        match token.text.as_str() {
            "=" => Some((BinaryOperator::Equal, 1)),
            "<" if next_is("=") => Some((BinaryOperator::LessEqual, 2)),
            "<" if next_is(">") => Some((BinaryOperator::NotEqual, 2)),
            "<" => Some((BinaryOperator::LessThan, 1)),
            ">" if next_is("=") => Some((BinaryOperator::GreaterEqual, 2)),
            ">" => Some((BinaryOperator::GreaterThan, 1)),
            _ => None,
        }
    }

    fn parse_comparison(&mut self) -> FormulaResult<FormulaExpr> {
        let mut left = self.parse_additive()?;

        while let Some((op, width)) = self.peek_comparison() {
            self.pos += width;
            let right = self.parse_additive()?;
            left = FormulaExpr::binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_additive(&mut self) -> FormulaResult<FormulaExpr> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = if self.peek_is_operator("+") {
                BinaryOperator::Add
            } else if self.peek_is_operator("-") {
                BinaryOperator::Subtract
            } else {
                break;
            };

            self.consume();
            let right = self.parse_multiplicative()?;
            left = FormulaExpr::binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> FormulaResult<FormulaExpr> {
        let mut left = self.parse_exponent()?;

        loop {
            let op = if self.peek_is_operator("*") {
                BinaryOperator::Multiply
            } else if self.peek_is_operator("/") {
                BinaryOperator::Divide
            } else {
                break;
            };

            self.consume();
            let right = self.parse_exponent()?;
            left = FormulaExpr::binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_exponent(&mut self) -> FormulaResult<FormulaExpr> {
        match self.options.power_associativity {
            PowerAssociativity::Left => {
                let mut left = self.parse_primary()?;
                while self.peek_is_operator("^") {
                    self.consume();
                    let right = self.parse_primary()?;
                    left = FormulaExpr::binary(BinaryOperator::Power, left, right);
                }
                Ok(left)
            }
            PowerAssociativity::Right => {
                let left = self.parse_primary()?;
                if self.peek_is_operator("^") {
                    self.consume();
                    let right = self.nested(|p| p.parse_exponent())?;
                    return Ok(FormulaExpr::binary(BinaryOperator::Power, left, right));
                }
                Ok(left)
            }
        }
    }

    fn parse_primary(&mut self) -> FormulaResult<FormulaExpr> {
        self.nested(|p| p.parse_primary_inner())
    }

    fn parse_primary_inner(&mut self) -> FormulaResult<FormulaExpr> {
        let token = self
            .peek()
            .ok_or_else(|| FormulaError::syntax("Unexpected end of formula"))?;

        match token.kind {
            TokenKind::Number => {
                self.consume();
                Ok(FormulaExpr::Number(token.text.clone()))
            }

            TokenKind::CellReference => {
                self.consume();
                Ok(FormulaExpr::Variable(token.text.clone()))
            }

            TokenKind::FunctionName => {
                self.consume();
                self.parse_function_call(&token.text)
            }

            TokenKind::ParenOpen => {
                self.consume();
                let expr = self.parse_expression()?;
                self.expect(TokenKind::ParenClose, || {
                    "Expected ')' to close '('".to_string()
                })?;
                Ok(FormulaExpr::Group(Box::new(expr)))
            }

            TokenKind::Operator if token.text == "-" => {
                self.consume();
                let operand = self.parse_primary()?;
                Ok(FormulaExpr::UnaryOp {
                    op: UnaryOperator::Negate,
                    operand: Box::new(operand),
                })
            }

            _ => Err(FormulaError::syntax(format!("Unexpected token: {}", token))),
        }
    }

    fn parse_function_call(&mut self, name: &str) -> FormulaResult<FormulaExpr> {
        self.expect(TokenKind::ParenOpen, || format!("Expected '(' after {}", name))?;

        let mut args = Vec::new();

        // Parse arguments
        if self.peek_kind() != Some(TokenKind::ParenClose) {
            args.push(self.parse_expression()?);

            while self.peek_kind() == Some(TokenKind::ArgumentSeparator) {
                self.consume();
                args.push(self.parse_expression()?);
            }
        }

        self.expect(TokenKind::ParenClose, || {
            format!("Expected ')' after arguments of {}", name)
        })?;

        Ok(FormulaExpr::Function {
            name: name.to_uppercase(),
            args,
        })
    }
}
