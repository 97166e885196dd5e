//! End-to-end tests for formula → LaTeX conversion

use cellmath::prelude::*;
use cellmath::{parse_formula, tokenize, BinaryOperator, TokenKind};
use pretty_assertions::assert_eq;

fn latex(formula: &str) -> String {
    convert(formula, &RenameTable::new())
}

/// Number text survives tokenizing unchanged
#[test]
fn test_number_literal_round_trip() {
    for text in ["0", "42", "3.14", "1000"] {
        let tokens = tokenize(text);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Number);
        assert_eq!(tokens[0].text, text);
    }

    let comma = TokenizerOptions {
        decimal_separators: DecimalSeparators::Comma,
        ..Default::default()
    };
    let tokens = cellmath::tokenize_with_options("2,5", &comma);
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].text, "2,5");

    let preserve = ConvertOptions {
        render: RenderOptions {
            decimal_style: DecimalStyle::Preserve,
        },
        ..Default::default()
    };
    assert_eq!(
        convert_with_options("=3.14", &RenameTable::new(), &preserve),
        "3.14"
    );
    assert_eq!(latex("=3.14"), "3,14");
}

/// Subtraction chains lean left
#[test]
fn test_left_associative_subtraction() {
    let ast = parse_formula("=A1-B1-C1").unwrap();
    match ast {
        FormulaExpr::BinaryOp { op, left, .. } => {
            assert_eq!(op, BinaryOperator::Subtract);
            match *left {
                FormulaExpr::BinaryOp { op, left, right } => {
                    assert_eq!(op, BinaryOperator::Subtract);
                    assert_eq!(*left, FormulaExpr::Variable("A1".into()));
                    assert_eq!(*right, FormulaExpr::Variable("B1".into()));
                }
                other => panic!("Expected BinaryOp, got {other:?}"),
            }
        }
        other => panic!("Expected BinaryOp, got {other:?}"),
    }
}

/// Multiplication binds tighter than addition
#[test]
fn test_precedence() {
    assert_eq!(latex("=2+3*4"), "2 + 3 \\cdot 4");
    assert_eq!(latex("=(2+3)*4"), "\\left(2 + 3\\right) \\cdot 4");
}

#[test]
fn test_rename_substitution() {
    let renames: RenameTable = [("A1", "x")].into_iter().collect();
    assert_eq!(convert("=3*A1+5", &renames), "3 \\cdot x + 5");
    assert_eq!(convert("=3*a1+5", &renames), "3 \\cdot x + 5");
    assert_eq!(convert("=3*$A$1+5", &renames), "3 \\cdot x + 5");
}

#[test]
fn test_division_is_fraction() {
    assert_eq!(latex("=A1/B1"), "\\frac{A1}{B1}");
    assert_eq!(latex("=A1/B1/C1"), "\\frac{\\frac{A1}{B1}}{C1}");
}

#[test]
fn test_unknown_character_short_circuit() {
    assert_eq!(latex("=A1#"), "\\text{Invalid character: \\#}");
    // Would be a syntax error if parsed
    assert_eq!(latex("=(A1 + @"), "\\text{Invalid character: @}");
    assert_eq!(
        try_convert("=A1:A3", &RenameTable::new(), &ConvertOptions::default()),
        Err(FormulaError::InvalidCharacter(':'))
    );
}

#[test]
fn test_unbalanced_parentheses() {
    let out = latex("=(A1+B1");
    assert!(out.starts_with("\\text{Error: "), "{out}");
    assert!(out.contains("')'"), "{out}");
}

#[test]
fn test_sqrt_dispatch() {
    assert_eq!(latex("=SQRT(A1^2+B1^2)"), "\\sqrt{{A1}^{2} + {B1}^{2}}");
}

#[test]
fn test_conditional_rows() {
    let two_rows = latex("=SE(A1>0,1,-1)");
    assert_eq!(
        two_rows,
        "\\begin{cases} 1 & \\text{if } A1 > 0 \\\\ -1 & \\text{otherwise} \\end{cases}"
    );
    assert_eq!(two_rows.matches("\\\\").count(), 1);

    assert_eq!(latex("=SE(A1>0;1;-1)"), two_rows);

    let one_row = latex("=SE(A1>0,1)");
    assert_eq!(one_row, "\\begin{cases} 1 & \\text{if } A1 > 0 \\end{cases}");
    assert!(!one_row.contains("otherwise"));
}

#[test]
fn test_pass_through_is_idempotent() {
    assert_eq!(latex("=ARRED(A1,2)"), latex("=A1"));
    assert_eq!(latex("=ROUND(A1/B1;2)"), latex("=A1/B1"));
}

#[test]
fn test_comma_separates_arguments_by_default() {
    assert_eq!(latex("=SUM(1,2)"), "\\text{SUM}(1, 2)");
    assert_eq!(latex("=SUM(1;2)"), "\\text{SUM}(1, 2)");
    assert_eq!(
        parse_formula("=SUM(1,2)").unwrap(),
        FormulaExpr::Function {
            name: "SUM".into(),
            args: vec![
                FormulaExpr::Number("1".into()),
                FormulaExpr::Number("2".into()),
            ],
        }
    );
}

#[test]
fn test_semicolon_arguments_with_comma_decimals() {
    let options = ConvertOptions {
        tokenizer: TokenizerOptions {
            decimal_separators: DecimalSeparators::Comma,
            ..Default::default()
        },
        ..Default::default()
    };
    assert_eq!(
        convert_with_options("=MÉDIA(1,5;2,5)", &RenameTable::new(), &options),
        "\\overline{1,5, 2,5}"
    );
    assert_eq!(
        convert_with_options("=SE(A1>0,5;1;-1)", &RenameTable::new(), &options),
        "\\begin{cases} 1 & \\text{if } A1 > 0,5 \\\\ -1 & \\text{otherwise} \\end{cases}"
    );
}

#[test]
fn test_right_associative_power_flag() {
    let options = ConvertOptions {
        parser: ParserOptions {
            power_associativity: PowerAssociativity::Right,
            ..Default::default()
        },
        ..Default::default()
    };
    assert_eq!(
        convert_with_options("=2^3^4", &RenameTable::new(), &options),
        "{2}^{{3}^{4}}"
    );
    assert_eq!(latex("=2^3^4"), "{{2}^{3}}^{4}");
}

#[test]
fn test_depth_guard() {
    let formula = format!("={}A1{}", "SQRT(".repeat(100), ")".repeat(100));
    assert_eq!(
        latex(&formula),
        "\\text{Error: Maximum nesting depth of 64 exceeded}"
    );

    let options = ConvertOptions {
        parser: ParserOptions {
            max_depth: 200,
            ..Default::default()
        },
        ..Default::default()
    };
    let out = convert_with_options(&formula, &RenameTable::new(), &options);
    assert!(out.starts_with("\\sqrt{\\sqrt{"));
}

#[test]
fn test_strict_operator_set() {
    let options = ConvertOptions {
        tokenizer: TokenizerOptions {
            comparisons: false,
            ..Default::default()
        },
        ..Default::default()
    };
    assert_eq!(
        convert_with_options("=A1>0", &RenameTable::new(), &options),
        "\\text{Invalid character: >}"
    );
}

#[test]
fn test_mixed_formula() {
    let renames: RenameTable = [("A1", "a"), ("B1", "b"), ("C1", "c")].into_iter().collect();
    assert_eq!(
        convert("=(-B1+RAIZ(B1^2-4*A1*C1))/(2*A1)", &renames),
        "\\frac{\\left(-b + \\sqrt{{b}^{2} - 4 \\cdot a \\cdot c}\\right)}{\\left(2 \\cdot a\\right)}"
    );
}
