//! AST → LaTeX renderer
//!
//! Children are rendered before their parent combines them. Function calls are
//! dispatched through [`notation_rule`], a static table from canonical function
//! name to the notation used for it.

use crate::ast::{BinaryOperator, FormulaExpr, UnaryOperator};
use crate::options::{DecimalStyle, RenderOptions};
use crate::renames::RenameTable;
use ahash::AHashMap;
use once_cell::sync::Lazy;

/// How a function call is typeset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotationRule {
    /// `\sqrt{a}`
    Radical,
    /// `\overline{a, b, ...}`
    Overline,
    /// `\left| a \right|`
    AbsoluteValue,
    /// `\sin\left(a\right)` and friends; carries the LaTeX operator name
    Trigonometric(&'static str),
    /// Piecewise `cases` block: condition, value if true, optional value otherwise
    Conditional,
    /// Only the first argument is kept
    PassThrough,
}

static NOTATION_RULES: Lazy<AHashMap<&'static str, NotationRule>> = Lazy::new(|| {
    let mut rules = AHashMap::new();

    for name in ["SQRT", "RAIZ"] {
        rules.insert(name, NotationRule::Radical);
    }
    for name in ["AVERAGE", "MEDIA", "MÉDIA"] {
        rules.insert(name, NotationRule::Overline);
    }
    rules.insert("ABS", NotationRule::AbsoluteValue);
    for name in ["SIN", "SEN", "SENO"] {
        rules.insert(name, NotationRule::Trigonometric("\\sin"));
    }
    rules.insert("COS", NotationRule::Trigonometric("\\cos"));
    rules.insert("TAN", NotationRule::Trigonometric("\\tan"));
    for name in ["SE", "IF"] {
        rules.insert(name, NotationRule::Conditional);
    }
    // Precision and unit conversions do not change the symbolic form
    for name in ["ARRED", "ROUND", "ROUNDUP", "ROUNDDOWN", "RADIANOS", "RADIANS"] {
        rules.insert(name, NotationRule::PassThrough);
    }

    rules
});

/// Notation rule for a function name, if it has a dedicated one
pub fn notation_rule(name: &str) -> Option<NotationRule> {
    NOTATION_RULES.get(name.to_uppercase().as_str()).copied()
}

/// Render an AST with default options
///
/// # Example
/// ```rust
/// use cellmath_formula::{parse_formula, render, RenameTable};
///
/// let ast = parse_formula("=3*A1+5").unwrap();
/// let renames: RenameTable = [("A1", "x")].into_iter().collect();
/// assert_eq!(render(&ast, &renames), "3 \\cdot x + 5");
/// ```
pub fn render(expr: &FormulaExpr, renames: &RenameTable) -> String {
    render_with_options(expr, renames, &RenderOptions::default())
}

/// Render an AST
pub fn render_with_options(
    expr: &FormulaExpr,
    renames: &RenameTable,
    options: &RenderOptions,
) -> String {
    Renderer { renames, options }.render(expr)
}

struct Renderer<'a> {
    renames: &'a RenameTable,
    options: &'a RenderOptions,
}

impl Renderer<'_> {
    fn render(&self, expr: &FormulaExpr) -> String {
        match expr {
            FormulaExpr::Number(text) => self.render_number(text),
            FormulaExpr::Variable(name) => self.renames.resolve(name),
            FormulaExpr::BinaryOp { op, left, right } => {
                let left = self.render(left);
                let right = self.render(right);
                render_binary(*op, &left, &right)
            }
            FormulaExpr::UnaryOp { op, operand } => match op {
                UnaryOperator::Negate => format!("-{}", self.render(operand)),
            },
            FormulaExpr::Function { name, args } => {
                let args: Vec<String> = args.iter().map(|arg| self.render(arg)).collect();
                render_function(name, &args)
            }
            FormulaExpr::Group(inner) => format!("\\left({}\\right)", self.render(inner)),
        }
    }

    fn render_number(&self, text: &str) -> String {
        match self.options.decimal_style {
            DecimalStyle::Comma => text.replace('.', ","),
            DecimalStyle::Point => text.replace(',', "."),
            DecimalStyle::Preserve => text.to_string(),
        }
    }
}

fn render_binary(op: BinaryOperator, left: &str, right: &str) -> String {
    match op {
        BinaryOperator::Divide => format!("\\frac{{{}}}{{{}}}", left, right),
        BinaryOperator::Multiply => format!("{} \\cdot {}", left, right),
        BinaryOperator::Power => format!("{{{}}}^{{{}}}", left, right),
        BinaryOperator::LessEqual => format!("{} \\leq {}", left, right),
        BinaryOperator::GreaterEqual => format!("{} \\geq {}", left, right),
        BinaryOperator::NotEqual => format!("{} \\neq {}", left, right),
        BinaryOperator::Add
        | BinaryOperator::Subtract
        | BinaryOperator::Equal
        | BinaryOperator::LessThan
        | BinaryOperator::GreaterThan => format!("{} {} {}", left, op.symbol(), right),
    }
}

fn render_function(name: &str, args: &[String]) -> String {
    let first = args.first().map(String::as_str).unwrap_or("");

    let Some(rule) = notation_rule(name) else {
        return format!("\\text{{{}}}({})", escape_text(name), args.join(", "));
    };

    match rule {
        NotationRule::Radical => format!("\\sqrt{{{}}}", first),
        NotationRule::Overline => {
            let body = if args.is_empty() {
                "x".to_string()
            } else {
                args.join(", ")
            };
            format!("\\overline{{{}}}", body)
        }
        NotationRule::AbsoluteValue => format!("\\left| {} \\right|", first),
        NotationRule::Trigonometric(op) => format!("{}\\left({}\\right)", op, first),
        NotationRule::Conditional => {
            let condition = args.first().map(String::as_str).unwrap_or("?");
            let if_true = args.get(1).map(String::as_str).unwrap_or("?");
            match args.get(2) {
                Some(otherwise) => format!(
                    "\\begin{{cases}} {} & \\text{{if }} {} \\\\ {} & \\text{{otherwise}} \\end{{cases}}",
                    if_true, condition, otherwise
                ),
                None => format!(
                    "\\begin{{cases}} {} & \\text{{if }} {} \\end{{cases}}",
                    if_true, condition
                ),
            }
        }
        NotationRule::PassThrough => first.to_string(),
    }
}

/// Escape characters that are special inside `\text{...}`
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\textbackslash{}"),
            '#' | '$' | '%' | '&' | '_' | '{' | '}' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '^' => escaped.push_str("\\^{}"),
            '~' => escaped.push_str("\\~{}"),
            _ => escaped.push(c),
        }
    }
    escaped
}
