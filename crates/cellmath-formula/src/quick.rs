//! Quick textual conversion
//!
//! A cruder alternative to the tokenize/parse/render pipeline: a handful of regex
//! substitutions applied straight to the formula text. Only `SUM`, `SQRT`,
//! `AVERAGE`, `PI`, `SIN`, `COS`, `TAN` and `LOG` are recognized; everything else
//! passes through untouched. Shares no state with the AST engine.

use once_cell::sync::Lazy;
use regex::Regex;

static SUM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bSUM\s*\(([^()]*)\)").expect("valid regex"));
static SQRT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bSQRT\s*\(([^()]*)\)").expect("valid regex"));
static AVERAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bAVERAGE\s*\(([^()]*)\)").expect("valid regex"));
static PI_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bPI\s*\(\s*\)").expect("valid regex"));
static SIN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bSIN\s*\(([^()]*)\)").expect("valid regex"));
static COS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bCOS\s*\(([^()]*)\)").expect("valid regex"));
static TAN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bTAN\s*\(([^()]*)\)").expect("valid regex"));
static LOG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bLOG\s*\(([^()]*)\)").expect("valid regex"));
static SPACES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Stand-ins for the parentheses a substitution keeps, so enclosing calls still
/// match `[^()]*` on the next pass. Restored once the loop settles.
const OPEN: char = '\u{E000}';
const CLOSE: char = '\u{E001}';

/// Function substitutions, innermost calls first
static FUNCTIONS: Lazy<[(&'static Regex, &'static str); 8]> = Lazy::new(|| {
    [
        (&*PI_RE, r"\pi"),
        (&*SUM_RE, r"\sum_{${1}}"),
        (&*SQRT_RE, r"\sqrt{${1}}"),
        (&*AVERAGE_RE, r"\overline{${1}}"),
        (&*SIN_RE, "\\sin\u{E000}${1}\u{E001}"),
        (&*COS_RE, "\\cos\u{E000}${1}\u{E001}"),
        (&*TAN_RE, "\\tan\u{E000}${1}\u{E001}"),
        (&*LOG_RE, "\\log\u{E000}${1}\u{E001}"),
    ]
});

/// Literal operator replacements, longest symbols first
const OPERATORS: &[(&str, &str)] = &[
    ("<>", r" \neq "),
    ("<=", r" \leq "),
    (">=", r" \geq "),
    ("*", r" \cdot "),
];

/// Convert a formula by textual substitution
///
/// # Example
/// ```rust
/// use cellmath_formula::quick::convert_quick;
///
/// assert_eq!(convert_quick("=SQRT(SUM(A1:A3))*2"), r"\sqrt{\sum_{A1:A3}} \cdot 2");
/// ```
pub fn convert_quick(formula: &str) -> String {
    let formula = formula.trim();
    let mut text = formula.strip_prefix('=').unwrap_or(formula).replace('$', "");

    // Each pass rewrites at least one parenthesized call, so this terminates
    loop {
        let mut changed = false;
        for (re, replacement) in FUNCTIONS.iter() {
            let next = re.replace_all(&text, *replacement);
            if next != text {
                text = next.into_owned();
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    let mut text = text.replace(OPEN, "(").replace(CLOSE, ")");
    for (symbol, latex) in OPERATORS {
        text = text.replace(symbol, latex);
    }

    let text = SPACES_RE.replace_all(text.trim(), " ").into_owned();
    tracing::debug!("quick conversion of {:?} produced {:?}", formula, text);
    text
}

/// Wrap notation in an `equation` environment
pub fn wrap_equation(latex: &str) -> String {
    format!("\\begin{{equation}} {} \\end{{equation}}", latex)
}
