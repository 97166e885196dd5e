//! cellmath CLI - spreadsheet formula to LaTeX conversion

use anyhow::{bail, Context, Result};
use cellmath::prelude::*;
use cellmath::{detect_variables, format_error, quick, tokenize_with_options};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cellmath")]
#[command(
    author,
    version,
    about = "Convert spreadsheet formulas into LaTeX notation"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a formula and print the LaTeX notation
    Convert {
        /// Formula text, e.g. "=SQRT(A1^2+B1^2)"
        formula: String,

        /// Display symbol for a cell reference (repeatable), e.g. A1=x
        #[arg(short, long = "rename", value_name = "REF=SYMBOL", value_parser = parse_rename)]
        renames: Vec<(String, String)>,

        /// JSON file with a rename table ({"A1": "x"})
        #[arg(long, value_name = "FILE")]
        rename_file: Option<PathBuf>,

        /// Use regex substitutions instead of the parser
        #[arg(short, long)]
        quick: bool,

        /// Wrap the output in an equation environment
        #[arg(short, long)]
        equation: bool,

        /// Decimal separator written into numbers
        #[arg(long, value_enum, default_value = "comma")]
        decimal: DecimalArg,

        #[command(flatten)]
        input: TokenizerArgs,

        /// Group chains of ^ from the right
        #[arg(long)]
        right_assoc_power: bool,

        /// Maximum nesting depth
        #[arg(long, default_value_t = default_max_depth())]
        max_depth: usize,

        /// Exit with an error instead of printing error notation
        #[arg(long)]
        check: bool,
    },

    /// List the cell references used by a formula
    Vars {
        /// Formula text
        formula: String,

        #[command(flatten)]
        input: TokenizerArgs,
    },

    /// Print the tokens of a formula
    Tokens {
        /// Formula text
        formula: String,

        #[command(flatten)]
        input: TokenizerArgs,
    },
}

/// Flags that change how formula text is split into tokens
#[derive(Args, Clone, Copy)]
struct TokenizerArgs {
    /// Decimal separators accepted in the input
    #[arg(long, value_enum, default_value = "point")]
    separators: SeparatorsArg,

    /// Reject the comparison characters = < >
    #[arg(long)]
    strict_operators: bool,
}

impl From<TokenizerArgs> for TokenizerOptions {
    fn from(args: TokenizerArgs) -> Self {
        TokenizerOptions {
            decimal_separators: args.separators.into(),
            comparisons: !args.strict_operators,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum DecimalArg {
    Comma,
    Point,
    Preserve,
}

impl From<DecimalArg> for DecimalStyle {
    fn from(arg: DecimalArg) -> Self {
        match arg {
            DecimalArg::Comma => DecimalStyle::Comma,
            DecimalArg::Point => DecimalStyle::Point,
            DecimalArg::Preserve => DecimalStyle::Preserve,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SeparatorsArg {
    Both,
    Point,
    Comma,
}

impl From<SeparatorsArg> for DecimalSeparators {
    fn from(arg: SeparatorsArg) -> Self {
        match arg {
            SeparatorsArg::Both => DecimalSeparators::Both,
            SeparatorsArg::Point => DecimalSeparators::Point,
            SeparatorsArg::Comma => DecimalSeparators::Comma,
        }
    }
}

fn default_max_depth() -> usize {
    ParserOptions::default().max_depth
}

fn parse_rename(arg: &str) -> std::result::Result<(String, String), String> {
    let (reference, symbol) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected REF=SYMBOL, got '{}'", arg))?;
    if reference.trim().is_empty() {
        return Err(format!("missing cell reference in '{}'", arg));
    }
    Ok((reference.trim().to_string(), symbol.to_string()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            formula,
            renames,
            rename_file,
            quick,
            equation,
            decimal,
            input,
            right_assoc_power,
            max_depth,
            check,
        } => {
            let options = ConvertOptions {
                tokenizer: input.into(),
                parser: ParserOptions {
                    max_depth,
                    power_associativity: if right_assoc_power {
                        PowerAssociativity::Right
                    } else {
                        PowerAssociativity::Left
                    },
                },
                render: RenderOptions {
                    decimal_style: decimal.into(),
                },
                mode: if quick {
                    ConversionMode::Quick
                } else {
                    ConversionMode::Precise
                },
            };
            let table = load_renames(rename_file.as_ref(), renames)?;
            convert_formula(&formula, &table, &options, equation, check)
        }
        Commands::Vars { formula, input } => {
            list_variables(&formula, &TokenizerOptions::from(input))
        }
        Commands::Tokens { formula, input } => list_tokens(&formula, &TokenizerOptions::from(input)),
    }
}

fn load_renames(path: Option<&PathBuf>, overrides: Vec<(String, String)>) -> Result<RenameTable> {
    let mut table = match path {
        Some(path) => RenameTable::open(path)
            .with_context(|| format!("Failed to load renames from '{}'", path.display()))?,
        None => RenameTable::new(),
    };

    for (reference, symbol) in overrides {
        table.insert(&reference, symbol);
    }

    Ok(table)
}

fn convert_formula(
    formula: &str,
    renames: &RenameTable,
    options: &ConvertOptions,
    equation: bool,
    check: bool,
) -> Result<()> {
    let latex = match try_convert(formula, renames, options) {
        Ok(latex) => latex,
        Err(err) if check => bail!("Failed to convert '{}': {}", formula, err),
        Err(err) => format_error(&err),
    };

    if equation {
        println!("{}", quick::wrap_equation(&latex));
    } else {
        println!("{}", latex);
    }

    Ok(())
}

fn list_variables(formula: &str, options: &TokenizerOptions) -> Result<()> {
    for name in detect_variables(formula, options) {
        println!("{}", name);
    }
    Ok(())
}

fn list_tokens(formula: &str, options: &TokenizerOptions) -> Result<()> {
    let tokens = tokenize_with_options(formula, options);
    if tokens.is_empty() {
        eprintln!("Warning: Formula is empty");
    }
    for token in tokens {
        println!("{}\t{}", token.kind, token.text);
    }
    Ok(())
}
