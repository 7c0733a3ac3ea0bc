use std::process;

use gridcalc_core::{body_offset, lex_from, FormulaError, Token};

use crate::{print_json, report_error, OutputFormat};

/// Tokens of the formula body, positioned in the full text. A blank formula
/// or bare `=` has only the end token.
pub(crate) fn formula_tokens(expr: &str) -> Result<Vec<Token>, FormulaError> {
    match body_offset(expr) {
        Some(start) => lex_from(expr, start),
        None => Ok(vec![Token::end(expr.chars().count())]),
    }
}

pub(crate) fn cmd_tokens(expr: &str, output: OutputFormat, quiet: bool) {
    let tokens = match formula_tokens(expr) {
        Ok(tokens) => tokens,
        Err(e) => {
            report_error(&format!("error: {}", e), output, quiet);
            process::exit(1);
        }
    };
    if quiet {
        return;
    }
    match output {
        OutputFormat::Json => print_json(&tokens),
        OutputFormat::Text => {
            for token in &tokens {
                println!("{}", token);
            }
        }
    }
}
