use std::process;

use gridcalc_eval::Value;

use super::eval::report_result;
use crate::OutputFormat;

pub(crate) fn cmd_check(expr: &str, output: OutputFormat, quiet: bool) {
    let result = gridcalc_eval::validate_syntax(expr, None, None);
    if result.success && output == OutputFormat::Text {
        if !quiet {
            match &result.value {
                Some(Value::Empty) => println!("empty formula"),
                _ => println!("syntax ok"),
            }
        }
        return;
    }
    report_result(&result, output, quiet);
    if !result.success {
        process::exit(1);
    }
}
