use std::path::Path;
use std::process;

use gridcalc_eval::{CellAccessor, EvalOptions, ParseResult};

use super::load_sheet;
use crate::{print_json, report_error, OutputFormat};

pub(crate) fn cmd_eval(
    expr: &str,
    cells_path: Option<&Path>,
    origin: Option<&str>,
    options: EvalOptions,
    output: OutputFormat,
    quiet: bool,
) {
    let sheet = cells_path.map(|path| load_sheet(path, options.clone(), output, quiet));
    let accessor = sheet.as_ref().map(|s| s as &dyn CellAccessor);

    let result = gridcalc_eval::evaluate_with(expr, accessor, origin, &options);
    log::debug!("evaluated {:?}: success={}", expr, result.success);
    report_result(&result, output, quiet);
    if !result.success {
        process::exit(1);
    }
}

/// Print a [`ParseResult`]: the value on stdout, or the error the way other
/// failures are reported. JSON output always goes to stdout in full.
pub(crate) fn report_result(result: &ParseResult, output: OutputFormat, quiet: bool) {
    match output {
        OutputFormat::Json => {
            if !quiet {
                print_json(result);
            }
        }
        OutputFormat::Text => match (&result.value, &result.error_message) {
            (Some(value), _) => {
                if !quiet {
                    println!("{}", value);
                }
            }
            (None, Some(message)) => {
                let msg = format!(
                    "error: {} (position {})",
                    message, result.error_position
                );
                report_error(&msg, output, quiet);
            }
            (None, None) => {}
        },
    }
}
