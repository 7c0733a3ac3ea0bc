use std::path::Path;
use std::process;

use gridcalc_eval::EvalOptions;

use super::load_sheet;
use crate::{print_json, OutputFormat};

pub(crate) fn cmd_recalc(path: &Path, options: EvalOptions, output: OutputFormat, quiet: bool) {
    let mut sheet = load_sheet(path, options, output, quiet);
    let outcomes = sheet.recalculate_all();
    let failed = outcomes.iter().filter(|o| o.is_error()).count();
    log::info!(
        "recalculated {} cells, {} failed",
        outcomes.len(),
        failed
    );

    if !quiet {
        match output {
            OutputFormat::Json => {
                let cells: Vec<serde_json::Value> = outcomes
                    .iter()
                    .map(|o| {
                        serde_json::json!({
                            "reference": o.reference,
                            "value": o.value,
                            "error": o.error.as_ref().map(|e| e.to_string()),
                        })
                    })
                    .collect();
                print_json(&serde_json::json!({
                    "rows": sheet.rows(),
                    "columns": sheet.columns(),
                    "cells": cells,
                    "failed": failed,
                }));
            }
            OutputFormat::Text => {
                for o in &outcomes {
                    match &o.error {
                        None => println!("{} = {}", o.reference, o.value),
                        Some(e) => println!("{} ! {}", o.reference, e),
                    }
                }
            }
        }
    }

    if failed > 0 {
        process::exit(1);
    }
}
