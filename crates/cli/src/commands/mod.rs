pub(crate) mod check;
pub(crate) mod eval;
pub(crate) mod recalc;
pub(crate) mod tokens;

use std::collections::BTreeMap;
use std::path::Path;
use std::process;

use gridcalc_eval::{EvalOptions, Sheet};
use serde::Deserialize;

use crate::{report_error, OutputFormat};

/// A cell in a cells file: raw text, or a bare JSON number taken as text.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawCell {
    Text(String),
    Number(serde_json::Number),
}

impl RawCell {
    fn into_raw(self) -> String {
        match self {
            RawCell::Text(s) => s,
            RawCell::Number(n) => n.to_string(),
        }
    }
}

/// Parse a cells file: a JSON object mapping references to raw cell text.
pub(crate) fn parse_cells(content: &str) -> Result<BTreeMap<String, String>, String> {
    let cells: BTreeMap<String, RawCell> = serde_json::from_str(content).map_err(|e| {
        format!("expected an object of cell references to text or numbers: {}", e)
    })?;
    Ok(cells
        .into_iter()
        .map(|(reference, raw)| (reference, raw.into_raw()))
        .collect())
}

/// Read a cells file into a sheet sized to fit it, exiting on failure.
/// Formula cells are not evaluated yet.
pub(crate) fn load_sheet(
    path: &Path,
    options: EvalOptions,
    output: OutputFormat,
    quiet: bool,
) -> Sheet {
    let content = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("error reading file '{}': {}", path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let cells = match parse_cells(&content) {
        Ok(cells) => cells,
        Err(e) => {
            let msg = format!("error parsing cells in '{}': {}", path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    log::info!("loading {} cells from {}", cells.len(), path.display());
    match Sheet::with_cells(cells, options) {
        Ok(sheet) => sheet,
        Err(e) => {
            let msg = format!("error in '{}': {}", path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    }
}
