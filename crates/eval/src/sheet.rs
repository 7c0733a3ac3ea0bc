//! In-memory grid accessor with per-cell update and full recalculation.
//!
//! A [`Sheet`] is a bounded grid of raw cell texts plus the value last
//! computed for each. It is the reference [`CellAccessor`] for hosts that do
//! not bring their own grid, and it implements the host-side update rules:
//! text that is not a formula is stored as text, formulas are checked for
//! syntax first and then evaluated against the sheet.

use gridcalc_core::{CellRef, FormulaError};
use std::collections::BTreeMap;
use std::fmt;

use crate::accessor::CellAccessor;
use crate::options::EvalOptions;
use crate::types::{CellSnapshot, Value};

// ──────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────

/// Errors addressing cells of a [`Sheet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetError {
    /// The reference is not of the form `<letters><row>`.
    InvalidReference { reference: String },
    /// The reference lies outside the sheet's rows and columns.
    OutOfBounds {
        reference: String,
        rows: usize,
        columns: usize,
    },
}

impl fmt::Display for SheetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetError::InvalidReference { reference } => {
                write!(f, "invalid cell reference: {}", reference)
            }
            SheetError::OutOfBounds {
                reference,
                rows,
                columns,
            } => write!(
                f,
                "cell {} is outside the {}x{} sheet",
                reference, rows, columns
            ),
        }
    }
}

impl std::error::Error for SheetError {}

// ──────────────────────────────────────────────
// Cells
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Cell {
    raw: String,
    value: Value,
    error: Option<FormulaError>,
}

/// Result of updating or recalculating one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellOutcome {
    pub reference: String,
    pub value: Value,
    pub error: Option<FormulaError>,
}

impl CellOutcome {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Whether a cell's raw text is evaluated rather than kept as text. A lone
/// `=` is text.
pub fn is_formula_text(raw: &str) -> bool {
    let trimmed = raw.trim_start();
    trimmed.starts_with('=') && trimmed.len() > 1
}

// ──────────────────────────────────────────────
// Sheet
// ──────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Sheet {
    rows: usize,
    columns: usize,
    cells: BTreeMap<CellRef, Cell>,
    options: EvalOptions,
}

impl Sheet {
    pub fn new(rows: usize, columns: usize) -> Self {
        Sheet {
            rows,
            columns,
            cells: BTreeMap::new(),
            options: EvalOptions::default(),
        }
    }

    pub fn with_options(mut self, options: EvalOptions) -> Self {
        self.options = options;
        self
    }

    /// Build a sheet just large enough for `entries` and recalculate it, so
    /// load order does not matter.
    pub fn load<I, R, S>(entries: I, options: EvalOptions) -> Result<Sheet, SheetError>
    where
        I: IntoIterator<Item = (R, S)>,
        R: AsRef<str>,
        S: Into<String>,
    {
        let mut sheet = Sheet::with_cells(entries, options)?;
        sheet.recalculate_all();
        Ok(sheet)
    }

    /// Build a sheet just large enough for `entries` and store every raw
    /// text without evaluating. Text cells hold their values at once;
    /// formula cells stay `Empty` until [`Sheet::recalculate_all`].
    pub fn with_cells<I, R, S>(entries: I, options: EvalOptions) -> Result<Sheet, SheetError>
    where
        I: IntoIterator<Item = (R, S)>,
        R: AsRef<str>,
        S: Into<String>,
    {
        let mut parsed = Vec::new();
        for (reference, raw) in entries {
            let at = parse_reference(reference.as_ref())?;
            parsed.push((at, raw.into()));
        }
        let rows = parsed.iter().map(|(at, _)| at.row + 1).max().unwrap_or(0);
        let columns = parsed.iter().map(|(at, _)| at.column + 1).max().unwrap_or(0);

        let mut sheet = Sheet::new(rows, columns).with_options(options);
        for (at, raw) in parsed {
            sheet.store_raw(at, raw);
        }
        Ok(sheet)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn options(&self) -> &EvalOptions {
        &self.options
    }

    /// Reference text for a zero-based row and column, e.g. `(0, 27)` → `AB1`.
    pub fn reference_of(row: usize, column: usize) -> String {
        CellRef::new(row, column).to_string()
    }

    /// Parse `reference` and check it lies within the sheet.
    pub fn locate(&self, reference: &str) -> Result<CellRef, SheetError> {
        let at = parse_reference(reference)?;
        if at.row >= self.rows || at.column >= self.columns {
            return Err(SheetError::OutOfBounds {
                reference: reference.to_string(),
                rows: self.rows,
                columns: self.columns,
            });
        }
        Ok(at)
    }

    pub fn raw(&self, reference: &str) -> Option<&str> {
        let at = self.locate(reference).ok()?;
        self.cells.get(&at).map(|c| c.raw.as_str())
    }

    /// Last computed value; `Empty` for unwritten or failed cells.
    pub fn value(&self, reference: &str) -> Option<&Value> {
        let at = self.locate(reference).ok()?;
        self.cells.get(&at).map(|c| &c.value)
    }

    pub fn error(&self, reference: &str) -> Option<&FormulaError> {
        let at = self.locate(reference).ok()?;
        self.cells.get(&at).and_then(|c| c.error.as_ref())
    }

    /// Set a cell's raw text and compute its value.
    ///
    /// Text that is not a formula is stored as [`Value::Text`]; an empty
    /// string clears the cell. Formulas are syntax-checked, then evaluated
    /// with the cell itself as the origin of the reference chain. On failure
    /// the cached value is `Empty` and the error is kept.
    pub fn update_cell(&mut self, reference: &str, raw: &str) -> Result<CellOutcome, SheetError> {
        let at = self.locate(reference)?;
        self.store_raw(at, raw.to_string());
        Ok(self.compute(at))
    }

    /// Recompute every non-empty cell in row-major order.
    pub fn recalculate_all(&mut self) -> Vec<CellOutcome> {
        let targets: Vec<CellRef> = self
            .cells
            .iter()
            .filter(|(_, c)| !c.raw.is_empty())
            .map(|(at, _)| *at)
            .collect();
        log::debug!("recalculating {} cells", targets.len());
        targets.into_iter().map(|at| self.compute(at)).collect()
    }

    fn store_raw(&mut self, at: CellRef, raw: String) {
        if raw.is_empty() {
            self.cells.remove(&at);
            return;
        }
        let cell = self.cells.entry(at).or_default();
        if !is_formula_text(&raw) {
            cell.value = Value::Text(raw.clone());
            cell.error = None;
        }
        cell.raw = raw;
    }

    fn compute(&mut self, at: CellRef) -> CellOutcome {
        let reference = at.to_string();
        let raw = self
            .cells
            .get(&at)
            .map(|c| c.raw.clone())
            .unwrap_or_default();

        let result = if raw.is_empty() {
            Ok(Value::Empty)
        } else if !is_formula_text(&raw) {
            Ok(Value::Text(raw))
        } else {
            crate::validate_syntax(&raw, None, None).into_result().and_then(|_| {
                crate::evaluate_with(&raw, Some(&*self), Some(&reference), &self.options)
                    .into_result()
            })
        };

        let (value, error) = match result {
            Ok(v) => (v, None),
            Err(e) => {
                log::debug!("cell {} failed: {}", reference, e);
                (Value::Empty, Some(e))
            }
        };
        if let Some(cell) = self.cells.get_mut(&at) {
            cell.value = value.clone();
            cell.error = error.clone();
        }
        CellOutcome {
            reference,
            value,
            error,
        }
    }
}

fn parse_reference(reference: &str) -> Result<CellRef, SheetError> {
    reference
        .parse()
        .map_err(|_| SheetError::InvalidReference {
            reference: reference.to_string(),
        })
}

impl CellAccessor for Sheet {
    /// In-grid cells always resolve, unwritten ones as empty snapshots;
    /// anything outside the grid is absent.
    fn resolve(&self, reference: &str) -> Option<CellSnapshot> {
        let at = self.locate(reference).ok()?;
        Some(match self.cells.get(&at) {
            Some(cell) => CellSnapshot::new(reference, cell.raw.clone(), cell.value.clone()),
            None => CellSnapshot::value(reference, Value::Empty),
        })
    }
}
