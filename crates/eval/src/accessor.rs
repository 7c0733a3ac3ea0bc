//! The cell-accessor capability.
//!
//! The evaluator never owns grid data: callers hand it something that can
//! look a reference up, and it only ever reads through it.

use std::collections::{BTreeMap, HashMap};

use crate::types::CellSnapshot;

/// Read-only lookup of cells by reference (`"A1"`, `"AB12"`).
pub trait CellAccessor {
    /// The cell named by `reference`, or `None` if there is no such cell.
    fn resolve(&self, reference: &str) -> Option<CellSnapshot>;
}

impl<T: CellAccessor + ?Sized> CellAccessor for &T {
    fn resolve(&self, reference: &str) -> Option<CellSnapshot> {
        (**self).resolve(reference)
    }
}

impl CellAccessor for HashMap<String, CellSnapshot> {
    fn resolve(&self, reference: &str) -> Option<CellSnapshot> {
        self.get(reference).cloned()
    }
}

impl CellAccessor for BTreeMap<String, CellSnapshot> {
    fn resolve(&self, reference: &str) -> Option<CellSnapshot> {
        self.get(reference).cloned()
    }
}

/// Build a map accessor from `(reference, raw text)` pairs. Raw text starting
/// with `=` becomes a formula cell, anything else a text cell.
pub fn cells_from_raw<I, R, S>(entries: I) -> HashMap<String, CellSnapshot>
where
    I: IntoIterator<Item = (R, S)>,
    R: Into<String>,
    S: Into<String>,
{
    entries
        .into_iter()
        .map(|(reference, raw)| {
            let reference = reference.into();
            let raw = raw.into();
            let snapshot = if raw.trim_start().starts_with('=') {
                CellSnapshot::formula(reference.clone(), raw)
            } else {
                CellSnapshot::text(reference.clone(), raw)
            };
            (reference, snapshot)
        })
        .collect()
}
