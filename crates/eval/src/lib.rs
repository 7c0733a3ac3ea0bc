//! gridcalc formula evaluator -- evaluates formula text against a
//! caller-supplied cell accessor, producing a [`ParseResult`].
//!
//! Formulas are lexed by `gridcalc-core` and evaluated in one recursive
//! descent, resolving cell references through the accessor. References to
//! other formulas are evaluated recursively under a [`ResolutionChain`] that
//! rejects cycles and bounds the chain length.
//!
//! Neither entry point panics or returns `Err`: every failure is folded into
//! the returned [`ParseResult`]. Nothing is cached between calls, so the same
//! text against unchanged cells always yields the same result.

pub mod accessor;
pub mod chain;
pub mod evaluator;
pub mod numeric;
pub mod options;
pub mod sheet;
pub mod types;

pub use accessor::{cells_from_raw, CellAccessor};
pub use chain::ResolutionChain;
pub use gridcalc_core::{ErrorCategory, FormulaError};
pub use options::{EvalOptions, DEFAULT_MAX_DEPTH};
pub use sheet::{CellOutcome, Sheet, SheetError};
pub use types::{CellSnapshot, ParseResult, Value};

/// Evaluate formula text with default options.
///
/// # Arguments
/// * `text` - Expression, with or without a leading `=`
/// * `accessor` - Cell lookup for references; `None` makes any reference fail
/// * `origin` - Reference of the cell that holds `text`, if any. Seeds cycle
///   detection so a formula naming its own cell fails immediately.
pub fn evaluate(
    text: &str,
    accessor: Option<&dyn CellAccessor>,
    origin: Option<&str>,
) -> ParseResult {
    evaluate_with(text, accessor, origin, &EvalOptions::default())
}

/// [`evaluate`] with explicit options.
pub fn evaluate_with(
    text: &str,
    accessor: Option<&dyn CellAccessor>,
    origin: Option<&str>,
    options: &EvalOptions,
) -> ParseResult {
    let mut chain = ResolutionChain::seeded(origin);
    evaluator::evaluate_in(text, accessor, options, &mut chain).into()
}

/// Check formula text for grammatical well-formedness only.
///
/// Succeeds with `Boolean(true)` for a well-formed formula and `Empty` for
/// blank text or a bare `=`. Takes the same arguments as [`evaluate`], but
/// the accessor and origin are never consulted, so division by zero,
/// missing cells and cycles pass this check; run [`evaluate`] as well for
/// those.
pub fn validate_syntax(
    text: &str,
    _accessor: Option<&dyn CellAccessor>,
    _origin: Option<&str>,
) -> ParseResult {
    match gridcalc_core::syntax::check(text) {
        Ok(()) if gridcalc_core::body_offset(text).is_none() => ParseResult::success(Value::Empty),
        Ok(()) => ParseResult::success(Value::Boolean(true)),
        Err(e) => ParseResult::failure(e),
    }
}

// ──────────────────────────────────────────────
// Integration tests
// ──────────────────────────────────────────────
