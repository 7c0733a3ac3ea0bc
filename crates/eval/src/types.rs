//! Runtime values, cell snapshots and evaluation results.

use gridcalc_core::{ErrorCategory, FormulaError};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

// ──────────────────────────────────────────────
// Runtime values
// ──────────────────────────────────────────────

/// Result of evaluating a formula. Numbers are exact decimals, never `f64`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    Number(Decimal),
    Boolean(bool),
    Text(String),
    #[default]
    Empty,
}

impl Value {
    /// Returns a human-readable type name for messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "Number",
            Value::Boolean(_) => "Boolean",
            Value::Text(_) => "Text",
            Value::Empty => "Empty",
        }
    }

    pub fn number(n: impl Into<Decimal>) -> Self {
        Value::Number(n.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Value::Number(d)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(d) => write!(f, "{}", d.normalize()),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Text(s) => f.write_str(s),
            Value::Empty => Ok(()),
        }
    }
}

// ──────────────────────────────────────────────
// Cells
// ──────────────────────────────────────────────

/// Read-only view of a grid cell, as handed out by a
/// [`CellAccessor`](crate::accessor::CellAccessor).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellSnapshot {
    pub reference: String,
    pub raw_expression: String,
    pub cached_value: Value,
}

impl CellSnapshot {
    pub fn new(
        reference: impl Into<String>,
        raw_expression: impl Into<String>,
        cached_value: Value,
    ) -> Self {
        CellSnapshot {
            reference: reference.into(),
            raw_expression: raw_expression.into(),
            cached_value,
        }
    }

    /// A plain-text cell whose cached value is the text itself.
    pub fn text(reference: impl Into<String>, raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let cached = Value::Text(raw.clone());
        CellSnapshot::new(reference, raw, cached)
    }

    /// A formula cell with nothing cached yet.
    pub fn formula(reference: impl Into<String>, raw: impl Into<String>) -> Self {
        CellSnapshot::new(reference, raw, Value::Empty)
    }

    /// A cell holding only a cached value.
    pub fn value(reference: impl Into<String>, value: Value) -> Self {
        CellSnapshot::new(reference, "", value)
    }

    /// Whether resolving this cell means evaluating its raw expression.
    pub fn is_formula(&self) -> bool {
        self.raw_expression.trim_start().starts_with('=')
    }
}

// ──────────────────────────────────────────────
// Results
// ──────────────────────────────────────────────

/// Outcome of [`evaluate`](crate::evaluate) or
/// [`validate_syntax`](crate::validate_syntax).
///
/// Exactly one of `value` and `error_message` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub error_position: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_category: Option<ErrorCategory>,
    #[serde(skip)]
    pub error: Option<FormulaError>,
}

impl ParseResult {
    pub fn success(value: Value) -> Self {
        ParseResult {
            success: true,
            value: Some(value),
            error_message: None,
            error_position: 0,
            error_category: None,
            error: None,
        }
    }

    pub fn failure(error: FormulaError) -> Self {
        ParseResult {
            success: false,
            value: None,
            error_message: Some(error.to_string()),
            error_position: error.position(),
            error_category: Some(error.category()),
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn into_result(self) -> Result<Value, FormulaError> {
        match (self.value, self.error) {
            (Some(v), _) => Ok(v),
            (None, Some(e)) => Err(e),
            (None, None) => Ok(Value::Empty),
        }
    }
}

impl From<Result<Value, FormulaError>> for ParseResult {
    fn from(r: Result<Value, FormulaError>) -> Self {
        match r {
            Ok(v) => ParseResult::success(v),
            Err(e) => ParseResult::failure(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_display() {
        assert_eq!(Value::number(8).to_string(), "8");
        assert_eq!(
            Value::Number("2.50".parse().unwrap()).to_string(),
            "2.5"
        );
        assert_eq!(Value::Boolean(true).to_string(), "true");
        assert_eq!(Value::Text("hi".into()).to_string(), "hi");
        assert_eq!(Value::Empty.to_string(), "");
    }

    #[test]
    fn value_serializes_tagged() {
        let json = serde_json::to_value(Value::number(25)).unwrap();
        assert_eq!(json, serde_json::json!({"type": "number", "value": "25"}));
        let json = serde_json::to_value(Value::Empty).unwrap();
        assert_eq!(json, serde_json::json!({"type": "empty"}));
    }

    #[test]
    fn snapshot_formula_detection() {
        assert!(CellSnapshot::formula("A1", "  =B1").is_formula());
        assert!(!CellSnapshot::text("A1", "B1").is_formula());
        assert!(!CellSnapshot::value("A1", Value::number(3)).is_formula());
    }

    #[test]
    fn failure_fills_message_and_position() {
        let r = ParseResult::failure(FormulaError::DivisionByZero { position: 3 });
        assert!(!r.success);
        assert_eq!(r.value, None);
        assert_eq!(r.error_message.as_deref(), Some("division by zero"));
        assert_eq!(r.error_position, 3);
        assert_eq!(r.error_category, Some(ErrorCategory::Semantic));
    }

    #[test]
    fn success_serializes_without_error_fields() {
        let json = serde_json::to_value(ParseResult::success(Value::Boolean(false))).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "success": true,
                "value": {"type": "boolean", "value": false},
                "error_position": 0
            })
        );
    }
}
