//! Coercion and arithmetic over `rust_decimal`.
//!
//! Every operator works on exact decimals; there is no `f64` anywhere in the
//! evaluation path. Coercions never fail: values with no numeric reading
//! become zero.

use gridcalc_core::FormulaError;
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::str::FromStr;

use crate::types::Value;

/// Numeric reading of a value. Booleans map to 1/0, numeric text parses,
/// everything else (including unparseable text) is 0.
pub fn to_number(value: &Value) -> Decimal {
    match value {
        Value::Number(d) => *d,
        Value::Boolean(true) => Decimal::ONE,
        Value::Boolean(false) => Decimal::ZERO,
        Value::Text(s) => parse_text(s).unwrap_or(Decimal::ZERO),
        Value::Empty => Decimal::ZERO,
    }
}

/// Truth of a value: booleans as-is, numbers when nonzero, all else false.
pub fn to_boolean(value: &Value) -> bool {
    match value {
        Value::Boolean(b) => *b,
        Value::Number(d) => !d.is_zero(),
        Value::Text(_) | Value::Empty => false,
    }
}

/// Plain decimal text: optional sign, digits with at most one point, and
/// surrounding whitespace. No exponents or digit separators.
fn parse_text(s: &str) -> Option<Decimal> {
    let s = s.trim();
    let (negative, body) = match s.as_bytes().first()? {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };
    let mut digits = 0;
    let mut points = 0;
    for b in body.bytes() {
        match b {
            b'0'..=b'9' => digits += 1,
            b'.' => points += 1,
            _ => return None,
        }
    }
    if digits == 0 || points > 1 {
        return None;
    }

    let mut normalized = String::with_capacity(body.len() + 2);
    if body.starts_with('.') {
        normalized.push('0');
    }
    normalized.push_str(body.trim_end_matches('.'));
    let value = Decimal::from_str(&normalized).ok()?;
    Some(if negative { -value } else { value })
}

/// Parse an integer literal lexeme. Only fails when the digits do not fit
/// in a decimal.
pub fn parse_literal(lexeme: &str, position: usize) -> Result<Decimal, FormulaError> {
    Decimal::from_str(lexeme).map_err(|_| FormulaError::Overflow {
        operation: "number literal",
        position,
    })
}

pub fn add(left: &Value, right: &Value, position: usize) -> Result<Decimal, FormulaError> {
    to_number(left)
        .checked_add(to_number(right))
        .ok_or(FormulaError::Overflow {
            operation: "addition",
            position,
        })
}

pub fn subtract(left: &Value, right: &Value, position: usize) -> Result<Decimal, FormulaError> {
    to_number(left)
        .checked_sub(to_number(right))
        .ok_or(FormulaError::Overflow {
            operation: "subtraction",
            position,
        })
}

pub fn multiply(left: &Value, right: &Value, position: usize) -> Result<Decimal, FormulaError> {
    to_number(left)
        .checked_mul(to_number(right))
        .ok_or(FormulaError::Overflow {
            operation: "multiplication",
            position,
        })
}

/// Division fails on a coerced-zero divisor.
pub fn divide(left: &Value, right: &Value, position: usize) -> Result<Decimal, FormulaError> {
    let divisor = to_number(right);
    if divisor.is_zero() {
        return Err(FormulaError::DivisionByZero { position });
    }
    to_number(left)
        .checked_div(divisor)
        .ok_or(FormulaError::Overflow {
            operation: "division",
            position,
        })
}

/// Numeric ordering of two values after coercion.
pub fn compare(left: &Value, right: &Value) -> Ordering {
    to_number(left).cmp(&to_number(right))
}
