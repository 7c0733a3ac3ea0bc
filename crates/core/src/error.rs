use serde::Serialize;

use crate::function::Arity;
use crate::token::TokenKind;

/// Broad class of a formula failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    Lexical,
    Syntactic,
    Semantic,
}

/// Every way lexing, parsing or evaluating a formula can fail.
///
/// Positions are character offsets into the expression text as the caller
/// supplied it (leading whitespace and `=` included).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormulaError {
    // -- Lexical --------------------------------------------------------
    #[error("unknown character '{ch}' at position {position}")]
    UnknownCharacter { ch: char, position: usize },

    #[error("unknown keyword '{word}' at position {position}")]
    UnknownKeyword { word: String, position: usize },

    /// Column letters not followed by row digits.
    #[error("malformed cell reference '{text}' at position {position}")]
    MalformedReference { text: String, position: usize },

    // -- Syntactic ------------------------------------------------------
    #[error("unexpected token {kind} '{lexeme}' at position {position}")]
    UnexpectedToken {
        kind: TokenKind,
        lexeme: String,
        position: usize,
    },

    #[error("expected {expected}, found {found} at position {position}")]
    Expected {
        expected: TokenKind,
        found: TokenKind,
        position: usize,
    },

    #[error("function {function} expects {arity}, got {got}")]
    Arity {
        function: String,
        arity: Arity,
        got: usize,
        position: usize,
    },

    #[error("unknown function '{name}'")]
    UnknownFunction { name: String, position: usize },

    // -- Semantic -------------------------------------------------------
    #[error("division by zero")]
    DivisionByZero { position: usize },

    #[error("numeric overflow: {operation}")]
    Overflow {
        operation: &'static str,
        position: usize,
    },

    #[error("no spreadsheet context to resolve cell reference {reference}")]
    NoContext { reference: String, position: usize },

    #[error("cell {reference} not found")]
    CellNotFound { reference: String, position: usize },

    /// `chain` lists the open resolutions in order, ending with the repeat.
    #[error("cyclic reference: {}", .chain.join(" → "))]
    Cyclic { chain: Vec<String>, position: usize },

    #[error("reference chain exceeds maximum depth of {max_depth} at {reference}")]
    DepthExceeded {
        reference: String,
        max_depth: usize,
        position: usize,
    },

    /// Failure inside the formula of a referenced cell. Displays the inner
    /// message unchanged.
    #[error("{inner}")]
    Nested {
        reference: String,
        position: usize,
        inner: Box<FormulaError>,
    },
}

impl FormulaError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FormulaError::UnknownCharacter { .. }
            | FormulaError::UnknownKeyword { .. }
            | FormulaError::MalformedReference { .. } => ErrorCategory::Lexical,
            FormulaError::UnexpectedToken { .. }
            | FormulaError::Expected { .. }
            | FormulaError::Arity { .. }
            | FormulaError::UnknownFunction { .. } => ErrorCategory::Syntactic,
            FormulaError::DivisionByZero { .. }
            | FormulaError::Overflow { .. }
            | FormulaError::NoContext { .. }
            | FormulaError::CellNotFound { .. }
            | FormulaError::Cyclic { .. }
            | FormulaError::DepthExceeded { .. } => ErrorCategory::Semantic,
            FormulaError::Nested { inner, .. } => inner.category(),
        }
    }

    /// Offset of the failure in the expression that raised it. For
    /// [`FormulaError::Nested`] this is the offset of the reference in the
    /// outer expression, not a position inside the referenced formula.
    pub fn position(&self) -> usize {
        match self {
            FormulaError::UnknownCharacter { position, .. }
            | FormulaError::UnknownKeyword { position, .. }
            | FormulaError::MalformedReference { position, .. }
            | FormulaError::UnexpectedToken { position, .. }
            | FormulaError::Expected { position, .. }
            | FormulaError::Arity { position, .. }
            | FormulaError::UnknownFunction { position, .. }
            | FormulaError::DivisionByZero { position }
            | FormulaError::Overflow { position, .. }
            | FormulaError::NoContext { position, .. }
            | FormulaError::CellNotFound { position, .. }
            | FormulaError::Cyclic { position, .. }
            | FormulaError::DepthExceeded { position, .. }
            | FormulaError::Nested { position, .. } => *position,
        }
    }

    /// The innermost failure, following [`FormulaError::Nested`] links.
    pub fn root(&self) -> &FormulaError {
        match self {
            FormulaError::Nested { inner, .. } => inner.root(),
            other => other,
        }
    }
}
