//! gridcalc-core: the formula language front end.
//!
//! - [`lexer`] turns expression text into [`Token`]s
//! - [`cursor`] walks a token stream for the recursive-descent passes
//! - [`syntax`] is the syntax-only validation pass
//! - [`reference`] encodes and decodes cell references (`A1`, `AB12`)
//! - [`function`] lists the built-in functions and their arities
//! - [`error`] is the error taxonomy shared with the evaluator

pub mod cursor;
pub mod error;
pub mod function;
pub mod lexer;
pub mod reference;
pub mod syntax;
pub mod token;

pub use cursor::{body_offset, Cursor};
pub use error::{ErrorCategory, FormulaError};
pub use function::{Arity, Function};
pub use lexer::{lex, lex_from};
pub use reference::{column_index_of, column_name_of, CellRef};
pub use token::{Token, TokenKind};
