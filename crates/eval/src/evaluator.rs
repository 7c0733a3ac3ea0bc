//! Recursive-descent evaluator.
//!
//! Parses and computes in one pass over the token stream; no syntax tree is
//! built. Precedence from loosest to tightest: one optional comparison,
//! additive chain, multiplicative chain, factor.
//!
//! A cell reference whose raw text is a formula is evaluated by a fresh
//! evaluator over that text, sharing the caller's [`ResolutionChain`].

use gridcalc_core::{body_offset, Cursor, FormulaError, Function, TokenKind};
use rust_decimal::Decimal;
use std::cmp::Ordering;

use crate::accessor::CellAccessor;
use crate::chain::ResolutionChain;
use crate::numeric;
use crate::options::EvalOptions;
use crate::types::Value;

/// Evaluate `text` with an existing resolution chain.
///
/// Blank text and a bare `=` evaluate to [`Value::Empty`]. The chain is left
/// exactly as it was found, whether evaluation succeeds or fails.
pub fn evaluate_in(
    text: &str,
    accessor: Option<&dyn CellAccessor>,
    options: &EvalOptions,
    chain: &mut ResolutionChain,
) -> Result<Value, FormulaError> {
    let Some(start) = body_offset(text) else {
        return Ok(Value::Empty);
    };
    let mut evaluator = Evaluator {
        cursor: Cursor::lex_from(text, start)?,
        accessor,
        options,
        chain,
    };
    let value = evaluator.comparison()?;
    evaluator.cursor.finish()?;
    Ok(value)
}

struct Evaluator<'a> {
    cursor: Cursor,
    accessor: Option<&'a dyn CellAccessor>,
    options: &'a EvalOptions,
    chain: &'a mut ResolutionChain,
}

impl<'a> Evaluator<'a> {
    // -- Operators ----------------------------------------------

    fn comparison(&mut self) -> Result<Value, FormulaError> {
        let left = self.addition()?;
        let op = self.cursor.peek();
        if !op.is_comparison() {
            return Ok(left);
        }
        self.cursor.advance();
        let right = self.addition()?;

        let ordering = numeric::compare(&left, &right);
        let result = match op {
            TokenKind::Equal => ordering == Ordering::Equal,
            TokenKind::Less => ordering == Ordering::Less,
            _ => ordering == Ordering::Greater,
        };
        Ok(Value::Boolean(result))
    }

    fn addition(&mut self) -> Result<Value, FormulaError> {
        let mut left = self.term()?;
        while matches!(self.cursor.peek(), TokenKind::Plus | TokenKind::Minus) {
            let op = self.cursor.advance();
            let right = self.term()?;
            left = Value::Number(match op.kind {
                TokenKind::Plus => numeric::add(&left, &right, op.position)?,
                _ => numeric::subtract(&left, &right, op.position)?,
            });
        }
        Ok(left)
    }

    fn term(&mut self) -> Result<Value, FormulaError> {
        let mut left = self.factor()?;
        while matches!(self.cursor.peek(), TokenKind::Multiply | TokenKind::Divide) {
            let op = self.cursor.advance();
            let right = self.factor()?;
            left = Value::Number(match op.kind {
                TokenKind::Multiply => numeric::multiply(&left, &right, op.position)?,
                _ => numeric::divide(&left, &right, op.position)?,
            });
        }
        Ok(left)
    }

    fn factor(&mut self) -> Result<Value, FormulaError> {
        match self.cursor.peek() {
            TokenKind::Number => {
                let tok = self.cursor.advance();
                Ok(Value::Number(numeric::parse_literal(
                    &tok.lexeme,
                    tok.position,
                )?))
            }
            TokenKind::CellReference => self.reference(),
            TokenKind::Function => self.function_call(),
            TokenKind::Not => {
                self.cursor.advance();
                let operand = self.factor()?;
                Ok(Value::Boolean(!numeric::to_boolean(&operand)))
            }
            TokenKind::LeftParen => {
                self.cursor.advance();
                let value = self.comparison()?;
                self.cursor.expect(TokenKind::RightParen)?;
                Ok(value)
            }
            _ => Err(self.cursor.unexpected()),
        }
    }

    // -- Functions ----------------------------------------------

    fn function_call(&mut self) -> Result<Value, FormulaError> {
        let name = self.cursor.expect(TokenKind::Function)?;
        let function = Function::lookup(&name.lexeme, name.position)?;
        self.cursor.expect(TokenKind::LeftParen)?;

        let mut args = Vec::new();
        if !self.cursor.at(TokenKind::RightParen) {
            args.push(self.comparison()?);
            while self.cursor.at(TokenKind::Comma) {
                self.cursor.advance();
                args.push(self.comparison()?);
            }
        }
        self.cursor.expect(TokenKind::RightParen)?;
        function.check_arity(args.len(), name.position)?;

        let numbers = args.iter().map(numeric::to_number);
        let result = match function {
            Function::Max | Function::MMax => numbers.max(),
            Function::Min | Function::MMin => numbers.min(),
        };
        Ok(Value::Number(result.unwrap_or(Decimal::ZERO)))
    }

    // -- Cell references ----------------------------------------

    fn reference(&mut self) -> Result<Value, FormulaError> {
        let tok = self.cursor.expect(TokenKind::CellReference)?;
        let (reference, position) = (tok.lexeme, tok.position);

        self.chain.check(&reference, position)?;
        let accessor = self.accessor.ok_or_else(|| FormulaError::NoContext {
            reference: reference.clone(),
            position,
        })?;
        let cell = accessor
            .resolve(&reference)
            .ok_or_else(|| FormulaError::CellNotFound {
                reference: reference.clone(),
                position,
            })?;

        if !cell.is_formula() {
            return Ok(cell.cached_value);
        }

        if self.chain.len() >= self.options.max_depth {
            log::debug!(
                "reference chain {:?} hit max depth {} at {}",
                self.chain.references(),
                self.options.max_depth,
                reference
            );
            return Err(FormulaError::DepthExceeded {
                reference,
                max_depth: self.options.max_depth,
                position,
            });
        }

        self.chain.enter(&reference, position)?;
        log::trace!("resolving {} = {:?}", reference, cell.raw_expression);
        let result = evaluate_in(
            &cell.raw_expression,
            self.accessor,
            self.options,
            self.chain,
        );
        self.chain.leave(&reference);

        result.map_err(|inner| FormulaError::Nested {
            reference,
            position,
            inner: Box::new(inner),
        })
    }
}
