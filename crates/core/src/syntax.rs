//! Syntax-only pass over the formula grammar.
//!
//! Walks the same rules as the evaluator without computing anything, so it
//! never touches cells and never reports division by zero, missing cells or
//! cycles. Function names and arities are checked since they are part of
//! the grammar.
//!
//! ```text
//! expr        := comparison
//! comparison  := addition [ ('=' | '<' | '>') addition ]
//! addition    := term { ('+' | '-') term }
//! term        := factor { ('*' | '/') factor }
//! factor      := NUMBER | CELLREF | function | 'not' factor | '(' expr ')'
//! function    := FNNAME '(' [ expr { ',' expr } ] ')'
//! ```

use crate::cursor::{body_offset, Cursor};
use crate::error::FormulaError;
use crate::function::Function;
use crate::token::TokenKind;

/// Check that `text` is a well-formed formula. Blank text and a bare `=`
/// are well-formed.
pub fn check(text: &str) -> Result<(), FormulaError> {
    let Some(start) = body_offset(text) else {
        return Ok(());
    };
    let mut checker = SyntaxChecker {
        cursor: Cursor::lex_from(text, start)?,
    };
    checker.expression()?;
    checker.cursor.finish()
}

struct SyntaxChecker {
    cursor: Cursor,
}

impl SyntaxChecker {
    fn expression(&mut self) -> Result<(), FormulaError> {
        self.addition()?;
        if self.cursor.peek().is_comparison() {
            self.cursor.advance();
            self.addition()?;
        }
        Ok(())
    }

    fn addition(&mut self) -> Result<(), FormulaError> {
        self.term()?;
        while matches!(self.cursor.peek(), TokenKind::Plus | TokenKind::Minus) {
            self.cursor.advance();
            self.term()?;
        }
        Ok(())
    }

    fn term(&mut self) -> Result<(), FormulaError> {
        self.factor()?;
        while matches!(self.cursor.peek(), TokenKind::Multiply | TokenKind::Divide) {
            self.cursor.advance();
            self.factor()?;
        }
        Ok(())
    }

    fn factor(&mut self) -> Result<(), FormulaError> {
        match self.cursor.peek() {
            TokenKind::Number | TokenKind::CellReference => {
                self.cursor.advance();
                Ok(())
            }
            TokenKind::Function => self.function(),
            TokenKind::Not => {
                self.cursor.advance();
                self.factor()
            }
            TokenKind::LeftParen => {
                self.cursor.advance();
                self.expression()?;
                self.cursor.expect(TokenKind::RightParen)?;
                Ok(())
            }
            _ => Err(self.cursor.unexpected()),
        }
    }

    fn function(&mut self) -> Result<(), FormulaError> {
        let name = self.cursor.expect(TokenKind::Function)?;
        let function = Function::lookup(&name.lexeme, name.position)?;
        self.cursor.expect(TokenKind::LeftParen)?;

        let mut count = 0;
        if !self.cursor.at(TokenKind::RightParen) {
            self.expression()?;
            count += 1;
            while self.cursor.at(TokenKind::Comma) {
                self.cursor.advance();
                self.expression()?;
                count += 1;
            }
        }
        self.cursor.expect(TokenKind::RightParen)?;
        function.check_arity(count, name.position)
    }
}
