//! Token cursor shared by the syntax checker and the evaluator.

use crate::error::FormulaError;
use crate::lexer;
use crate::token::{Token, TokenKind};

/// Character offset where the formula body of `text` starts, skipping
/// leading whitespace, one optional `=`, and whitespace after it.
///
/// Returns `None` when nothing is left, i.e. the text is blank or a bare `=`.
pub fn body_offset(text: &str) -> Option<usize> {
    let mut chars = text.chars().enumerate().peekable();
    while chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}
    if chars.next_if(|(_, c)| *c == '=').is_some() {
        while chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}
    }
    chars.peek().map(|(i, _)| *i)
}

/// Position-tracking reader over a lexed token stream.
///
/// Reading past the last token keeps yielding the trailing `End`.
#[derive(Debug, Clone)]
pub struct Cursor {
    tokens: Vec<Token>,
    pos: usize,
}

impl Cursor {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::End) {
            let at = tokens.last().map_or(0, |t| t.position + t.lexeme.chars().count());
            tokens.push(Token::end(at));
        }
        Cursor { tokens, pos: 0 }
    }

    /// Lex `text` from character offset `start` and wrap the result.
    pub fn lex_from(text: &str, start: usize) -> Result<Self, FormulaError> {
        Ok(Cursor::new(lexer::lex_from(text, start)?))
    }

    pub fn current(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    pub fn peek(&self) -> TokenKind {
        self.current().kind
    }

    pub fn at(&self, kind: TokenKind) -> bool {
        self.peek() == kind
    }

    pub fn advance(&mut self) -> Token {
        let t = self.current().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        t
    }

    /// Consume a token of `kind` or fail naming the expected and actual kinds.
    pub fn expect(&mut self, kind: TokenKind) -> Result<Token, FormulaError> {
        if self.at(kind) {
            Ok(self.advance())
        } else {
            let cur = self.current();
            Err(FormulaError::Expected {
                expected: kind,
                found: cur.kind,
                position: cur.position,
            })
        }
    }

    /// Error for a token that cannot start or continue the current rule.
    pub fn unexpected(&self) -> FormulaError {
        let cur = self.current();
        FormulaError::UnexpectedToken {
            kind: cur.kind,
            lexeme: cur.lexeme.clone(),
            position: cur.position,
        }
    }

    /// Succeeds only if every token up to `End` was consumed.
    pub fn finish(&self) -> Result<(), FormulaError> {
        if self.at(TokenKind::End) {
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_offset_skips_prefix() {
        assert_eq!(body_offset("5+3"), Some(0));
        assert_eq!(body_offset("=5+3"), Some(1));
        assert_eq!(body_offset("  =  A1"), Some(5));
        assert_eq!(body_offset(""), None);
        assert_eq!(body_offset("   "), None);
        assert_eq!(body_offset("="), None);
        assert_eq!(body_offset(" = "), None);
    }

    #[test]
    fn only_one_equals_is_stripped() {
        assert_eq!(body_offset("==1"), Some(1));
    }

    #[test]
    fn reading_past_end_yields_end() {
        let mut c = Cursor::lex_from("7", 0).unwrap();
        assert_eq!(c.advance().kind, TokenKind::Number);
        for _ in 0..3 {
            assert_eq!(c.advance().kind, TokenKind::End);
        }
        assert!(c.finish().is_ok());
    }

    #[test]
    fn expect_reports_kinds_and_position() {
        let mut c = Cursor::lex_from("( 1", 0).unwrap();
        c.expect(TokenKind::LeftParen).unwrap();
        let err = c.expect(TokenKind::RightParen).unwrap_err();
        assert_eq!(
            err.to_string(),
            "expected RightParen, found Number at position 2"
        );
    }

    #[test]
    fn finish_rejects_leftovers() {
        let c = Cursor::lex_from("1 2", 0).unwrap();
        assert!(c.finish().is_err());
    }

    #[test]
    fn missing_end_is_appended() {
        let c = Cursor::new(Vec::new());
        assert_eq!(c.peek(), TokenKind::End);
    }
}
