use serde::Serialize;
use std::fmt;

/// Token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    /// Unsigned run of decimal digits
    Number,
    /// Column letters followed by row digits, e.g. `B12`
    CellReference,
    Plus,
    Minus,
    Multiply,
    Divide,
    LeftParen,
    RightParen,
    Comma,
    /// One of `max`, `min`, `mmax`, `mmin`
    Function,
    Equal,
    Less,
    Greater,
    /// The `not` keyword
    Not,
    /// End of input; always the last token of a stream
    End,
}

impl TokenKind {
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Number => "Number",
            TokenKind::CellReference => "CellReference",
            TokenKind::Plus => "Plus",
            TokenKind::Minus => "Minus",
            TokenKind::Multiply => "Multiply",
            TokenKind::Divide => "Divide",
            TokenKind::LeftParen => "LeftParen",
            TokenKind::RightParen => "RightParen",
            TokenKind::Comma => "Comma",
            TokenKind::Function => "Function",
            TokenKind::Equal => "Equal",
            TokenKind::Less => "Less",
            TokenKind::Greater => "Greater",
            TokenKind::Not => "Not",
            TokenKind::End => "End",
        }
    }

    /// Kind of a single-character operator, if `c` is one.
    pub fn from_operator(c: char) -> Option<TokenKind> {
        let kind = match c {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Multiply,
            '/' => TokenKind::Divide,
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            ',' => TokenKind::Comma,
            '=' => TokenKind::Equal,
            '<' => TokenKind::Less,
            '>' => TokenKind::Greater,
            _ => return None,
        };
        Some(kind)
    }

    /// Comparison operators bind loosest and are non-associative.
    pub fn is_comparison(self) -> bool {
        matches!(self, TokenKind::Equal | TokenKind::Less | TokenKind::Greater)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A lexed token with its source text and character offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub position: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, position: usize) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            position,
        }
    }

    pub fn end(position: usize) -> Self {
        Token::new(TokenKind::End, "", position)
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} at {}", self.kind, self.lexeme, self.position)
    }
}
