use crate::error::FormulaError;
use crate::token::{Token, TokenKind};

/// Tokenize a whole expression. See [`lex_from`].
pub fn lex(src: &str) -> Result<Vec<Token>, FormulaError> {
    lex_from(src, 0)
}

/// Tokenize `src` starting at character offset `start`.
///
/// Token positions are character offsets into `src`, so callers that skip a
/// prefix (such as a leading `=`) still report positions against the text
/// they were given. The stream always ends with exactly one `End` token
/// positioned at the input length.
pub fn lex_from(src: &str, start: usize) -> Result<Vec<Token>, FormulaError> {
    let chars: Vec<char> = src.chars().collect();
    let mut tokens = Vec::new();
    let mut pos = start.min(chars.len());

    while pos < chars.len() {
        let c = chars[pos];

        if c.is_whitespace() {
            pos += 1;
            continue;
        }

        let tok_start = pos;

        // Number: digits only, no sign, point or exponent
        if c.is_ascii_digit() {
            while pos < chars.len() && chars[pos].is_ascii_digit() {
                pos += 1;
            }
            let s: String = chars[tok_start..pos].iter().collect();
            tokens.push(Token::new(TokenKind::Number, s, tok_start));
            continue;
        }

        // Cell reference: column letters immediately followed by row digits
        if c.is_ascii_uppercase() {
            while pos < chars.len() && chars[pos].is_ascii_uppercase() {
                pos += 1;
            }
            let letters_end = pos;
            while pos < chars.len() && chars[pos].is_ascii_digit() {
                pos += 1;
            }
            if pos == letters_end {
                return Err(FormulaError::MalformedReference {
                    text: chars[tok_start..letters_end].iter().collect(),
                    position: tok_start,
                });
            }
            let s: String = chars[tok_start..pos].iter().collect();
            tokens.push(Token::new(TokenKind::CellReference, s, tok_start));
            continue;
        }

        // Keywords: `not` and the function names
        if c.is_ascii_lowercase() {
            while pos < chars.len() && chars[pos].is_ascii_lowercase() {
                pos += 1;
            }
            let word: String = chars[tok_start..pos].iter().collect();
            let kind = match word.as_str() {
                "not" => TokenKind::Not,
                "max" | "min" | "mmax" | "mmin" => TokenKind::Function,
                _ => {
                    return Err(FormulaError::UnknownKeyword {
                        word,
                        position: tok_start,
                    })
                }
            };
            tokens.push(Token::new(kind, word, tok_start));
            continue;
        }

        match TokenKind::from_operator(c) {
            Some(kind) => {
                tokens.push(Token::new(kind, c.to_string(), tok_start));
                pos += 1;
            }
            None => {
                return Err(FormulaError::UnknownCharacter {
                    ch: c,
                    position: tok_start,
                })
            }
        }
    }

    tokens.push(Token::end(chars.len()));
    Ok(tokens)
}
