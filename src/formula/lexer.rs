//! Tokenizer for salary formulas.
//!
//! Splits formula text into numbers, the `base_salary` variable, the four
//! arithmetic operators and parentheses. Anything else is rejected here, so
//! the parser only ever sees tokens from the closed formula grammar.

use crate::error::{EngineError, EngineResult};

/// The name of the single free variable a formula may reference.
pub const BASE_SALARY_VARIABLE: &str = "base_salary";

/// The kind of a formula token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenKind {
    /// A non-negative decimal literal.
    Number(f64),
    /// The `base_salary` variable.
    BaseSalary,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// End of input.
    Eof,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(value) => write!(f, "number {}", value),
            Self::BaseSalary => write!(f, "'{}'", BASE_SALARY_VARIABLE),
            Self::Plus => write!(f, "'+'"),
            Self::Minus => write!(f, "'-'"),
            Self::Star => write!(f, "'*'"),
            Self::Slash => write!(f, "'/'"),
            Self::LeftParen => write!(f, "'('"),
            Self::RightParen => write!(f, "')'"),
            Self::Eof => write!(f, "end of input"),
        }
    }
}

/// A token together with the byte offset where it starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// Byte offset of the token in the formula text.
    pub position: usize,
}

/// Tokenizes formula text.
///
/// The returned sequence always ends with a [`TokenKind::Eof`] token.
///
/// # Errors
///
/// Returns [`EngineError::Syntax`] for any character or identifier outside
/// the formula grammar, and for malformed numbers such as `1.` or `1.2.3`.
pub fn tokenize(input: &str) -> EngineResult<Vec<Token>> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let ch = bytes[pos];

        if ch.is_ascii_whitespace() {
            pos += 1;
            continue;
        }

        let kind = match ch {
            b'+' => Some(TokenKind::Plus),
            b'-' => Some(TokenKind::Minus),
            b'*' => Some(TokenKind::Star),
            b'/' => Some(TokenKind::Slash),
            b'(' => Some(TokenKind::LeftParen),
            b')' => Some(TokenKind::RightParen),
            _ => None,
        };
        if let Some(kind) = kind {
            tokens.push(Token {
                kind,
                position: pos,
            });
            pos += 1;
            continue;
        }

        if ch.is_ascii_digit() {
            let (value, end) = read_number(input, pos)?;
            tokens.push(Token {
                kind: TokenKind::Number(value),
                position: pos,
            });
            pos = end;
            continue;
        }

        if ch.is_ascii_alphabetic() || ch == b'_' {
            let end = scan_while(bytes, pos, |b| b.is_ascii_alphanumeric() || b == b'_');
            let word = &input[pos..end];
            if word != BASE_SALARY_VARIABLE {
                return Err(EngineError::Syntax {
                    position: pos,
                    message: format!(
                        "unknown identifier '{}' (only '{}' is allowed)",
                        word, BASE_SALARY_VARIABLE
                    ),
                });
            }
            tokens.push(Token {
                kind: TokenKind::BaseSalary,
                position: pos,
            });
            pos = end;
            continue;
        }

        // Report the whole character, not a UTF-8 fragment
        let unexpected = input[pos..].chars().next().unwrap_or('\u{FFFD}');
        return Err(EngineError::Syntax {
            position: pos,
            message: format!("unexpected character '{}'", unexpected),
        });
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        position: input.len(),
    });
    Ok(tokens)
}

fn scan_while(bytes: &[u8], start: usize, predicate: impl Fn(u8) -> bool) -> usize {
    let mut end = start;
    while end < bytes.len() && predicate(bytes[end]) {
        end += 1;
    }
    end
}

/// Reads `digits ('.' digits)?` starting at `start`.
fn read_number(input: &str, start: usize) -> EngineResult<(f64, usize)> {
    let bytes = input.as_bytes();
    let mut end = scan_while(bytes, start, |b| b.is_ascii_digit());

    if end < bytes.len() && bytes[end] == b'.' {
        let fraction_end = scan_while(bytes, end + 1, |b| b.is_ascii_digit());
        if fraction_end == end + 1 {
            return Err(EngineError::Syntax {
                position: end,
                message: "expected digits after decimal point".to_string(),
            });
        }
        end = fraction_end;
    }

    if end < bytes.len()
        && (bytes[end] == b'.' || bytes[end].is_ascii_alphabetic() || bytes[end] == b'_')
    {
        return Err(EngineError::Syntax {
            position: end,
            message: format!("malformed number '{}'", &input[start..=end]),
        });
    }

    let text = &input[start..end];
    let value = text.parse::<f64>().map_err(|e| EngineError::Syntax {
        position: start,
        message: format!("malformed number '{}': {}", text, e),
    })?;
    Ok((value, end))
}
