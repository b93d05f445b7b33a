use std::fmt;

use serde::{Deserialize, Serialize};

/// Token types produced by the accessor-path lexer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Token {
    /// A quoted key, e.g. `["my key"]`.
    String(String),
    /// An array index.
    Integer(usize),
    /// A bare field name.
    Ident(String),

    /// The dot operator.
    Dot, // .
    /// The left bracket.
    LBracket, // [
    /// The right bracket.
    RBracket, // ]

    /// The end of the input.
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::String(s) => write!(f, "\"{s}\""),
            Token::Integer(n) => write!(f, "{n}"),
            Token::Ident(s) => write!(f, "{s}"),
            Token::Dot => write!(f, "."),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::Eof => write!(f, "EOF"),
        }
    }
}

/// Position in the path source for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// A token with its source position.
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    pub token: Token,
    pub span: Span,
}

/// Lexer error.
#[derive(Debug, thiserror::Error)]
pub enum LexError {
    #[error("unexpected character '{0}' at position {1}")]
    UnexpectedChar(char, usize),
    #[error("unterminated string starting at position {0}")]
    UnterminatedString(usize),
    #[error("index out of range at position {0}")]
    IndexOverflow(usize),
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-' || c == '$'
}

/// Tokenize an accessor path such as `cta.URL` or `Slide[0].image.data.attributes.url`.
pub fn tokenize(input: &str) -> Result<Vec<SpannedToken>, LexError> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = input.chars().collect();
    let mut pos = 0;

    while pos < chars.len() {
        let ch = chars[pos];

        if ch.is_whitespace() {
            pos += 1;
            continue;
        }

        let start = pos;

        let token = match ch {
            '.' => {
                pos += 1;
                Token::Dot
            }
            '[' => {
                pos += 1;
                Token::LBracket
            }
            ']' => {
                pos += 1;
                Token::RBracket
            }
            '"' | '\'' => {
                let quote = ch;
                pos += 1;
                let mut value = String::new();
                while pos < chars.len() && chars[pos] != quote {
                    if chars[pos] == '\\' && pos + 1 < chars.len() {
                        pos += 1;
                    }
                    value.push(chars[pos]);
                    pos += 1;
                }
                if pos >= chars.len() {
                    return Err(LexError::UnterminatedString(start));
                }
                pos += 1; // closing quote
                Token::String(value)
            }
            c if c.is_ascii_digit() => {
                while pos < chars.len() && chars[pos].is_ascii_digit() {
                    pos += 1;
                }
                let digits: String = chars[start..pos].iter().collect();
                let index = digits
                    .parse::<usize>()
                    .map_err(|_| LexError::IndexOverflow(start))?;
                Token::Integer(index)
            }
            c if is_ident_start(c) => {
                while pos < chars.len() && is_ident_continue(chars[pos]) {
                    pos += 1;
                }
                Token::Ident(chars[start..pos].iter().collect())
            }
            _ => return Err(LexError::UnexpectedChar(ch, pos)),
        };

        tokens.push(SpannedToken {
            token,
            span: Span { start, end: pos },
        });
    }

    tokens.push(SpannedToken {
        token: Token::Eof,
        span: Span {
            start: pos,
            end: pos,
        },
    });

    Ok(tokens)
}
