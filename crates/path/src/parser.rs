use crate::ast::{AccessPath, Segment};
use crate::lexer::{tokenize, LexError, SpannedToken, Token};

/// Parser error types.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("lex error: {0}")]
    Lex(#[from] LexError),
    #[error("unexpected token: {found}, expected: {expected}")]
    UnexpectedToken { found: String, expected: String },
    #[error("empty path")]
    Empty,
}

/// Parse an accessor path string into an [`AccessPath`].
pub fn parse(input: &str) -> Result<AccessPath, ParseError> {
    let tokens = tokenize(input)?;
    let mut parser = Parser::new(tokens);
    parser.parse_path()
}

struct Parser {
    tokens: Vec<SpannedToken>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<SpannedToken>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> &Token {
        self.tokens
            .get(self.pos)
            .map(|t| &t.token)
            .unwrap_or(&Token::Eof)
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        self.pos += 1;
        token
    }

    fn expect(&mut self, expected: &Token) -> Result<(), ParseError> {
        let found = self.advance();
        if &found == expected {
            Ok(())
        } else {
            Err(unexpected(&found, &expected.to_string()))
        }
    }

    fn parse_path(&mut self) -> Result<AccessPath, ParseError> {
        let mut segments = Vec::new();

        match self.peek().clone() {
            Token::Eof => return Err(ParseError::Empty),
            Token::Ident(name) => {
                self.advance();
                segments.push(Segment::Key(name));
            }
            Token::LBracket => segments.push(self.parse_bracket()?),
            other => return Err(unexpected(&other, "field name or '['")),
        }

        loop {
            match self.peek().clone() {
                Token::Eof => break,
                Token::Dot => {
                    self.advance();
                    match self.advance() {
                        Token::Ident(name) => segments.push(Segment::Key(name)),
                        other => return Err(unexpected(&other, "field name")),
                    }
                }
                Token::LBracket => segments.push(self.parse_bracket()?),
                other => return Err(unexpected(&other, "'.', '[' or end of path")),
            }
        }

        Ok(AccessPath::new(segments))
    }

    fn parse_bracket(&mut self) -> Result<Segment, ParseError> {
        self.expect(&Token::LBracket)?;
        let segment = match self.advance() {
            Token::Integer(n) => Segment::Index(n),
            Token::String(key) => Segment::Key(key),
            other => return Err(unexpected(&other, "index or quoted key")),
        };
        self.expect(&Token::RBracket)?;
        Ok(segment)
    }
}

fn unexpected(found: &Token, expected: &str) -> ParseError {
    ParseError::UnexpectedToken {
        found: found.to_string(),
        expected: expected.to_string(),
    }
}
