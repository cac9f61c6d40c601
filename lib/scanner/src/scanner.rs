use std::fmt::Display;

use cursor::{Cursor, Line};
use itertools::Itertools;
use log::trace;

pub mod token;
pub use token::{Token, TokenData, TokenType};
use TokenData::*;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ScanErrorType {
    #[error("Unexpected character.")]
    UnexpectedCharacter(char),
    #[error("Unterminated string.")]
    UnterminatedString,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("[line {line}] Error: {error}")]
pub struct ScanError {
    pub error: ScanErrorType,
    pub line: Line,
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub struct ScanErrors(pub Vec<ScanError>);

impl Display for ScanErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join("\n"))
    }
}

/// Scans all of `source`. The returned tokens always end with exactly one [`TokenData::Eof`].
/// Scanning continues after an error so that every lexical error in the source is reported.
pub fn scan(source: &str) -> Result<Vec<Token<'_>>, ScanErrors> {
    Scanner::new(source).scan_tokens()
}

struct Scanner<'a> {
    start: Cursor<'a>,
    cursor: Cursor<'a>,
    tokens: Vec<Token<'a>>,
    errors: Vec<ScanError>,
}

impl<'a> Scanner<'a> {
    fn new(source: &'a str) -> Self {
        let cursor = Cursor::new(source);
        Self { start: cursor.clone(), cursor, tokens: Vec::new(), errors: Vec::new() }
    }

    fn scan_tokens(mut self) -> Result<Vec<Token<'a>>, ScanErrors> {
        loop {
            self.start = self.cursor.clone();
            let Some(c) = self.cursor.next() else { break };
            match c {
                '(' => self.add_token(LeftParen),
                ')' => self.add_token(RightParen),
                '{' => self.add_token(LeftBrace),
                '}' => self.add_token(RightBrace),
                ',' => self.add_token(Comma),
                '.' => self.add_token(Dot),
                '-' => self.add_token(Minus),
                '+' => self.add_token(Plus),
                ';' => self.add_token(Semicolon),
                '*' => self.add_token(Star),

                '!' => self.add_token_if_followed_by('=', BangEqual, Bang),
                '=' => self.add_token_if_followed_by('=', EqualEqual, Equal),
                '<' => self.add_token_if_followed_by('=', LessEqual, Less),
                '>' => self.add_token_if_followed_by('=', GreaterEqual, Greater),

                '/' => {
                    if self.cursor.next_if_eq('/') {
                        // Comment
                        while !matches!(self.cursor.peek(), Some('\n') | None) {
                            self.cursor.next();
                        }
                    } else {
                        self.add_token(Slash)
                    }
                }

                '"' => self.string(),
                d if d.is_ascii_digit() => self.number(),
                c if c.is_ascii_alphabetic() || c == '_' => self.identifier(),

                ' ' | '\r' | '\t' | '\n' => (),

                c => self.error(ScanErrorType::UnexpectedCharacter(c)),
            }
        }

        self.tokens.push(Token::eof(self.cursor.line(), self.cursor.col()));

        if self.errors.is_empty() {
            Ok(self.tokens)
        } else {
            Err(ScanErrors(self.errors))
        }
    }

    fn lexeme(&self) -> &'a str {
        self.start.slice_until(&self.cursor)
    }

    fn add_token(&mut self, data: TokenData<'a>) {
        let token = Token::new(data, self.lexeme(), self.start.line(), self.start.col());
        trace!("Scanned {:?} at {}:{}", token.data, token.line(), token.col());
        self.tokens.push(token);
    }

    fn add_token_if_followed_by(&mut self, next: char, matched: TokenData<'a>, single: TokenData<'a>) {
        let data = if self.cursor.next_if_eq(next) { matched } else { single };
        self.add_token(data)
    }

    fn error(&mut self, error: ScanErrorType) {
        self.errors.push(ScanError { error, line: self.cursor.line() });
    }

    fn string(&mut self) {
        while !matches!(self.cursor.peek(), Some('"') | None) {
            self.cursor.next();
        }

        if !self.cursor.next_if_eq('"') {
            return self.error(ScanErrorType::UnterminatedString);
        }

        let lexeme = self.lexeme();
        self.add_token(Str(&lexeme[1..lexeme.len() - 1]));
    }

    fn number(&mut self) {
        self.consume_digits();

        if self.cursor.peek() == Some('.')
            && self.cursor.peek_next().map_or(false, |c| c.is_ascii_digit())
        {
            self.cursor.next();
            self.consume_digits();
        }

        let value = self.lexeme().parse().expect("digits with an optional fraction are valid f64");
        self.add_token(Number(value))
    }

    fn consume_digits(&mut self) {
        while self.cursor.peek().map_or(false, |c| c.is_ascii_digit()) {
            self.cursor.next();
        }
    }

    fn identifier(&mut self) {
        while self.cursor.peek().map_or(false, |c| c.is_ascii_alphanumeric() || c == '_') {
            self.cursor.next();
        }

        self.add_token(TokenData::keyword(self.lexeme()).unwrap_or(Identifier))
    }
}
