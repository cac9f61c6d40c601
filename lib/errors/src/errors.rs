use std::{
    fmt::Display,
    ops::{Deref, DerefMut},
};

use cursor::Line;
use itertools::Itertools;
use scanner::{Token, TokenType};

#[derive(thiserror::Error, Clone, Debug, PartialEq)]
#[error("[line {line}] Error{at}: {message}")]
pub struct LoxError {
    pub line: Line,
    /// Location suffix, e.g. ` at end` or ` at '+'`. Empty when there is nothing to point at.
    pub at: String,
    pub message: String,
}

impl LoxError {
    pub fn new(line: Line, at: impl Into<String>, message: impl ToString) -> Self {
        Self { line, at: at.into(), message: message.to_string() }
    }

    /// Error pointing at `token`: ` at end` for `Eof`, ` at '<lexeme>'` otherwise.
    pub fn at_token(token: &Token<'_>, message: impl ToString) -> Self {
        let at = match token.ty() {
            TokenType::Eof => " at end".to_string(),
            _ => format!(" at '{token}'"),
        };
        Self::new(token.line(), at, message)
    }
}

#[derive(thiserror::Error, Debug, Default, PartialEq)]
pub struct LoxErrors(pub Vec<LoxError>);

impl From<LoxError> for LoxErrors {
    fn from(e: LoxError) -> Self {
        Self(vec![e])
    }
}

impl Deref for LoxErrors {
    type Target = Vec<LoxError>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for LoxErrors {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Display for LoxErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join("\n"))
    }
}

/// Sink for diagnostics. Called once for every error, at the point the error is detected,
/// with the offending token.
pub trait Reporter {
    fn report(&mut self, token: &Token<'_>, message: &str);
}

impl Reporter for LoxErrors {
    fn report(&mut self, token: &Token<'_>, message: &str) {
        self.push(LoxError::at_token(token, message))
    }
}
