mod expr;
mod printer;

use errors::{LoxError, Reporter};
use log::{debug, trace};
use scanner::{Token, TokenData, TokenType};

pub use expr::{Expr, LiteralValue, Visitor};
pub use printer::{AstPrinter, RpnPrinter};

use TokenType::*;

pub type Result<'a, T> = std::result::Result<T, ParseError<'a>>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("{error}")]
pub struct ParseError<'a> {
    pub error: ParseErrorType,
    pub token: Token<'a>,
}

impl<'a> ParseError<'a> {
    fn new(error: ParseErrorType, token: Token<'a>) -> Self {
        Self { error, token }
    }
}

impl<'a> From<&ParseError<'a>> for LoxError {
    fn from(error: &ParseError<'a>) -> Self {
        LoxError::at_token(&error.token, &error.error)
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorType {
    #[error("Expect expression.")]
    ExpectedExpression,
    #[error("Expect ')' after expression.")]
    ExpectedRightParen,
    #[error("Expression nested too deeply.")]
    TooDeeplyNested,
    #[error("Expect end of expression.")]
    ExpectedEnd,
}

/// Limit on nested groupings and prefix operators, so deep input can't overflow the stack.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Parses a single expression from `tokens`, which must end with [`TokenData::Eof`].
/// Syntax errors go to `reporter`; the result is then `None`.
pub fn parse<'a>(tokens: &[Token<'a>], reporter: &mut dyn Reporter) -> Option<Expr<'a>> {
    Parser::new(tokens, reporter).parse()
}

pub struct Parser<'p, 'a> {
    tokens: &'p [Token<'a>],
    current: usize,
    depth: usize,
    reporter: &'p mut dyn Reporter,
}

impl<'p, 'a> Parser<'p, 'a> {
    pub fn new(tokens: &'p [Token<'a>], reporter: &'p mut dyn Reporter) -> Self {
        assert!(
            tokens.last().map(Token::ty) == Some(Eof),
            "token stream must be terminated by Eof"
        );
        Self { tokens, current: 0, depth: 0, reporter }
    }

    /// Parses one expression. Tokens following a complete expression are left unconsumed.
    pub fn parse(&mut self) -> Option<Expr<'a>> {
        self.depth = 0;
        match self.expression() {
            Ok(expr) => Some(expr),
            Err(e) => {
                debug!("Discarding expression after error at {}: {e}", e.token.line());
                None
            }
        }
    }

    /// Checks that everything up to `Eof` has been consumed. Otherwise reports the first
    /// leftover token and returns false.
    pub fn expect_end(&mut self) -> bool {
        if self.is_at_end() {
            return true;
        }
        self.error(self.peek(), ParseErrorType::ExpectedEnd);
        false
    }

    fn expression(&mut self) -> Result<'a, Expr<'a>> {
        self.equality()
    }

    fn equality(&mut self) -> Result<'a, Expr<'a>> {
        trace!("equality at token {}", self.current);
        let mut expr = self.comparison()?;

        while self.matches(&[BangEqual, EqualEqual]) {
            let operator = self.previous().clone();
            let right = Box::new(self.comparison()?);
            expr = Expr::Binary { left: Box::new(expr), operator, right }
        }
        Ok(expr)
    }

    fn comparison(&mut self) -> Result<'a, Expr<'a>> {
        trace!("comparison at token {}", self.current);
        let mut expr = self.addition()?;

        while self.matches(&[Greater, GreaterEqual, Less, LessEqual]) {
            let operator = self.previous().clone();
            let right = Box::new(self.addition()?);
            expr = Expr::Binary { left: Box::new(expr), operator, right }
        }
        Ok(expr)
    }

    fn addition(&mut self) -> Result<'a, Expr<'a>> {
        trace!("addition at token {}", self.current);
        let mut expr = self.multiplication()?;

        while self.matches(&[Minus, Plus]) {
            let operator = self.previous().clone();
            let right = Box::new(self.multiplication()?);
            expr = Expr::Binary { left: Box::new(expr), operator, right }
        }
        Ok(expr)
    }

    fn multiplication(&mut self) -> Result<'a, Expr<'a>> {
        trace!("multiplication at token {}", self.current);
        let mut expr = self.unary()?;

        while self.matches(&[Slash, Star]) {
            let operator = self.previous().clone();
            let right = Box::new(self.unary()?);
            expr = Expr::Binary { left: Box::new(expr), operator, right }
        }
        Ok(expr)
    }

    fn unary(&mut self) -> Result<'a, Expr<'a>> {
        if self.matches(&[Bang, Minus]) {
            let operator = self.previous();
            let right = Box::new(self.nested(operator, Self::unary)?);
            return Ok(Expr::Unary { operator: operator.clone(), right });
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<'a, Expr<'a>> {
        let token = self.peek();
        let value = match token.data {
            TokenData::False => LiteralValue::Boolean(false),
            TokenData::True => LiteralValue::Boolean(true),
            TokenData::Nil => LiteralValue::Nil,
            TokenData::Number(n) => LiteralValue::Number(n),
            TokenData::Str(s) => LiteralValue::Str(s),
            TokenData::LeftParen => {
                self.advance();
                let expr = self.nested(token, |parser| {
                    let expr = parser.expression()?;
                    parser.consume(RightParen, ParseErrorType::ExpectedRightParen)?;
                    Ok(expr)
                })?;
                return Ok(Expr::Grouping(Box::new(expr)));
            }
            _ => return Err(self.error(token, ParseErrorType::ExpectedExpression)),
        };
        self.advance();
        trace!("literal {value} at {}:{}", token.line(), token.col());
        Ok(Expr::Literal(value))
    }

    /// Runs `parse` one nesting level deeper, failing at `token` once the limit is reached.
    fn nested<T>(
        &mut self,
        token: &Token<'a>,
        parse: impl FnOnce(&mut Self) -> Result<'a, T>,
    ) -> Result<'a, T> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.error(token, ParseErrorType::TooDeeplyNested));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Skips tokens until the start of what is likely the next statement: just past a `;`, or
    /// just before a keyword that begins a statement. Always skips at least the current token
    /// unless already at the end.
    pub fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous().ty() == Semicolon {
                return;
            }

            if let Class | Fun | Var | For | If | While | Print | Return = self.peek().ty() {
                return;
            }

            self.advance();
        }
    }

    /// Reports the error right away, so it reaches the reporter exactly once however far it
    /// unwinds afterwards.
    fn error(&mut self, token: &Token<'a>, error: ParseErrorType) -> ParseError<'a> {
        let error = ParseError::new(error, token.clone());
        debug!("Syntax error at token {}: {error}", self.current);
        self.reporter.report(token, &error.error.to_string());
        error
    }
}

// Helpers
impl<'p, 'a> Parser<'p, 'a> {
    /// Consumes the current token if it is any of `types`.
    fn matches(&mut self, types: &[TokenType]) -> bool {
        if types.iter().any(|&ty| self.check(ty)) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn consume(&mut self, ty: TokenType, error: ParseErrorType) -> Result<'a, &'p Token<'a>> {
        if self.check(ty) {
            return Ok(self.advance());
        }
        Err(self.error(self.peek(), error))
    }

    fn check(&self, ty: TokenType) -> bool {
        !self.is_at_end() && self.peek().ty() == ty
    }

    /// Returns the current token and moves past it, unless it is `Eof`.
    fn advance(&mut self) -> &'p Token<'a> {
        let token = self.peek();
        if !self.is_at_end() {
            self.current += 1;
        }
        token
    }

    fn is_at_end(&self) -> bool {
        self.peek().ty() == Eof
    }

    fn peek(&self) -> &'p Token<'a> {
        &self.tokens[self.current]
    }

    /// The token just consumed. Only valid after something has been consumed.
    fn previous(&self) -> &'p Token<'a> {
        &self.tokens[self.current - 1]
    }
}
