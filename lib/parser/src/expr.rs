use std::fmt::{self, Display, Formatter};

use scanner::Token;

use crate::printer::AstPrinter;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr<'a> {
    Binary { left: Box<Expr<'a>>, operator: Token<'a>, right: Box<Expr<'a>> },
    Grouping(Box<Expr<'a>>),
    Literal(LiteralValue<'a>),
    Unary { operator: Token<'a>, right: Box<Expr<'a>> },
}

/// One method per [`Expr`] variant. Lets later stages walk the tree without touching `Expr`.
pub trait Visitor<'a, R> {
    fn visit_binary(&mut self, left: &Expr<'a>, operator: &Token<'a>, right: &Expr<'a>) -> R;
    fn visit_grouping(&mut self, expression: &Expr<'a>) -> R;
    fn visit_literal(&mut self, value: &LiteralValue<'a>) -> R;
    fn visit_unary(&mut self, operator: &Token<'a>, right: &Expr<'a>) -> R;
}

impl<'a> Expr<'a> {
    pub fn accept<R>(&self, visitor: &mut impl Visitor<'a, R>) -> R {
        match self {
            Expr::Binary { left, operator, right } => visitor.visit_binary(left, operator, right),
            Expr::Grouping(expression) => visitor.visit_grouping(expression),
            Expr::Literal(value) => visitor.visit_literal(value),
            Expr::Unary { operator, right } => visitor.visit_unary(operator, right),
        }
    }
}

impl Display for Expr<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", AstPrinter.print(self))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue<'a> {
    Number(f64),
    Str(&'a str),
    Boolean(bool),
    Nil,
}

impl Display for LiteralValue<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Number(n) => write!(f, "{n}"),
            LiteralValue::Str(s) => write!(f, "{s}"),
            LiteralValue::Boolean(b) => write!(f, "{b}"),
            LiteralValue::Nil => write!(f, "nil"),
        }
    }
}
