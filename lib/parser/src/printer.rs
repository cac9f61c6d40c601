use itertools::Itertools;
use scanner::{Token, TokenType};

use crate::{Expr, LiteralValue, Visitor};

/// Prints an expression in fully parenthesized prefix form, e.g. `(* (- 123) (group 45.67))`.
#[derive(Debug, Default, Clone, Copy)]
pub struct AstPrinter;

impl AstPrinter {
    pub fn print(&mut self, expr: &Expr) -> String {
        expr.accept(self)
    }

    fn parenthesize<'a>(&mut self, name: &str, exprs: &[&Expr<'a>]) -> String {
        format!("({name} {})", exprs.iter().map(|e| e.accept(self)).join(" "))
    }
}

impl<'a> Visitor<'a, String> for AstPrinter {
    fn visit_binary(&mut self, left: &Expr<'a>, operator: &Token<'a>, right: &Expr<'a>) -> String {
        self.parenthesize(operator.lexeme(), &[left, right])
    }

    fn visit_grouping(&mut self, expression: &Expr<'a>) -> String {
        self.parenthesize("group", &[expression])
    }

    fn visit_literal(&mut self, value: &LiteralValue<'a>) -> String {
        value.to_string()
    }

    fn visit_unary(&mut self, operator: &Token<'a>, right: &Expr<'a>) -> String {
        self.parenthesize(operator.lexeme(), &[right])
    }
}

/// Prints an expression in reverse Polish notation, e.g. `1 2 + 4 3 - *`.
/// Groupings vanish and unary minus is written `~` so it can't be confused with subtraction.
#[derive(Debug, Default, Clone, Copy)]
pub struct RpnPrinter;

impl RpnPrinter {
    pub fn print(&mut self, expr: &Expr) -> String {
        expr.accept(self)
    }
}

impl<'a> Visitor<'a, String> for RpnPrinter {
    fn visit_binary(&mut self, left: &Expr<'a>, operator: &Token<'a>, right: &Expr<'a>) -> String {
        format!("{} {} {}", left.accept(self), right.accept(self), operator.lexeme())
    }

    fn visit_grouping(&mut self, expression: &Expr<'a>) -> String {
        expression.accept(self)
    }

    fn visit_literal(&mut self, value: &LiteralValue<'a>) -> String {
        value.to_string()
    }

    fn visit_unary(&mut self, operator: &Token<'a>, right: &Expr<'a>) -> String {
        let operator = match operator.ty() {
            TokenType::Minus => "~",
            _ => operator.lexeme(),
        };
        format!("{} {operator}", right.accept(self))
    }
}

#[cfg(test)]
mod tests {
    use errors::LoxErrors;
    use pretty_assertions::assert_eq;

    use super::*;

    fn rpn(source: &str) -> String {
        let tokens = scanner::scan(source).unwrap();
        let expr = crate::parse(&tokens, &mut LoxErrors::default()).unwrap();
        RpnPrinter.print(&expr)
    }

    fn ast(source: &str) -> String {
        let tokens = scanner::scan(source).unwrap();
        let expr = crate::parse(&tokens, &mut LoxErrors::default()).unwrap();
        AstPrinter.print(&expr)
    }

    #[test]
    fn ast_printer() {
        assert_eq!(ast("-123 * (45.67)"), "(* (- 123) (group 45.67))");
        assert_eq!(ast("!true == \"a\" < nil"), "(== (! true) (< a nil))");
    }

    #[test]
    fn display_matches_ast_printer() {
        let tokens = scanner::scan("1 + 2 * (3 - 4)").unwrap();
        let expr = crate::parse(&tokens, &mut LoxErrors::default()).unwrap();
        assert_eq!(expr.to_string(), AstPrinter.print(&expr));
    }

    #[test]
    fn rpn_printer() {
        assert_eq!(rpn("(1 + 2) * (4 - 3)"), "1 2 + 4 3 - *");
        assert_eq!(rpn("1 - 2 - 3"), "1 2 - 3 -");
        assert_eq!(rpn("-5 - -2"), "5 ~ 2 ~ -");
        assert_eq!(rpn("!false"), "false !");
    }
}
