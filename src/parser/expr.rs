//! The assignment expression grammar: a number or variable reference,
//! optionally followed by a single `+` and one more operand. No operator
//! precedence, no parentheses.

use super::ast::Expr;
use super::{Parser, Result};
use crate::erro::SyntaxError;
use crate::lexer::TokenKind;

impl Parser {
    /// number | ident | (number|ident) `+` operand
    ///
    /// The right operand is the next token's lexeme whatever its kind:
    /// scripts write `set balance = balance + user_input`, and the
    /// keyword rides along as raw text until evaluation.
    pub(super) fn expression(&mut self) -> Result<Expr> {
        let (kind, left) = match self.peek() {
            Some(token) if matches!(token.kind, TokenKind::Ident | TokenKind::Number) => {
                (token.kind, token.lexeme.clone())
            }
            Some(token) => return Err(SyntaxError::ExpectedOperand(token.lexeme.clone())),
            None => return Err(SyntaxError::UnexpectedEnd(TokenKind::Number)),
        };
        self.advance();

        if self.peek_kind() == Some(TokenKind::Plus) {
            self.advance();
            let right = self.any_lexeme(TokenKind::Number)?;
            return Ok(Expr::Addition { left, right });
        }

        Ok(match kind {
            TokenKind::Ident => Expr::Variable(left),
            _ => Expr::Number(left),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::ast::{Action, Statement};
    use super::super::parse_tokens;
    use super::*;
    use crate::lexer::tokenize;

    fn parse_set(src: &str) -> Result<Expr> {
        let full = format!(
            r#"start INIT if "x" in user_input then response "y" set v = {src} end"#
        );
        let program = parse_tokens(tokenize(&full).expect("lexing should succeed"))?;
        let Some(Statement::Rule(rule)) = program.statements.get(1) else {
            panic!("expected a rule statement");
        };
        let Some(Action::Set { expr, .. }) = rule.actions.first() else {
            panic!("expected a set action");
        };
        Ok(expr.clone())
    }

    #[test]
    fn bare_number() {
        assert_eq!(parse_set("10"), Ok(Expr::Number("10".into())));
    }

    #[test]
    fn bare_variable() {
        assert_eq!(parse_set("other"), Ok(Expr::Variable("other".into())));
    }

    #[test]
    fn addition_keeps_raw_operand_text() {
        assert_eq!(
            parse_set("balance + user_input"),
            Ok(Expr::Addition {
                left: "balance".into(),
                right: "user_input".into(),
            })
        );
        assert_eq!(
            parse_set("5 + 3"),
            Ok(Expr::Addition {
                left: "5".into(),
                right: "3".into(),
            })
        );
    }

    #[test]
    fn operand_must_be_number_or_identifier() {
        assert_eq!(
            parse_set(r#""text""#),
            Err(SyntaxError::ExpectedOperand("text".into()))
        );
    }
}
