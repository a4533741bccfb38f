//! Mode declarations, `if`/`elif`/`else` rules and their trailing actions.

use super::ast::{Action, Rule, RuleKind, Statement};
use super::{Parser, Result};
use crate::erro::SyntaxError;
use crate::lexer::TokenKind;

impl Parser {
    /// `MODE_NAME`: declares a dialogue state, tracking duplicates and
    /// the mandatory `INIT`.
    pub(super) fn mode_statement(&mut self) -> Result<Statement> {
        let name = self.expect(TokenKind::Mode)?.lexeme;
        if !self.seen_modes.insert(name.clone()) {
            return Err(SyntaxError::DuplicateMode(name));
        }
        if name == "INIT" {
            self.found_init = true;
        }
        Ok(Statement::Mode { name })
    }

    /// `if`/`elif` condition `then` `response` STRING actions*
    pub(super) fn rule(&mut self, kind: RuleKind) -> Result<Rule> {
        self.advance(); // if / elif
        let conditions = self.conditions()?;
        self.expect(TokenKind::Then)?;
        self.expect(TokenKind::Response)?;
        let response = self.expect(TokenKind::Str)?.lexeme;
        let actions = self.trailing_actions()?;
        Ok(Rule {
            kind,
            conditions,
            response,
            actions,
        })
    }

    /// `else` `response` STRING actions*, with no condition; always
    /// matches when evaluation reaches it.
    pub(super) fn else_rule(&mut self) -> Result<Rule> {
        self.advance(); // else
        self.expect(TokenKind::Response)?;
        let response = self.expect(TokenKind::Str)?.lexeme;
        let actions = self.trailing_actions()?;
        Ok(Rule {
            kind: RuleKind::Else,
            conditions: Vec::new(),
            response,
            actions,
        })
    }

    /// Condition list of a rule. The grammar keeps a list shape, but a
    /// rule carries exactly one `STRING in user_input` clause; combinator
    /// semantics for several clauses are unspecified.
    fn conditions(&mut self) -> Result<Vec<String>> {
        let mut conditions = Vec::new();
        self.condition_clause(&mut conditions)?;
        Ok(conditions)
    }

    /// One `STRING in user_input` clause.
    fn condition_clause(&mut self, conditions: &mut Vec<String>) -> Result<()> {
        let needle = self.expect(TokenKind::Str)?.lexeme;
        self.expect(TokenKind::In)?;
        self.expect(TokenKind::UserInput)?;
        conditions.push(needle);
        Ok(())
    }

    /// Greedy run of `go`/`set` statements belonging to the rule just
    /// parsed. Stops at the next rule, mode declaration or `end`.
    fn trailing_actions(&mut self) -> Result<Vec<Action>> {
        let mut actions = Vec::new();
        loop {
            match self.peek_kind() {
                Some(TokenKind::Go) => actions.push(self.go_action()?),
                Some(TokenKind::Set) => actions.push(self.set_action()?),
                _ => break,
            }
        }
        Ok(actions)
    }

    /// `go` takes whatever token follows as the destination mode.
    /// Forward and undeclared references pass through unvalidated; an
    /// unknown mode simply never matches anything at runtime.
    pub(super) fn go_action(&mut self) -> Result<Action> {
        self.advance(); // go
        let mode = self.any_lexeme(TokenKind::Mode)?;
        Ok(Action::Go { mode })
    }

    /// `set` NAME `=` expression
    pub(super) fn set_action(&mut self) -> Result<Action> {
        self.advance(); // set
        let variable = self.any_lexeme(TokenKind::Ident)?;
        self.expect(TokenKind::Assign)?;
        let expr = self.expression()?;
        Ok(Action::Set { variable, expr })
    }

    /// Standalone `response` STRING.
    pub(super) fn response_statement(&mut self) -> Result<Statement> {
        self.advance(); // response
        let message = self.expect(TokenKind::Str)?.lexeme;
        Ok(Statement::Response { message })
    }
}
