//! # Parser Module
//!
//! Transforms the token sequence from the lexer into the flat statement
//! list of an [`ast::Program`]. The parser is a hand-written recursive
//! descent over the token vector: a cursor, `peek`/`advance`/`expect`
//! helpers, and statement dispatch on the current token's kind.
//!
//! Script-level well-formedness lives here too: the `start`…`end` frame,
//! duplicate mode detection, and the whole-program check that an `INIT`
//! mode was declared.
//!
//! ## Submodules
//!
//! - [`ast`]: statement and expression sum types
//! - `rules`: mode declarations, `if`/`elif`/`else` rules and their actions
//! - `expr`: the single-addition assignment expression grammar

pub mod ast;
mod expr;
mod rules;

use std::collections::HashSet;

use crate::erro::SyntaxError;
use crate::lexer::{Token, TokenKind};
use ast::{Program, RuleKind, Statement};

type Result<T> = std::result::Result<T, SyntaxError>;

/// Parse a token sequence into a [`Program`].
pub fn parse_tokens(tokens: Vec<Token>) -> Result<Program> {
    Parser::new(tokens).program()
}

pub(crate) struct Parser {
    tokens: Vec<Token>,
    position: usize,
    /// Mode names declared so far, for duplicate detection
    seen_modes: HashSet<String>,
    found_init: bool,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Parser {
            tokens,
            position: 0,
            seen_modes: HashSet::new(),
            found_init: false,
        }
    }

    /// `start` statement* `end`, then the whole-program INIT check.
    fn program(&mut self) -> Result<Program> {
        self.expect(TokenKind::Start)?;

        let mut statements = Vec::new();
        while self.peek_kind().is_some_and(|kind| kind != TokenKind::End) {
            statements.push(self.statement()?);
        }
        self.expect(TokenKind::End)?;

        if !self.found_init {
            return Err(SyntaxError::MissingInit);
        }
        Ok(Program { statements })
    }

    /// Dispatch on the current token's kind. The standalone `response`,
    /// `go` and `set` forms parse here too; in practice they only appear
    /// attached to a rule.
    fn statement(&mut self) -> Result<Statement> {
        match self.peek_kind() {
            Some(TokenKind::Mode) => self.mode_statement(),
            Some(TokenKind::If) => Ok(Statement::Rule(self.rule(RuleKind::If)?)),
            Some(TokenKind::Elif) => Ok(Statement::Rule(self.rule(RuleKind::Elif)?)),
            Some(TokenKind::Else) => Ok(Statement::Rule(self.else_rule()?)),
            Some(TokenKind::Response) => self.response_statement(),
            Some(TokenKind::Go) => Ok(Statement::Action(self.go_action()?)),
            Some(TokenKind::Set) => Ok(Statement::Action(self.set_action()?)),
            Some(_) => Err(SyntaxError::UnexpectedStatement(self.here())),
            None => Err(SyntaxError::UnexpectedEnd(TokenKind::End)),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|token| token.kind)
    }

    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.position);
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    /// Consume the next token, failing with expected-vs-actual detail
    /// when it is of a different kind.
    fn expect(&mut self, expected: TokenKind) -> Result<Token> {
        match self.advance() {
            Some(token) if token.kind == expected => Ok(token.clone()),
            Some(token) => Err(SyntaxError::UnexpectedToken {
                expected,
                found: token.lexeme.clone(),
            }),
            None => Err(SyntaxError::UnexpectedEnd(expected)),
        }
    }

    /// Take the next token's lexeme regardless of kind; `expected` only
    /// names what the error should ask for if the script ends here.
    fn any_lexeme(&mut self, expected: TokenKind) -> Result<String> {
        match self.advance() {
            Some(token) => Ok(token.lexeme.clone()),
            None => Err(SyntaxError::UnexpectedEnd(expected)),
        }
    }

    /// Lexeme of the current token, for error reporting.
    fn here(&self) -> String {
        self.peek().map(|token| token.lexeme.clone()).unwrap_or_default()
    }
}
