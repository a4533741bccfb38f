use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use super::Result;
use crate::erro::LexerError;

/// Lexical classes of the scripting language.
///
/// `Mismatch` is the error sentinel: it is classified like every other
/// class but never emitted. Reaching it aborts tokenization with a
/// positioned [`LexerError`] instead of poisoning the token stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Run of decimal digits
    Number,
    /// Double-quoted string literal; the lexeme carries the text with
    /// both quotes stripped
    Str,
    If,
    Elif,
    Then,
    Else,
    Response,
    Start,
    End,
    /// The `user_input` keyword conditions test against
    UserInput,
    Go,
    In,
    Set,
    /// Mode name: one or more uppercase letters
    Mode,
    /// Variable name
    Ident,
    /// `=`
    Assign,
    /// `+`
    Plus,
    /// Anything no other pattern covered
    Mismatch,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TokenKind::Number => "a number",
            TokenKind::Str => "a string",
            TokenKind::If => "'if'",
            TokenKind::Elif => "'elif'",
            TokenKind::Then => "'then'",
            TokenKind::Else => "'else'",
            TokenKind::Response => "'response'",
            TokenKind::Start => "'start'",
            TokenKind::End => "'end'",
            TokenKind::UserInput => "'user_input'",
            TokenKind::Go => "'go'",
            TokenKind::In => "'in'",
            TokenKind::Set => "'set'",
            TokenKind::Mode => "a mode name",
            TokenKind::Ident => "an identifier",
            TokenKind::Assign => "'='",
            TokenKind::Plus => "'+'",
            TokenKind::Mismatch => "an unrecognized character",
        })
    }
}

/// A `(kind, lexeme)` pair in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// The exact matched text, except for [`TokenKind::Str`] where the
    /// surrounding quotes are stripped
    pub lexeme: String,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
        }
    }
}

/// What the tokenizer does with a matched pattern.
#[derive(Clone, Copy)]
enum Class {
    /// Produce a token of this kind
    Emit(TokenKind),
    /// Discard and bump the line counter
    Newline,
    /// Discard (blanks and comments)
    Skip,
}

/// The ordered pattern table. At every position the first pattern that
/// matches wins, NOT the longest one: keyword patterns sit ahead of the
/// identifier pattern, and the mode-name pattern splits uppercase runs
/// off before `Ident` ever sees them.
static TABLE: Lazy<Vec<(Class, Regex)>> = Lazy::new(|| {
    [
        (Class::Emit(TokenKind::Number), r"^\d+"),
        (Class::Emit(TokenKind::Str), r#"^"([^"]*)""#),
        (Class::Emit(TokenKind::If), "^if"),
        (Class::Emit(TokenKind::Elif), "^elif"),
        (Class::Emit(TokenKind::Then), "^then"),
        (Class::Emit(TokenKind::Else), "^else"),
        (Class::Emit(TokenKind::Response), "^response"),
        (Class::Emit(TokenKind::Start), "^start"),
        (Class::Emit(TokenKind::End), "^end"),
        (Class::Emit(TokenKind::UserInput), "^user_input"),
        (Class::Emit(TokenKind::Go), "^go"),
        (Class::Emit(TokenKind::In), "^in"),
        (Class::Emit(TokenKind::Set), "^set"),
        (Class::Emit(TokenKind::Mode), "^[A-Z]+"),
        (Class::Emit(TokenKind::Ident), "^[a-zA-Z_][a-zA-Z0-9_]*"),
        (Class::Newline, "^\n"),
        (Class::Skip, r"^[ \t]+"),
        (Class::Skip, "^#.*"),
        (Class::Emit(TokenKind::Assign), "^="),
        (Class::Emit(TokenKind::Plus), r"^\+"),
        (Class::Emit(TokenKind::Mismatch), "^."),
    ]
    .into_iter()
    .map(|(class, pattern)| {
        (
            class,
            Regex::new(pattern).expect("static lexical pattern must compile"),
        )
    })
    .collect()
});

/// Convert script source into its token sequence.
///
/// Whitespace, newlines and `#` comments are recognized and discarded;
/// newlines advance the line counter used for error positions. Ordered
/// alternation means a keyword also matches as the prefix of a longer
/// word: `init` lexes as `in` + `it`.
pub fn tokenize(src: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut rest = src;
    let mut line = 1;
    let mut column = 1;

    while !rest.is_empty() {
        let Some((class, matched)) = TABLE
            .iter()
            .find_map(|(class, re)| re.find(rest).map(|m| (*class, m.as_str())))
        else {
            // Unreachable while the table ends in a catch-all, but a
            // position is still better than a panic.
            return Err(unrecognized(rest, line, column));
        };

        match class {
            Class::Emit(TokenKind::Mismatch) => {
                return Err(unrecognized(rest, line, column));
            }
            Class::Emit(TokenKind::Str) => {
                // The pattern guarantees one leading and one trailing quote.
                let text = matched.trim_matches('"');
                tokens.push(Token::new(TokenKind::Str, text));
            }
            Class::Emit(kind) => {
                tokens.push(Token::new(kind, matched));
            }
            Class::Newline => {
                line += 1;
                column = 0;
            }
            Class::Skip => {}
        }

        column += matched.chars().count();
        rest = &rest[matched.len()..];
    }

    Ok(tokens)
}

fn unrecognized(rest: &str, line: usize, column: usize) -> LexerError {
    LexerError::UnrecognizedChar {
        ch: rest.chars().next().unwrap_or_default(),
        line,
        column,
    }
}
