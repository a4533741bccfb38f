use crate::lexer::TokenKind;

/// Errors that can happen on lexing level
#[derive(thiserror::Error, Debug, PartialEq, Clone)]
pub enum LexerError {
    /// A character no lexical pattern covers. Tokenization halts here;
    /// there is no recovery and no partial token list.
    #[error("unrecognized character '{ch}' at line {line}, column {column}")]
    UnrecognizedChar {
        /// The offending character
        ch: char,
        /// 1-based source line
        line: usize,
        /// 1-based column, counted in characters
        column: usize,
    },
}

/// Fatal script-structure errors raised while parsing
#[derive(thiserror::Error, Debug, PartialEq, Clone)]
pub enum SyntaxError {
    /// A required token was missing at the current position
    #[error("expected {expected} but got '{found}'")]
    UnexpectedToken {
        /// What the grammar required here
        expected: TokenKind,
        /// Lexeme of the token actually found
        found: String,
    },

    /// A token that cannot begin a statement
    #[error("unexpected token '{0}'")]
    UnexpectedStatement(String),

    /// The token stream ran out before the grammar was satisfied
    #[error("unexpected end of script, expected {0}")]
    UnexpectedEnd(TokenKind),

    /// The expression position held neither a number nor an identifier
    #[error("expected a number or identifier but got '{0}'")]
    ExpectedOperand(String),

    /// The same mode name was declared twice
    #[error("duplicate mode '{0}'")]
    DuplicateMode(String),

    /// Every script must declare an `INIT` mode; checked once the whole
    /// program has parsed
    #[error("missing 'INIT' mode in the script")]
    MissingInit,
}

/// Either of the fatal construction-time failures, as returned by
/// [`build`](crate::build) and [`parse`](crate::parse).
#[derive(thiserror::Error, Debug, PartialEq, Clone)]
pub enum ScriptError {
    #[error(transparent)]
    Lexer(#[from] LexerError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

/// Recoverable outcomes of the recharge exchange. These never abort a
/// session; the interactive sub-dialogue prints them and re-prompts.
/// The display texts are the exact user-facing messages.
#[derive(thiserror::Error, Debug, PartialEq, Clone)]
pub enum RechargeError {
    /// Amounts below zero are rejected without touching the balance
    #[error("金额不能为负，请重新输入。")]
    Negative,

    /// Input that does not read as a decimal number
    #[error("输入无效，请确保您输入的是一个有效的数字。")]
    Invalid,

    /// Recharging is only available from the account mode
    #[error("无法进行充值操作。请先进入账户模式。")]
    WrongMode,
}
