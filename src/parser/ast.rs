/// A parsed script: the flat, source-ordered statement list found between
/// `start` and `end`.
///
/// Rules are not nested under their mode here. A rule belongs to the most
/// recently declared mode, and that ownership is established later when
/// the mode table is built.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

/// Top-level statement forms.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Declaration of a named dialogue state
    Mode { name: String },
    /// An `if`/`elif`/`else` rule with its attached actions
    Rule(Rule),
    /// A bare `response` outside any rule
    Response { message: String },
    /// A bare `go`/`set` outside any rule
    Action(Action),
}

/// Which bucket of a mode a rule evaluates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    If,
    Elif,
    Else,
}

/// One condition-triggered response.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub kind: RuleKind,
    /// Substrings that trigger the rule when any of them appears in the
    /// user input. Empty for `else`, which always matches when reached.
    pub conditions: Vec<String>,
    pub response: String,
    /// Trailing `go`/`set` statements, executed in source order when the
    /// rule fires
    pub actions: Vec<Action>,
}

/// Side effect attached to a rule.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// `go MODE`: switch the session to another mode
    Go { mode: String },
    /// `set name = expr`: assign a numeric variable
    Set { variable: String, expr: Expr },
}

/// Right-hand side of a `set`.
///
/// Operands stay textual: they are resolved against the variable store
/// when the owning rule fires, never at parse time.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(String),
    Variable(String),
    Addition { left: String, right: String },
}
