//! # Kefu - Mode-Based Dialogue Scripting Language
//!
//! Kefu is a small scripting language for menu-driven dialogue agents such
//! as customer-service chatbots. A script declares named modes; each mode
//! lists ordered `if`/`elif`/`else` rules mapping substrings of user input
//! to a response and optional follow-up actions: switching mode with `go`,
//! updating a numeric variable with `set`.
//!
//! ```text
//! start
//! INIT
//!     if "你好" in user_input then
//!         response "您好，很高兴为您服务，请问您的需要是"
//!     elif "账户" in user_input then
//!         response "已转移至账户模式"
//!         go ACCOUNT
//!     else
//!         response "抱歉，我没有理解您的问题"
//! ACCOUNT
//!     if "余额" in user_input then
//!         response "您的余额为 "
//!     elif "退出" in user_input then
//!         response "您已退出账户模式"
//!         go INIT
//! end
//! ```
//!
//! [`build`] turns source text into a live [`Session`]; one call of
//! [`Session::process_input`] evaluates one user turn.
//!
//! ## Modules
//!
//! - [`erro`]: Error handling and reporting
//! - [`lexer`]: Tokenization of source code
//! - [`parser`]: Parsing tokens into the flat statement list
//! - [`runtime`]: Mode table construction and turn-by-turn evaluation

pub mod erro;
pub mod lexer;
pub mod parser;
pub mod runtime;

use erro::ScriptError;
use parser::ast::Program;
pub use runtime::session::Session;

/// Tokenize and parse a script into its statement list.
///
/// The parsed program is independent of any session; a host can build
/// several [`Session`]s from one program.
pub fn parse(script: &str) -> Result<Program, ScriptError> {
    let tokens = lexer::tokenize(script)?;
    Ok(parser::parse_tokens(tokens)?)
}

/// Tokenize, parse and construct a ready dialogue session.
pub fn build(script: &str, initial_balance: f64) -> Result<Session, ScriptError> {
    Ok(Session::new(&parse(script)?, initial_balance))
}
