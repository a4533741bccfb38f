//! Session state and turn evaluation.

use std::collections::HashMap;
use std::io::{self, BufRead, Write};

use super::modes::{self, ModeRules};
use crate::erro::RechargeError;
use crate::parser::ast::{Action, Expr, Program, Rule};

/// Mode every session starts in.
const INIT_MODE: &str = "INIT";
/// The one mode recharging is allowed from.
const ACCOUNT_MODE: &str = "ACCOUNT";
/// The distinguished variable name backed by the session balance.
const BALANCE_VAR: &str = "balance";
/// Substring of user input that diverts a matched turn into the recharge
/// sub-dialogue.
const RECHARGE_TRIGGER: &str = "充值";
/// Substring of a response that gets the current balance appended.
const BALANCE_KEYWORD: &str = "余额";
/// Console sentinel that ends [`Session::run`].
const EXIT_SENTINEL: &str = "exit";

const TURN_PROMPT: &str = "请输入您的问题: ";
const RECHARGE_PROMPT: &str = "请输入您所充值的金额（浮动数）：";

/// Mutable per-turn state. One context belongs to exactly one session.
#[derive(Debug, Clone)]
struct Context {
    balance: f64,
    current_mode: String,
    user_input: String,
    variables: HashMap<String, f64>,
}

impl Context {
    fn new(balance: f64) -> Self {
        Context {
            balance,
            current_mode: INIT_MODE.to_string(),
            user_input: String::new(),
            variables: HashMap::new(),
        }
    }

    /// Numeric read with the default-before-set semantics: unset names
    /// read as 0.0. `balance` is backed by the balance field.
    fn read_var(&self, name: &str) -> f64 {
        if name == BALANCE_VAR {
            self.balance
        } else {
            self.variables.get(name).copied().unwrap_or(0.0)
        }
    }

    fn write_var(&mut self, name: &str, value: f64) {
        if name == BALANCE_VAR {
            self.balance = value;
        } else {
            self.variables.insert(name.to_string(), value);
        }
    }
}

/// A live dialogue session: the mode table built once from a parsed
/// program, plus the mutable context evaluated one turn at a time.
///
/// The program itself is not retained; several sessions can be built from
/// one parsed program.
pub struct Session {
    modes: HashMap<String, ModeRules>,
    context: Context,
}

impl Session {
    /// Fold the program's statements into the mode table and start a
    /// fresh context in `INIT`.
    pub fn new(program: &Program, initial_balance: f64) -> Self {
        Session {
            modes: modes::build_mode_table(program),
            context: Context::new(initial_balance),
        }
    }

    /// Current account balance.
    pub fn balance(&self) -> f64 {
        self.context.balance
    }

    /// Name of the mode the session is currently in.
    pub fn current_mode(&self) -> &str {
        &self.context.current_mode
    }

    /// Value of a script variable, 0.0 if never assigned.
    pub fn variable(&self, name: &str) -> f64 {
        self.context.read_var(name)
    }

    /// Evaluate one user turn. `None` means no rule matched and there is
    /// nothing to show.
    ///
    /// When the recharge trigger appears in the input, this form owns a
    /// blocking stdin loop for the amount exchange. Hosts that cannot
    /// block should watch for the trigger themselves and call
    /// [`Session::recharge`] with an amount they collected, or supply
    /// their own line source through [`Session::process_input_from`].
    pub fn process_input(&mut self, user_text: &str) -> Option<String> {
        let stdin = io::stdin();
        self.process_input_from(user_text, &mut stdin.lock())
    }

    /// Same turn evaluation with an explicit line source for the
    /// recharge sub-dialogue.
    pub fn process_input_from<R: BufRead>(
        &mut self,
        user_text: &str,
        lines: &mut R,
    ) -> Option<String> {
        self.context.user_input = user_text.to_string();

        // An unknown current mode behaves as if it had empty rule lists.
        let rules = self.modes.get(&self.context.current_mode)?;
        let rule = find_rule(rules, user_text)?.clone();

        self.run_actions(&rule.actions);

        if user_text.contains(RECHARGE_TRIGGER) {
            return self.recharge_dialogue(lines);
        }
        if rule.response.contains(BALANCE_KEYWORD) {
            return Some(format!("{} {:.2}", rule.response, self.context.balance));
        }
        Some(rule.response)
    }

    /// Execute a matched rule's actions in source order.
    fn run_actions(&mut self, actions: &[Action]) {
        for action in actions {
            match action {
                Action::Go { mode } => {
                    self.context.current_mode = mode.clone();
                }
                Action::Set { variable, expr } => self.run_set(variable, expr),
            }
        }
    }

    fn run_set(&mut self, variable: &str, expr: &Expr) {
        let value = match expr {
            Expr::Number(text) => text.parse().unwrap_or(0.0),
            Expr::Variable(name) => self.context.read_var(name),
            Expr::Addition { left, .. } => {
                // The parsed right operand is ignored: `set x = x + user_input`
                // appends whatever the user just typed, re-read as a number.
                // A turn whose input does not parse skips the assignment and
                // still produces its response.
                let left = self.context.read_var(left);
                match self.context.user_input.trim().parse::<f64>() {
                    Ok(right) => left + right,
                    Err(_) => {
                        if self.context.user_input.contains(RECHARGE_TRIGGER) {
                            eprintln!("正在处理充值，请输入金额。");
                        } else {
                            eprintln!(
                                "无效输入：'{}'，无法进行加法运算。",
                                self.context.user_input
                            );
                        }
                        return;
                    }
                }
            }
        };
        self.context.write_var(variable, value);
    }

    /// The blocking amount exchange: prompt, read one line, re-prompt on
    /// invalid or negative amounts, commit the first valid one. `None`
    /// when the line source runs dry mid-dialogue.
    ///
    /// Outside the account mode this refuses without reading any input.
    fn recharge_dialogue<R: BufRead>(&mut self, lines: &mut R) -> Option<String> {
        if self.context.current_mode != ACCOUNT_MODE {
            return Some(RechargeError::WrongMode.to_string());
        }

        loop {
            print!("{RECHARGE_PROMPT}");
            let _ = io::stdout().flush();

            let mut line = String::new();
            match lines.read_line(&mut line) {
                Ok(0) | Err(_) => return None,
                Ok(_) => {}
            }

            let attempt = match line.trim().parse::<f64>() {
                Ok(amount) => self.recharge(amount),
                Err(_) => Err(RechargeError::Invalid),
            };
            match attempt {
                Ok(confirmation) => return Some(confirmation),
                Err(error) => println!("{error}"),
            }
        }
    }

    /// Validate-and-commit half of the recharge exchange, for hosts that
    /// collected the amount themselves. Wrong-mode calls and NaN or
    /// negative amounts are rejected without touching the balance.
    pub fn recharge(&mut self, amount: f64) -> Result<String, RechargeError> {
        if self.context.current_mode != ACCOUNT_MODE {
            return Err(RechargeError::WrongMode);
        }
        if amount.is_nan() {
            return Err(RechargeError::Invalid);
        }
        if amount < 0.0 {
            return Err(RechargeError::Negative);
        }
        self.context.balance += amount;
        Ok(format!("充值成功！您的新余额为 {:.2} 元", self.context.balance))
    }

    /// Interactive console loop: one line per turn until end of input or
    /// the `exit` sentinel. Turns without a response print nothing.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let mut lines = stdin.lock();

        loop {
            print!("{TURN_PROMPT}");
            io::stdout().flush()?;

            let mut line = String::new();
            if lines.read_line(&mut line)? == 0 {
                return Ok(());
            }
            let user_text = line.trim_end_matches(['\n', '\r']);
            if user_text.eq_ignore_ascii_case(EXIT_SENTINEL) {
                return Ok(());
            }

            if let Some(response) = self.process_input_from(user_text, &mut lines) {
                println!("{response}");
            }
        }
    }
}

/// First matching if-rule, else first matching elif-rule, else the
/// else-rule when the mode has one.
fn find_rule<'a>(rules: &'a ModeRules, user_text: &str) -> Option<&'a Rule> {
    rules
        .if_rules
        .iter()
        .chain(&rules.elif_rules)
        .find(|rule| rule_matches(rule, user_text))
        .or(rules.else_rule.as_ref())
}

fn rule_matches(rule: &Rule, user_text: &str) -> bool {
    rule.conditions.iter().any(|needle| user_text.contains(needle))
}
