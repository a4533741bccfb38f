//! Folding the flat statement list into per-mode rule buckets.

use std::collections::HashMap;

use crate::parser::ast::{Program, Rule, RuleKind, Statement};

/// Rule buckets of a single mode, each kept in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModeRules {
    pub if_rules: Vec<Rule>,
    pub elif_rules: Vec<Rule>,
    pub else_rule: Option<Rule>,
}

/// Build the mode table: one pass over the statements, carrying the name
/// of the mode currently being filled.
///
/// Each rule attaches to the most recently declared mode. Rules that
/// precede every declaration have no owner and are dropped, as are the
/// standalone response/action statement forms.
pub fn build_mode_table(program: &Program) -> HashMap<String, ModeRules> {
    let mut modes: HashMap<String, ModeRules> = HashMap::new();
    let mut active: Option<String> = None;

    for statement in &program.statements {
        match statement {
            Statement::Mode { name } => {
                modes.entry(name.clone()).or_default();
                active = Some(name.clone());
            }
            Statement::Rule(rule) => {
                let Some(name) = &active else { continue };
                let bucket = modes.entry(name.clone()).or_default();
                match rule.kind {
                    RuleKind::If => bucket.if_rules.push(rule.clone()),
                    RuleKind::Elif => bucket.elif_rules.push(rule.clone()),
                    RuleKind::Else => bucket.else_rule = Some(rule.clone()),
                }
            }
            Statement::Response { .. } | Statement::Action(_) => {}
        }
    }

    modes
}
