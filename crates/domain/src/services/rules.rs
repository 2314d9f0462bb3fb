//! Shared evaluation loop for the insight and action rule tables.
//!
//! A rule that returns an error or panics is logged and treated as not
//! firing; it never aborts the pass or reaches the caller.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::error::{RuleError, RuleResult};
use crate::models::{Priority, Section};

/// Metadata every rule table entry exposes to the evaluation loop.
pub trait Rule {
    fn id(&self) -> &'static str;
    fn priority(&self) -> Priority;
    fn applies_to(&self) -> &'static [Section];

    fn applies(&self, section: Section) -> bool {
        self.applies_to().contains(&section)
    }
}

/// Evaluates `rules` in table order for `section`.
///
/// `evaluate` returns `Ok(Some(item))` when the rule fires. With `stop_after`
/// set, scanning stops once that many items have been collected. The result
/// is stably sorted by priority weight, so table order breaks ties.
pub(crate) fn evaluate_rules<R, T, F>(
    rules: &[R],
    section: Section,
    stop_after: Option<usize>,
    mut evaluate: F,
) -> Vec<T>
where
    R: Rule,
    F: FnMut(&R) -> RuleResult<Option<T>>,
{
    let mut fired: Vec<(Priority, T)> = Vec::new();

    for rule in rules.iter().filter(|r| r.applies(section)) {
        if stop_after.is_some_and(|limit| fired.len() >= limit) {
            break;
        }

        let outcome = catch_unwind(AssertUnwindSafe(|| evaluate(rule)))
            .unwrap_or_else(|payload| Err(RuleError::Panicked(panic_message(payload))));

        match outcome {
            Ok(Some(item)) => fired.push((rule.priority(), item)),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(
                    rule_id = rule.id(),
                    section = %section,
                    error = %e,
                    "Skipping rule that failed to evaluate"
                );
            }
        }
    }

    fired.sort_by_key(|(priority, _)| priority.weight());
    fired.into_iter().map(|(_, item)| item).collect()
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
