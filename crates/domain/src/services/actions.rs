//! Action rule engine.
//!
//! Actions are the "what to do next" counterpart of insights: at most
//! [`MAX_ACTIONS`] suggestions, each with one or more buttons.

use crate::error::RuleResult;
use crate::models::{ActionButton, InsightsSummary, Priority, Section, UnifiedAction};

use super::action_rules::ACTION_RULES;
use super::rules::{evaluate_rules, Rule};

/// Maximum number of actions ever returned.
pub const MAX_ACTIONS: usize = 5;

pub type ActionCondition = fn(&InsightsSummary) -> RuleResult<bool>;
pub type ActionText = fn(&InsightsSummary) -> RuleResult<String>;
pub type ActionButtons = fn(&InsightsSummary) -> Vec<ActionButton>;

/// One row of the action rule table.
#[derive(Clone, Copy)]
pub struct ActionRule {
    pub id: &'static str,
    pub icon: &'static str,
    pub priority: Priority,
    pub applies_to: &'static [Section],
    pub condition: ActionCondition,
    pub title: ActionText,
    pub reason: ActionText,
    pub buttons: ActionButtons,
}

impl Rule for ActionRule {
    fn id(&self) -> &'static str {
        self.id
    }

    fn priority(&self) -> Priority {
        self.priority
    }

    fn applies_to(&self) -> &'static [Section] {
        self.applies_to
    }
}

impl ActionRule {
    fn materialize(&self, summary: &InsightsSummary) -> RuleResult<Option<UnifiedAction>> {
        if !(self.condition)(summary)? {
            return Ok(None);
        }

        Ok(Some(UnifiedAction {
            id: self.id.to_string(),
            priority: self.priority,
            icon: self.icon.to_string(),
            title: (self.title)(summary)?,
            reason: (self.reason)(summary)?,
            buttons: (self.buttons)(summary),
        }))
    }
}

impl std::fmt::Debug for ActionRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionRule")
            .field("id", &self.id)
            .field("priority", &self.priority)
            .field("applies_to", &self.applies_to)
            .finish()
    }
}

/// Generates up to [`MAX_ACTIONS`] actions for `section`, highest priority first.
///
/// The table is scanned in order and scanning stops once the cap is reached.
pub fn generate_unified_actions(summary: &InsightsSummary, section: Section) -> Vec<UnifiedAction> {
    generate_actions_with_rules(ACTION_RULES, summary, section)
}

/// Same as [`generate_unified_actions`] with a caller-supplied rule table.
pub fn generate_actions_with_rules(
    rules: &[ActionRule],
    summary: &InsightsSummary,
    section: Section,
) -> Vec<UnifiedAction> {
    let mut actions = evaluate_rules(rules, section, Some(MAX_ACTIONS), |rule| {
        rule.materialize(summary)
    });
    actions.truncate(MAX_ACTIONS);
    actions
}
