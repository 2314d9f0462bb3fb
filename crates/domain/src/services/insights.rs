//! Insight rule engine.

use crate::error::RuleResult;
use crate::models::{AccessLog, Insight, InsightCategory, InsightsSummary, Priority, Section};

use super::insight_rules::INSIGHT_RULES;
use super::rules::{evaluate_rules, Rule};

/// Default cap on the number of insights returned.
pub const DEFAULT_MAX_INSIGHTS: usize = 8;

pub type InsightCondition = fn(&InsightsSummary, &[AccessLog]) -> RuleResult<bool>;
pub type InsightText = fn(&InsightsSummary, &[AccessLog]) -> RuleResult<String>;

/// One row of the insight rule table.
#[derive(Clone, Copy)]
pub struct InsightRule {
    pub id: &'static str,
    pub icon: &'static str,
    pub priority: Priority,
    pub category: InsightCategory,
    pub applies_to: &'static [Section],
    pub condition: InsightCondition,
    pub text: InsightText,
    pub implication: InsightText,
}

impl Rule for InsightRule {
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

impl InsightRule {
    fn materialize(&self, summary: &InsightsSummary, logs: &[AccessLog]) -> RuleResult<Option<Insight>> {
        if !(self.condition)(summary, logs)? {
            return Ok(None);
        }

        Ok(Some(Insight {
            id: self.id.to_string(),
            icon: self.icon.to_string(),
            text: (self.text)(summary, logs)?,
            implication: (self.implication)(summary, logs)?,
            priority: self.priority,
            category: self.category,
        }))
    }
}

impl std::fmt::Debug for InsightRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InsightRule")
            .field("id", &self.id)
            .field("priority", &self.priority)
            .field("applies_to", &self.applies_to)
            .finish()
    }
}

/// The canned insight returned when a link has no views at all.
pub fn no_views_insight() -> Insight {
    Insight {
        id: "no-views".to_string(),
        icon: "📊".to_string(),
        text: "No views yet".to_string(),
        implication: "Share your link to start collecting engagement data.".to_string(),
        priority: Priority::Low,
        category: InsightCategory::Engagement,
    }
}

/// Generates insights for `section` from the built-in rule table.
///
/// Returns at most `max_total` insights ordered high, medium, low, with table
/// order breaking ties. Empty `logs` always yield the single no-views insight.
pub fn generate_unified_insights(
    logs: &[AccessLog],
    summary: &InsightsSummary,
    section: Section,
    max_total: usize,
) -> Vec<Insight> {
    generate_insights_with_rules(INSIGHT_RULES, logs, summary, section, max_total)
}

/// Same as [`generate_unified_insights`] with a caller-supplied rule table.
pub fn generate_insights_with_rules(
    rules: &[InsightRule],
    logs: &[AccessLog],
    summary: &InsightsSummary,
    section: Section,
    max_total: usize,
) -> Vec<Insight> {
    if logs.is_empty() {
        return vec![no_views_insight()];
    }

    let mut insights = evaluate_rules(rules, section, None, |rule| {
        rule.materialize(summary, logs)
    });
    insights.truncate(max_total);
    insights
}
