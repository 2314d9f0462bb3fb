//! Analytics services.
//!
//! Everything here is a pure function of the access logs and options passed
//! in. The usual call order is scoring, then [`calculate_insights_summary`],
//! then [`generate_unified_insights`] and [`generate_unified_actions`].

pub mod action_rules;
pub mod actions;
pub mod identity;
pub mod insight_rules;
pub mod insights;
pub mod metrics;
pub mod return_rate;
pub mod rules;
pub mod scoring;
pub mod summary;

pub use action_rules::ACTION_RULES;
pub use actions::{generate_actions_with_rules, generate_unified_actions, ActionRule, MAX_ACTIONS};
pub use identity::{group_by_viewer, viewer_identity, ViewerGroup, ViewerKey};
pub use insight_rules::INSIGHT_RULES;
pub use insights::{
    generate_insights_with_rules, generate_unified_insights, no_views_insight, InsightRule,
    DEFAULT_MAX_INSIGHTS,
};
pub use metrics::{change_percent, percent_of};
pub use return_rate::{calculate_return_rate, calculate_unique_viewers, get_return_stats};
pub use rules::Rule;
pub use scoring::{
    aggregate_viewer, aggregate_viewers, calculate_file_link_score_from_logs,
    calculate_file_score, calculate_track_site_link_score_from_logs, calculate_track_site_score,
    FileScoreInput, LinkScoreGate,
};
pub use summary::{build_contact_summary, calculate_insights_summary, WEEKDAY_NAMES};
