//! Domain models for the Doclink analytics engine.

pub mod access_log;
pub mod insight;
pub mod section;
pub mod summary;
pub mod viewer;

pub use access_log::{classify_intent, AccessLog, ContentKind, IntentBadge};
pub use insight::{ActionButton, ButtonStyle, Insight, InsightCategory, UnifiedAction};
pub use section::{Priority, Section};
pub use summary::{
    ActiveCompany, Breakdown, ContactSummary, HotLead, InsightsSummary, PeriodBaseline,
    SummaryOptions, DEFAULT_FULL_CONFIDENCE_VIEWERS,
};
pub use viewer::{
    AggregatedViewer, EngagementTier, ReturnStats, HOT_SCORE_THRESHOLD, WARM_SCORE_THRESHOLD,
};
