//! Viewer-level aggregates derived from access logs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Score at or above which a viewer (or link) is hot.
pub const HOT_SCORE_THRESHOLD: u32 = 70;

/// Score at or above which a viewer (or link) is warm.
pub const WARM_SCORE_THRESHOLD: u32 = 40;

/// Engagement tier derived from a 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngagementTier {
    Hot,
    Warm,
    #[default]
    Cold,
}

impl EngagementTier {
    /// Classify a score: >= 70 hot, >= 40 warm, otherwise cold.
    pub fn from_score(score: u32) -> Self {
        if score >= HOT_SCORE_THRESHOLD {
            EngagementTier::Hot
        } else if score >= WARM_SCORE_THRESHOLD {
            EngagementTier::Warm
        } else {
            EngagementTier::Cold
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EngagementTier::Hot => "hot",
            EngagementTier::Warm => "warm",
            EngagementTier::Cold => "cold",
        }
    }
}

impl fmt::Display for EngagementTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// All visits of one viewer identity folded into a single record.
///
/// Rebuilt from the access logs on every call; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedViewer {
    /// Identity key (email, IP, session or log id).
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub total_clicks: u32,
    pub is_return_visitor: bool,
    pub total_duration_seconds: f64,
    pub max_completion_percentage: f64,
    pub max_page_reached: u32,
    pub downloaded: bool,
    pub first_accessed_at: DateTime<Utc>,
    pub last_accessed_at: DateTime<Utc>,
    pub engagement_score: u32,
    pub tier: EngagementTier,
}

/// Return-visit statistics for one log set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnStats {
    pub unique_viewers: u32,
    pub returning_viewers: u32,
    pub single_visit_viewers: u32,
    /// Unrounded share of returning viewers (0.0 - 1.0).
    pub return_ratio: f64,
    /// Rounded return rate (0 - 100).
    pub return_rate: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(EngagementTier::from_score(100), EngagementTier::Hot);
        assert_eq!(EngagementTier::from_score(70), EngagementTier::Hot);
        assert_eq!(EngagementTier::from_score(69), EngagementTier::Warm);
        assert_eq!(EngagementTier::from_score(40), EngagementTier::Warm);
        assert_eq!(EngagementTier::from_score(39), EngagementTier::Cold);
        assert_eq!(EngagementTier::from_score(0), EngagementTier::Cold);
    }

    #[test]
    fn test_tier_display() {
        assert_eq!(EngagementTier::Hot.to_string(), "hot");
        assert_eq!(serde_json::to_string(&EngagementTier::Warm).unwrap(), "\"warm\"");
    }
}
