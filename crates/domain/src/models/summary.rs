//! Insights summary domain models.
//!
//! The summary is a flat, precomputed view over one log set. Both rule engines
//! read it and never touch the raw metrics themselves.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::validation::{validate_page_number, validate_utc_offset_minutes};
use validator::ValidationErrors;

use super::section::Section;
use super::viewer::EngagementTier;

/// Default number of views at which a link score reaches full confidence.
pub const DEFAULT_FULL_CONFIDENCE_VIEWERS: u32 = 20;

// ============================================================================
// Options
// ============================================================================

/// Metrics of the previous period used for trend deltas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodBaseline {
    pub views: u32,
    pub unique_viewers: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_engagement: Option<u32>,
}

/// Options for building an insights summary. Every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SummaryOptions {
    /// Section the summary is built for (default: dashboard).
    pub section: Section,
    /// Page count of the shared document, when known.
    pub total_pages: Option<u32>,
    /// Force the track-site scoring formula. Defaults to the section's kind.
    pub is_external_url: Option<bool>,
    /// Previous-period baseline for trend insights.
    pub previous: Option<PeriodBaseline>,
    /// Contact details passed through for the contacts section.
    pub contact: Option<ContactSummary>,
    /// Reference time for recency metrics. When unset the latest log is used,
    /// so `days_since_last_view` is 0; pass the current time (as
    /// `EngineConfig::summary_options` does) for the gone-quiet and reshare
    /// rules to fire.
    pub now: Option<DateTime<Utc>>,
    /// Viewer timezone offset applied to peak day/hour buckets.
    pub utc_offset_minutes: i32,
    /// Distinct viewers needed before a link score is trusted in full.
    pub full_confidence_viewers: u32,
    /// Extra free-mail domains excluded from company detection.
    pub extra_consumer_domains: Vec<String>,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            section: Section::Dashboard,
            total_pages: None,
            is_external_url: None,
            previous: None,
            contact: None,
            now: None,
            utc_offset_minutes: 0,
            full_confidence_viewers: DEFAULT_FULL_CONFIDENCE_VIEWERS,
            extra_consumer_domains: Vec::new(),
        }
    }
}

impl SummaryOptions {
    pub fn for_section(section: Section) -> Self {
        Self {
            section,
            ..Default::default()
        }
    }

    /// Whether the track-site formula applies.
    pub fn external_url(&self) -> bool {
        self.is_external_url
            .unwrap_or_else(|| self.section.is_external_url())
    }

    /// Validate option values supplied by callers.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = validate_utc_offset_minutes(self.utc_offset_minutes) {
            errors.add("utc_offset_minutes", e);
        }
        if let Some(pages) = self.total_pages {
            if let Err(e) = validate_page_number(pages) {
                errors.add("total_pages", e);
            }
        }
        if self.full_confidence_viewers == 0 {
            let mut err = validator::ValidationError::new("full_confidence_viewers_range");
            err.message = Some("full_confidence_viewers must be at least 1".into());
            errors.add("full_confidence_viewers", err);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

// ============================================================================
// Summary building blocks
// ============================================================================

/// A hot viewer with a known email address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotLead {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Company guessed from a non-consumer email domain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub score: u32,
    pub visits: u32,
    pub total_duration_seconds: f64,
    pub downloaded: bool,
    pub last_accessed_at: DateTime<Utc>,
}

impl HotLead {
    /// Name if known, otherwise the email address.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

/// Two or more distinct viewers sharing one business email domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveCompany {
    pub domain: String,
    pub name: String,
    pub viewer_count: u32,
    pub view_count: u32,
}

/// One bucket of a percentage breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakdown {
    pub label: String,
    pub count: u32,
    pub percent: u32,
}

/// Everything known about a single contact, for the contacts section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSummary {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub total_visits: u32,
    pub unique_files: u32,
    #[serde(default)]
    pub file_names: Vec<String>,
    pub total_duration_seconds: f64,
    pub engagement_score: u32,
    pub tier: EngagementTier,
    pub downloaded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_seen_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_since_last_visit: Option<i64>,
}

impl ContactSummary {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

// ============================================================================
// Insights Summary
// ============================================================================

/// Every metric the insight and action rules read, computed once per
/// (logs, section) pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsSummary {
    pub section: Section,

    // Audience
    pub total_views: u32,
    pub unique_viewers: u32,
    pub identified_viewers: u32,
    pub anonymous_viewers: u32,
    pub return_visitors: u32,
    pub return_rate: u32,

    // Scores
    pub avg_engagement: u32,
    pub link_score: u32,
    pub link_tier: EngagementTier,
    pub hot_leads_count: u32,
    pub warm_leads_count: u32,
    pub cold_leads_count: u32,
    pub hot_leads: Vec<HotLead>,
    pub active_companies: Vec<ActiveCompany>,

    // Attention
    pub total_duration_seconds: f64,
    pub avg_duration_seconds: f64,
    pub avg_completion: f64,
    pub full_completion_count: u32,
    pub completion_rate: u32,
    pub downloads: u32,
    pub download_rate: u32,

    // Geography
    pub countries: Vec<Breakdown>,
    pub country_count: u32,
    pub top_country: Option<String>,
    pub top_country_percent: u32,
    pub top_city: Option<String>,

    // Devices
    pub mobile_percent: u32,
    pub desktop_percent: u32,
    pub tablet_percent: u32,
    pub top_browser: Option<String>,

    // Acquisition
    pub social_percent: u32,
    pub search_percent: u32,
    pub referral_percent: u32,
    pub direct_percent: u32,
    pub email_percent: u32,
    pub top_traffic_source: Option<String>,
    pub top_campaign: Option<String>,
    pub campaign_count: u32,
    pub qr_scans: u32,
    pub qr_scan_percent: u32,

    // Timing
    pub peak_day: Option<String>,
    pub peak_day_index: Option<u8>,
    pub peak_day_percent: u32,
    pub peak_hour: Option<u8>,
    pub peak_hour_percent: u32,
    pub weekend_percent: u32,
    pub after_hours_percent: u32,
    pub views_last_24h: u32,
    pub days_since_last_view: Option<i64>,

    // Content mix
    pub doc_views: u32,
    pub media_views: u32,
    pub image_views: u32,
    pub url_views: u32,
    pub other_views: u32,
    pub files_count: u32,
    pub top_file: Option<String>,
    pub top_file_views: u32,

    // Document pages (only when total_pages > 1)
    pub total_pages: Option<u32>,
    pub avg_pages_reached: f64,
    pub most_engaging_page: Option<u32>,
    pub most_engaging_page_seconds: f64,
    pub avg_page_seconds: f64,
    pub drop_off_page: Option<u32>,
    pub drop_off_rate: u32,
    pub reached_last_page_percent: u32,

    // Media
    pub avg_watch_completion: f64,
    pub watch_completion_rate: u32,
    pub early_drop_rate: u32,
    pub avg_watch_time_seconds: f64,

    // Trends vs previous period
    pub previous_views: Option<u32>,
    pub views_change_percent: Option<i32>,
    pub viewers_change_percent: Option<i32>,
    pub engagement_change: Option<i32>,

    pub contact: Option<ContactSummary>,
}
