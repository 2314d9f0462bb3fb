//! Engagement scoring.
//!
//! Two viewer-level formulas, chosen by content type:
//!
//! | File / document        | Weight | Track site (external URL) | Weight |
//! |------------------------|--------|---------------------------|--------|
//! | Time on content        | 25%    | Return visitor            | 60%    |
//! | Completion             | 25%    | Click frequency           | 40%    |
//! | Download               | 20%    |                           |        |
//! | Return visitor         | 15%    |                           |        |
//! | Page depth             | 15%    |                           |        |
//!
//! Link-level scores average the viewer scores and scale the result by a
//! volume confidence factor, so a link with a single enthusiastic viewer
//! cannot look as strong as one with a broad engaged audience.

use crate::models::summary::DEFAULT_FULL_CONFIDENCE_VIEWERS;
use crate::models::viewer::{AggregatedViewer, EngagementTier};
use crate::models::AccessLog;
use shared::validation::clamp_percentage;

use super::identity::{group_by_viewer, ViewerGroup, ViewerKey};
use super::metrics::mean;

const TIME_WEIGHT: f64 = 0.25;
const COMPLETION_WEIGHT: f64 = 0.25;
const DOWNLOAD_WEIGHT: f64 = 0.20;
const RETURN_WEIGHT: f64 = 0.15;
const DEPTH_WEIGHT: f64 = 0.15;

const TRACK_SITE_RETURN_WEIGHT: f64 = 0.60;
const TRACK_SITE_FREQUENCY_WEIGHT: f64 = 0.40;
const POINTS_PER_CLICK: u32 = 33;

/// (seconds, score) breakpoints of the time score ramp.
const TIME_SCORE_BREAKPOINTS: [(f64, f64); 6] = [
    (0.0, 0.0),
    (30.0, 25.0),
    (60.0, 40.0),
    (120.0, 60.0),
    (300.0, 80.0),
    (600.0, 100.0),
];

// ============================================================================
// Viewer-level scores
// ============================================================================

/// Behavioral signals of one viewer on a file.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FileScoreInput {
    pub total_duration_seconds: f64,
    pub max_completion_percentage: f64,
    pub downloaded: bool,
    pub visit_count: u32,
    pub max_page_reached: u32,
    pub total_pages: Option<u32>,
}

/// Piecewise linear time score (0-100).
///
/// 0-30s ramps to 25, 30-60s to 40, 60-120s to 60, 120-300s to 80,
/// 300-600s to 100; anything from 600s up scores 100.
pub fn time_score(seconds: f64) -> f64 {
    if !seconds.is_finite() || seconds <= 0.0 {
        return 0.0;
    }

    for pair in TIME_SCORE_BREAKPOINTS.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        if seconds < x1 {
            return y0 + (seconds - x0) / (x1 - x0) * (y1 - y0);
        }
    }

    100.0
}

/// Depth score (0-100): share of pages reached for multi-page documents,
/// otherwise the completion percentage.
pub fn depth_score(max_page_reached: u32, total_pages: Option<u32>, completion: f64) -> f64 {
    match total_pages {
        Some(total) if total > 1 && max_page_reached > 0 => {
            (max_page_reached.min(total) as f64 / total as f64 * 100.0).round()
        }
        _ => clamp_percentage(completion),
    }
}

/// Viewer score for uploaded files (0-100).
pub fn calculate_file_score(input: &FileScoreInput) -> u32 {
    let completion = clamp_percentage(input.max_completion_percentage);
    let download = if input.downloaded { 100.0 } else { 0.0 };
    let returning = if input.visit_count > 1 { 100.0 } else { 0.0 };
    let depth = depth_score(input.max_page_reached, input.total_pages, completion);

    let score = time_score(input.total_duration_seconds) * TIME_WEIGHT
        + completion * COMPLETION_WEIGHT
        + download * DOWNLOAD_WEIGHT
        + returning * RETURN_WEIGHT
        + depth * DEPTH_WEIGHT;

    (score.round() as u32).min(100)
}

/// Viewer score for tracked external URLs (0-100).
///
/// A single click with no return visit scores 13, not 0: frequency alone
/// contributes `min(100, clicks * 33) * 0.40`.
pub fn calculate_track_site_score(clicks: u32, is_return_visitor: bool) -> u32 {
    let returning = if is_return_visitor { 100.0 } else { 0.0 };
    let frequency = clicks.saturating_mul(POINTS_PER_CLICK).min(100) as f64;

    let score = returning * TRACK_SITE_RETURN_WEIGHT + frequency * TRACK_SITE_FREQUENCY_WEIGHT;
    (score.round() as u32).min(100)
}

/// Folds one viewer's logs into an [`AggregatedViewer`] and scores it.
pub fn aggregate_viewer(
    group: &ViewerGroup<'_>,
    is_external_url: bool,
    total_pages: Option<u32>,
) -> AggregatedViewer {
    let total_clicks = group.visits();
    let is_return_visitor = group.is_return_visitor();

    let total_duration_seconds: f64 = group.logs.iter().map(|l| l.duration_seconds()).sum();
    let max_completion_percentage = group
        .logs
        .iter()
        .map(|l| l.completion())
        .fold(0.0, f64::max);
    let max_page_reached = group
        .logs
        .iter()
        .filter_map(|l| l.max_page_reached)
        .max()
        .unwrap_or(0);
    let downloaded = group.logs.iter().any(|l| l.is_downloaded());

    let first_accessed_at = group
        .logs
        .iter()
        .map(|l| l.accessed_at)
        .min()
        .unwrap_or_default();
    let last_accessed_at = group
        .logs
        .iter()
        .map(|l| l.accessed_at)
        .max()
        .unwrap_or_default();

    let engagement_score = if is_external_url {
        calculate_track_site_score(total_clicks, is_return_visitor)
    } else {
        calculate_file_score(&FileScoreInput {
            total_duration_seconds,
            max_completion_percentage,
            downloaded,
            visit_count: total_clicks,
            max_page_reached,
            total_pages,
        })
    };

    let email = match group.key {
        ViewerKey::Email(email) => Some(email.to_string()),
        _ => None,
    };
    let name = group
        .logs
        .iter()
        .find_map(|l| l.viewer_name.as_deref().map(str::trim).filter(|n| !n.is_empty()))
        .map(str::to_string);

    AggregatedViewer {
        key: group.key.to_string(),
        email,
        name,
        total_clicks,
        is_return_visitor,
        total_duration_seconds,
        max_completion_percentage,
        max_page_reached,
        downloaded,
        first_accessed_at,
        last_accessed_at,
        engagement_score,
        tier: EngagementTier::from_score(engagement_score),
    }
}

/// Groups logs into viewers and scores each, in first-appearance order.
pub fn aggregate_viewers(
    logs: &[AccessLog],
    is_external_url: bool,
    total_pages: Option<u32>,
) -> Vec<AggregatedViewer> {
    group_by_viewer(logs)
        .iter()
        .map(|group| aggregate_viewer(group, is_external_url, total_pages))
        .collect()
}

// ============================================================================
// Link-level scores
// ============================================================================

/// Volume gate for link-level scores.
///
/// `confidence = min(1, ln(1 + viewers) / ln(1 + full_confidence_viewers))`
/// counts distinct viewers, not visits, so one viewer coming back many times
/// does not raise it. It grows monotonically and reaches 1 at
/// `full_confidence_viewers`. The link score is the mean viewer score times
/// the confidence, so each viewer weighs `1/n` and a single viewer can reach
/// at most `100 * ln 2 / ln 21`, about 23 with the default gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkScoreGate {
    pub full_confidence_viewers: u32,
}

impl Default for LinkScoreGate {
    fn default() -> Self {
        Self {
            full_confidence_viewers: DEFAULT_FULL_CONFIDENCE_VIEWERS,
        }
    }
}

impl LinkScoreGate {
    pub fn new(full_confidence_viewers: u32) -> Self {
        Self {
            full_confidence_viewers: full_confidence_viewers.max(1),
        }
    }

    /// Confidence factor (0.0 - 1.0) for a given number of distinct viewers.
    pub fn confidence(&self, viewers: usize) -> f64 {
        if viewers == 0 {
            return 0.0;
        }
        let full = self.full_confidence_viewers.max(1) as f64;
        ((1.0 + viewers as f64).ln() / (1.0 + full).ln()).min(1.0)
    }

    /// Gated score from already-scored viewers.
    pub fn gate(&self, viewers: &[AggregatedViewer]) -> u32 {
        let sum: f64 = viewers.iter().map(|v| v.engagement_score as f64).sum();
        let avg = mean(sum, viewers.len());
        ((avg * self.confidence(viewers.len())).round() as u32).min(100)
    }

    pub fn file_link_score(&self, logs: &[AccessLog], total_pages: Option<u32>) -> u32 {
        self.gate(&aggregate_viewers(logs, false, total_pages))
    }

    pub fn track_site_link_score(&self, logs: &[AccessLog]) -> u32 {
        self.gate(&aggregate_viewers(logs, true, None))
    }
}

/// Link-level score for an uploaded file, using the default volume gate.
pub fn calculate_file_link_score_from_logs(logs: &[AccessLog], total_pages: Option<u32>) -> u32 {
    LinkScoreGate::default().file_link_score(logs, total_pages)
}

/// Link-level score for a tracked external URL, using the default volume gate.
pub fn calculate_track_site_link_score_from_logs(logs: &[AccessLog]) -> u32 {
    LinkScoreGate::default().track_site_link_score(logs)
}
