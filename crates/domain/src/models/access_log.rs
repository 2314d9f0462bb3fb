//! Access log domain model.
//!
//! One access log is recorded every time a viewer opens a shared link. The
//! engine treats logs as read-only input and tolerates any missing field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::validation::clamp_percentage;
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;
use validator::Validate;

// ============================================================================
// Core Model
// ============================================================================

/// A single visit to a shared file or tracked link.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AccessLog {
    pub id: Uuid,

    // Identity
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Invalid viewer email"))]
    pub viewer_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    // Timing
    pub accessed_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, message = "Duration must be non-negative"))]
    pub total_duration_seconds: Option<f64>,
    /// Seconds spent per page, keyed by 1-based page number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages_time_data: Option<HashMap<u32, f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, message = "Page numbers start at 1"))]
    pub exit_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, message = "Page numbers start at 1"))]
    pub max_page_reached: Option<u32>,

    // Content signals
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, max = 100.0, message = "Completion must be between 0 and 100"))]
    pub completion_percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, max = 100.0, message = "Completion must be between 0 and 100"))]
    pub video_completion_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, message = "Duration must be non-negative"))]
    pub video_duration_seconds: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, message = "Watch time must be non-negative"))]
    pub watch_time_seconds: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downloaded: Option<bool>,

    // Context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,

    // Acquisition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traffic_source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utm_campaign: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_qr_scan: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_method: Option<String>,

    // Association
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

impl AccessLog {
    /// Create an empty log with a fresh id.
    pub fn new(accessed_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            accessed_at,
            ..Default::default()
        }
    }

    /// Time spent on this visit in seconds.
    ///
    /// Falls back to the sum of per-page times, then to video watch time.
    pub fn duration_seconds(&self) -> f64 {
        let duration = self
            .total_duration_seconds
            .or_else(|| {
                self.pages_time_data
                    .as_ref()
                    .filter(|pages| !pages.is_empty())
                    .map(|pages| pages.values().filter(|s| s.is_finite()).sum())
            })
            .or(self.watch_time_seconds)
            .unwrap_or(0.0);

        if duration.is_finite() {
            duration.max(0.0)
        } else {
            0.0
        }
    }

    /// Completion of this visit (0-100), the larger of document and video completion.
    pub fn completion(&self) -> f64 {
        let doc = self.completion_percentage.map(clamp_percentage).unwrap_or(0.0);
        let video = self
            .video_completion_percent
            .map(clamp_percentage)
            .unwrap_or(0.0);
        doc.max(video)
    }

    pub fn is_downloaded(&self) -> bool {
        self.downloaded.unwrap_or(false)
    }

    pub fn is_qr_scan(&self) -> bool {
        self.is_qr_scan.unwrap_or(false) || self.access_method.as_deref() == Some("qr_scan")
    }

    /// Email with surrounding whitespace removed, if present and non-blank.
    pub fn email(&self) -> Option<&str> {
        non_blank(self.viewer_email.as_deref())
    }

    pub fn content_kind(&self) -> ContentKind {
        self.file_name
            .as_deref()
            .map(ContentKind::from_file_name)
            .unwrap_or(ContentKind::Other)
    }
}

/// Returns the trimmed value when it contains something other than whitespace.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

// ============================================================================
// Content Kind
// ============================================================================

const DOCUMENT_EXTENSIONS: &[&str] = &[
    "pdf", "doc", "docx", "ppt", "pptx", "key", "xls", "xlsx", "csv", "odt", "odp", "ods",
    "txt", "rtf", "md", "pages", "numbers",
];
const MEDIA_EXTENSIONS: &[&str] = &[
    "mp4", "mov", "webm", "mkv", "avi", "m4v", "mp3", "wav", "m4a", "aac", "ogg", "flac",
];
const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "webp", "svg", "bmp", "heic", "tiff",
];

/// Broad content category of the shared link a log belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Document,
    Media,
    Image,
    Url,
    Other,
}

impl ContentKind {
    /// Classifies a file name (or URL) by its extension.
    pub fn from_file_name(name: &str) -> Self {
        let name = name.trim().to_ascii_lowercase();
        if name.starts_with("http://") || name.starts_with("https://") || name.starts_with("www.")
        {
            return ContentKind::Url;
        }

        let extension = match name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => ext,
            _ => return ContentKind::Other,
        };

        if DOCUMENT_EXTENSIONS.contains(&extension) {
            ContentKind::Document
        } else if MEDIA_EXTENSIONS.contains(&extension) {
            ContentKind::Media
        } else if IMAGE_EXTENSIONS.contains(&extension) {
            ContentKind::Image
        } else {
            ContentKind::Other
        }
    }
}

// ============================================================================
// Intent Badge
// ============================================================================

/// Per-visit badge summarizing what a viewer did during one visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentBadge {
    Downloaded,
    ReadFully,
    Engaged,
    Skimmed,
    Bounced,
}

impl IntentBadge {
    pub fn label(&self) -> &'static str {
        match self {
            IntentBadge::Downloaded => "Downloaded",
            IntentBadge::ReadFully => "Read fully",
            IntentBadge::Engaged => "Engaged",
            IntentBadge::Skimmed => "Skimmed",
            IntentBadge::Bounced => "Bounced",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            IntentBadge::Downloaded => "📥",
            IntentBadge::ReadFully => "✅",
            IntentBadge::Engaged => "👀",
            IntentBadge::Skimmed => "📄",
            IntentBadge::Bounced => "💨",
        }
    }
}

impl fmt::Display for IntentBadge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.icon(), self.label())
    }
}

/// Classifies a single visit into an intent badge.
///
/// Checks run strongest signal first: download, then completion >= 90%,
/// then two or more minutes on the content, then a bounce (under 10 seconds
/// and under 10% completion).
pub fn classify_intent(log: &AccessLog) -> IntentBadge {
    let duration = log.duration_seconds();
    let completion = log.completion();

    if log.is_downloaded() {
        IntentBadge::Downloaded
    } else if completion >= 90.0 {
        IntentBadge::ReadFully
    } else if duration >= 120.0 {
        IntentBadge::Engaged
    } else if duration < 10.0 && completion < 10.0 {
        IntentBadge::Bounced
    } else {
        IntentBadge::Skimmed
    }
}
