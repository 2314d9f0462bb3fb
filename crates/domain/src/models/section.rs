//! UI sections and priorities shared by the insight and action engines.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Section
// ============================================================================

/// The UI context requesting insights or actions.
///
/// Every rule declares the sections it applies to; rules are only evaluated
/// for the section being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    #[default]
    Dashboard,
    FileDoc,
    FileMedia,
    FileImage,
    FileOther,
    FileUrl,
    TrackSite,
    Contacts,
    Analytics,
}

impl Section {
    pub const ALL: &'static [Section] = &[
        Section::Dashboard,
        Section::FileDoc,
        Section::FileMedia,
        Section::FileImage,
        Section::FileOther,
        Section::FileUrl,
        Section::TrackSite,
        Section::Contacts,
        Section::Analytics,
    ];

    /// Returns the string representation used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Dashboard => "dashboard",
            Section::FileDoc => "file-doc",
            Section::FileMedia => "file-media",
            Section::FileImage => "file-image",
            Section::FileOther => "file-other",
            Section::FileUrl => "file-url",
            Section::TrackSite => "track-site",
            Section::Contacts => "contacts",
            Section::Analytics => "analytics",
        }
    }

    /// Sections showing external URLs, scored with the track-site formula.
    pub fn is_external_url(&self) -> bool {
        matches!(self, Section::FileUrl | Section::TrackSite)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .iter()
            .copied()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "Invalid section: {}. Must be one of: dashboard, file-doc, file-media, file-image, file-other, file-url, track-site, contacts, analytics",
                    s
                )
            })
    }
}

// ============================================================================
// Priority
// ============================================================================

/// Priority of an insight or action. Lower weight sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Sort weight: high=0, medium=1, low=2.
    pub fn weight(&self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
