//! Insight and recommended-action output models.

use serde::{Deserialize, Serialize};

use super::section::Priority;

/// Topic an insight belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightCategory {
    Leads,
    Engagement,
    Audience,
    Content,
    Timing,
    Geography,
    Device,
    Acquisition,
    Trend,
    Contact,
}

/// An observation about how a link or contact is performing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub id: String,
    pub icon: String,
    pub text: String,
    pub implication: String,
    pub priority: Priority,
    pub category: InsightCategory,
}

/// Visual weight of an action button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
    Primary,
    Secondary,
}

/// A presentation-only button label. Wiring it to behavior is up to the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionButton {
    pub label: String,
    pub style: ButtonStyle,
}

impl ActionButton {
    pub fn primary(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            style: ButtonStyle::Primary,
        }
    }

    pub fn secondary(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            style: ButtonStyle::Secondary,
        }
    }
}

/// A recommended next step for the link owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedAction {
    pub id: String,
    pub priority: Priority,
    pub icon: String,
    pub title: String,
    pub reason: String,
    pub buttons: Vec<ActionButton>,
}
