//! The action rule table.
//!
//! Kept ordered high, medium, low so that stopping the scan at the action cap
//! never drops a higher-priority action in favor of a lower one.

use shared::format::{format_hour, pluralize};

use crate::error::require;
use crate::models::{ActionButton, EngagementTier, Priority, Section};

use super::actions::ActionRule;

use crate::models::Section as S;

const LINKS: &[Section] = &[
    S::Dashboard,
    S::FileDoc,
    S::FileMedia,
    S::FileImage,
    S::FileOther,
    S::FileUrl,
    S::TrackSite,
    S::Analytics,
];
const SHARED_LINKS: &[Section] = &[
    S::FileDoc,
    S::FileMedia,
    S::FileImage,
    S::FileOther,
    S::FileUrl,
    S::TrackSite,
];
const FILES: &[Section] = &[S::FileDoc, S::FileMedia, S::FileImage, S::FileOther];
const TEXT_FILES: &[Section] = &[S::FileDoc, S::FileOther];
const DOCS: &[Section] = &[S::FileDoc];
const MEDIA: &[Section] = &[S::FileMedia];
const TRACK_SITE: &[Section] = &[S::TrackSite];
const OVERVIEW: &[Section] = &[S::Dashboard, S::Analytics];
const CONTACTS: &[Section] = &[S::Contacts];

pub static ACTION_RULES: &[ActionRule] = &[
    // ------------------------------------------------------------------
    // High
    // ------------------------------------------------------------------
    ActionRule {
        id: "share-first-link",
        icon: "🚀",
        priority: Priority::High,
        applies_to: LINKS,
        condition: |s| Ok(s.total_views == 0),
        title: |_| Ok("Share your link".to_string()),
        reason: |_| Ok("Nobody has viewed it yet. Send it to your first contacts.".to_string()),
        buttons: |_| vec![ActionButton::primary("Copy link"), ActionButton::secondary("Share via email")],
    },
    ActionRule {
        id: "follow-up-hot-leads",
        icon: "🔥",
        priority: Priority::High,
        applies_to: LINKS,
        condition: |s| Ok(s.hot_leads_count > 0),
        title: |s| {
            Ok(match (s.hot_leads_count, s.hot_leads.first()) {
                (1, Some(lead)) => format!("Follow up with {}", lead.display_name()),
                (n, _) => format!("Follow up with {} hot {}", n, pluralize(n, "lead", "leads")),
            })
        },
        reason: |_| Ok("High engagement fades fast. Reach out within a day.".to_string()),
        buttons: |_| vec![ActionButton::primary("Send email"), ActionButton::secondary("View leads")],
    },
    ActionRule {
        id: "reach-out-company",
        icon: "🏢",
        priority: Priority::High,
        applies_to: LINKS,
        condition: |s| Ok(s.active_companies.iter().any(|c| c.viewer_count >= 3)),
        title: |s| {
            let company = require(s.active_companies.first(), "active_companies")?;
            Ok(format!("Reach out to {}", company.name))
        },
        reason: |s| {
            let company = require(s.active_companies.first(), "active_companies")?;
            Ok(format!(
                "{} people there have viewed your content. It is being discussed internally.",
                company.viewer_count
            ))
        },
        buttons: |_| vec![ActionButton::primary("View viewers")],
    },
    ActionRule {
        id: "fix-drop-off",
        icon: "🛠️",
        priority: Priority::High,
        applies_to: DOCS,
        condition: |s| {
            Ok(match (s.drop_off_page, s.total_pages) {
                (Some(page), Some(total)) => s.drop_off_rate > 40 && page != 1 && page != total,
                _ => false,
            })
        },
        title: |s| {
            let page = require(s.drop_off_page, "drop_off_page")?;
            Ok(format!("Revise page {}", page))
        },
        reason: |s| Ok(format!("{}% of viewers stop reading there.", s.drop_off_rate)),
        buttons: |_| vec![ActionButton::primary("Replace file"), ActionButton::secondary("View page stats")],
    },
    ActionRule {
        id: "shorten-video",
        icon: "✂️",
        priority: Priority::High,
        applies_to: MEDIA,
        condition: |s| Ok(s.early_drop_rate > 50 && s.media_views >= 3),
        title: |_| Ok("Tighten the opening of your video".to_string()),
        reason: |s| Ok(format!("{}% of viewers stop in the first quarter.", s.early_drop_rate)),
        buttons: |_| vec![ActionButton::primary("Replace file")],
    },
    ActionRule {
        id: "contact-follow-up",
        icon: "📞",
        priority: Priority::High,
        applies_to: CONTACTS,
        condition: |s| Ok(s.contact.as_ref().is_some_and(|c| c.tier == EngagementTier::Hot)),
        title: |s| {
            let contact = require(s.contact.as_ref(), "contact")?;
            Ok(format!("Follow up with {}", contact.display_name()))
        },
        reason: |s| {
            let contact = require(s.contact.as_ref(), "contact")?;
            Ok(format!("Engagement score {} across {} visits.", contact.engagement_score, contact.total_visits))
        },
        buttons: |_| vec![ActionButton::primary("Send email"), ActionButton::secondary("Schedule call")],
    },
    // ------------------------------------------------------------------
    // Medium
    // ------------------------------------------------------------------
    ActionRule {
        id: "nurture-warm-leads",
        icon: "🌡️",
        priority: Priority::Medium,
        applies_to: LINKS,
        condition: |s| Ok(s.warm_leads_count > 0 && s.hot_leads_count == 0),
        title: |s| {
            Ok(format!(
                "Nurture {} warm {}",
                s.warm_leads_count,
                pluralize(s.warm_leads_count, "lead", "leads")
            ))
        },
        reason: |_| Ok("Related content can turn interest into intent.".to_string()),
        buttons: |_| vec![ActionButton::primary("Share related content")],
    },
    ActionRule {
        id: "enable-email-gate",
        icon: "🔐",
        priority: Priority::Medium,
        applies_to: SHARED_LINKS,
        condition: |s| Ok(s.anonymous_viewers > s.identified_viewers && s.unique_viewers >= 5),
        title: |_| Ok("Require email to view".to_string()),
        reason: |s| {
            Ok(format!(
                "{} of {} viewers are anonymous.",
                s.anonymous_viewers, s.unique_viewers
            ))
        },
        buttons: |_| vec![ActionButton::primary("Enable email gate")],
    },
    ActionRule {
        id: "reshare-link",
        icon: "🔄",
        priority: Priority::Medium,
        applies_to: LINKS,
        condition: |s| Ok(s.days_since_last_view.is_some_and(|d| d >= 14)),
        title: |_| Ok("Reshare your link".to_string()),
        reason: |s| {
            let days = require(s.days_since_last_view, "days_since_last_view")?;
            Ok(format!("No views in {} days.", days))
        },
        buttons: |_| vec![ActionButton::primary("Copy link"), ActionButton::secondary("Send reminder")],
    },
    ActionRule {
        id: "improve-opening",
        icon: "✏️",
        priority: Priority::Medium,
        applies_to: FILES,
        condition: |s| Ok(s.avg_engagement < 20 && s.total_views >= 5),
        title: |_| Ok("Strengthen your opening".to_string()),
        reason: |s| Ok(format!("Average engagement is only {}.", s.avg_engagement)),
        buttons: |_| vec![ActionButton::primary("Replace file")],
    },
    ActionRule {
        id: "capitalize-momentum",
        icon: "📈",
        priority: Priority::Medium,
        applies_to: LINKS,
        condition: |s| Ok(s.views_change_percent.is_some_and(|c| c >= 50)),
        title: |_| Ok("Build on the momentum".to_string()),
        reason: |s| {
            let change = require(s.views_change_percent, "views_change_percent")?;
            Ok(format!("Views are up {}%. Share it with a wider audience now.", change))
        },
        buttons: |_| vec![ActionButton::primary("Share again")],
    },
    ActionRule {
        id: "investigate-decline",
        icon: "🔎",
        priority: Priority::Medium,
        applies_to: LINKS,
        condition: |s| Ok(s.views_change_percent.is_some_and(|c| c <= -30)),
        title: |_| Ok("Find out why views dropped".to_string()),
        reason: |s| {
            let change = require(s.views_change_percent, "views_change_percent")?;
            Ok(format!("Views fell {}% on the previous period.", change.abs()))
        },
        buttons: |_| vec![ActionButton::primary("Compare periods")],
    },
    ActionRule {
        id: "optimize-mobile",
        icon: "📱",
        priority: Priority::Medium,
        applies_to: FILES,
        condition: |s| Ok(s.mobile_percent >= 60 && s.total_views >= 5),
        title: |_| Ok("Check the mobile experience".to_string()),
        reason: |s| Ok(format!("{}% of views are on phones.", s.mobile_percent)),
        buttons: |_| vec![ActionButton::primary("Preview on mobile")],
    },
    ActionRule {
        id: "contact-reengage",
        icon: "💌",
        priority: Priority::Medium,
        applies_to: CONTACTS,
        condition: |s| {
            Ok(s.contact
                .as_ref()
                .and_then(|c| c.days_since_last_visit)
                .is_some_and(|d| d >= 14))
        },
        title: |s| {
            let contact = require(s.contact.as_ref(), "contact")?;
            Ok(format!("Re-engage {}", contact.display_name()))
        },
        reason: |s| {
            let contact = require(s.contact.as_ref(), "contact")?;
            let days = require(contact.days_since_last_visit, "days_since_last_visit")?;
            Ok(format!("Last visit was {} days ago.", days))
        },
        buttons: |_| vec![ActionButton::primary("Send check-in")],
    },
    ActionRule {
        id: "retarget-visitors",
        icon: "🎯",
        priority: Priority::Medium,
        applies_to: TRACK_SITE,
        condition: |s| Ok(s.return_visitors >= 2),
        title: |_| Ok("Follow up with repeat visitors".to_string()),
        reason: |s| {
            Ok(format!(
                "{} visitors clicked through more than once.",
                s.return_visitors
            ))
        },
        buttons: |_| vec![ActionButton::primary("View visitors")],
    },
    // ------------------------------------------------------------------
    // Low
    // ------------------------------------------------------------------
    ActionRule {
        id: "double-down-social",
        icon: "📣",
        priority: Priority::Low,
        applies_to: LINKS,
        condition: |s| Ok(s.social_percent >= 30 && s.total_views >= 5),
        title: |_| Ok("Post on social again".to_string()),
        reason: |s| Ok(format!("{}% of views came from social media.", s.social_percent)),
        buttons: |_| vec![ActionButton::primary("Copy link")],
    },
    ActionRule {
        id: "schedule-peak-hour",
        icon: "⏰",
        priority: Priority::Low,
        applies_to: LINKS,
        condition: |s| Ok(s.total_views >= 10 && s.peak_hour.is_some()),
        title: |s| {
            let hour = require(s.peak_hour, "peak_hour")?;
            Ok(format!("Send your next share around {}", format_hour(hour)))
        },
        reason: |s| Ok(format!("{}% of views happen in that hour.", s.peak_hour_percent)),
        buttons: |_| vec![ActionButton::primary("Schedule share")],
    },
    ActionRule {
        id: "enable-downloads",
        icon: "📥",
        priority: Priority::Low,
        applies_to: TEXT_FILES,
        condition: |s| Ok(s.downloads == 0 && s.completion_rate >= 50 && s.total_views >= 5),
        title: |_| Ok("Offer a download".to_string()),
        reason: |s| {
            Ok(format!(
                "{}% read it fully but nobody downloaded it.",
                s.completion_rate
            ))
        },
        buttons: |_| vec![ActionButton::primary("Enable downloads")],
    },
    ActionRule {
        id: "contact-send-related",
        icon: "📚",
        priority: Priority::Low,
        applies_to: CONTACTS,
        condition: |s| Ok(s.contact.as_ref().is_some_and(|c| c.unique_files >= 1)),
        title: |s| {
            let contact = require(s.contact.as_ref(), "contact")?;
            Ok(format!("Send {} related content", contact.display_name()))
        },
        reason: |s| {
            let contact = require(s.contact.as_ref(), "contact")?;
            Ok(format!(
                "They have viewed {} {}.",
                contact.unique_files,
                pluralize(contact.unique_files, "link", "links")
            ))
        },
        buttons: |_| vec![ActionButton::primary("Share content")],
    },
    ActionRule {
        id: "tag-campaigns",
        icon: "🏷️",
        priority: Priority::Low,
        applies_to: LINKS,
        condition: |s| Ok(s.campaign_count == 0 && s.total_views >= 20),
        title: |_| Ok("Tag your shares with UTM campaigns".to_string()),
        reason: |_| Ok("You will see which channel brings the most engaged viewers.".to_string()),
        buttons: |_| vec![ActionButton::primary("Create tagged link")],
    },
    ActionRule {
        id: "export-report",
        icon: "📄",
        priority: Priority::Low,
        applies_to: OVERVIEW,
        condition: |s| Ok(s.total_views >= 50),
        title: |_| Ok("Export an engagement report".to_string()),
        reason: |s| Ok(format!("{} views is enough data to share with your team.", s.total_views)),
        buttons: |_| vec![ActionButton::primary("Export CSV"), ActionButton::secondary("Export PDF")],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContactSummary, InsightsSummary};
    use std::collections::HashSet;

    fn rule(id: &str) -> &'static ActionRule {
        ACTION_RULES.iter().find(|r| r.id == id).unwrap()
    }

    #[test]
    fn test_table_is_ordered_by_priority() {
        let weights: Vec<u8> = ACTION_RULES.iter().map(|r| r.priority.weight()).collect();
        let mut sorted = weights.clone();
        sorted.sort();
        assert_eq!(weights, sorted);
    }

    #[test]
    fn test_rule_ids_are_unique() {
        let ids: HashSet<_> = ACTION_RULES.iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), ACTION_RULES.len());
    }

    #[test]
    fn test_share_first_link_only_without_views() {
        let r = rule("share-first-link");
        assert!((r.condition)(&InsightsSummary::default()).unwrap());
        let viewed = InsightsSummary {
            total_views: 1,
            ..Default::default()
        };
        assert!(!(r.condition)(&viewed).unwrap());
    }

    #[test]
    fn test_fix_drop_off_ignores_last_page() {
        let r = rule("fix-drop-off");
        let last = InsightsSummary {
            total_pages: Some(4),
            drop_off_page: Some(4),
            drop_off_rate: 80,
            ..Default::default()
        };
        assert!(!(r.condition)(&last).unwrap());
        let middle = InsightsSummary {
            drop_off_page: Some(2),
            ..last
        };
        assert!((r.condition)(&middle).unwrap());
        assert_eq!((r.title)(&middle).unwrap(), "Revise page 2");
    }

    #[test]
    fn test_contact_follow_up_uses_name() {
        let r = rule("contact-follow-up");
        let summary = InsightsSummary {
            contact: Some(ContactSummary {
                email: "sam@acme.io".to_string(),
                name: Some("Sam".to_string()),
                company: None,
                total_visits: 4,
                unique_files: 2,
                file_names: vec![],
                total_duration_seconds: 900.0,
                engagement_score: 88,
                tier: EngagementTier::Hot,
                downloaded: true,
                first_seen_at: None,
                last_seen_at: None,
                days_since_last_visit: Some(1),
            }),
            ..Default::default()
        };
        assert!((r.condition)(&summary).unwrap());
        assert_eq!((r.title)(&summary).unwrap(), "Follow up with Sam");
    }
}
