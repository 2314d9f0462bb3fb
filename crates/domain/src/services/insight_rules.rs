//! The insight rule table.
//!
//! Rules are evaluated in table order; within one priority, earlier rules are
//! shown first. Guard conditions keep obvious or noisy observations out (for
//! example, everyone exits a document on its last page).

use shared::format::{country_flag, format_duration, format_hour, pluralize};

use crate::error::{require, RuleError};
use crate::models::{EngagementTier, Priority, Section};

use super::identity::viewer_identity;
use super::insights::InsightRule;

use crate::models::InsightCategory as C;
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
const FILES_AND_OVERVIEW: &[Section] = &[
    S::Dashboard,
    S::Analytics,
    S::FileDoc,
    S::FileMedia,
    S::FileImage,
    S::FileOther,
];
const DOCS: &[Section] = &[S::FileDoc];
const TEXT_FILES: &[Section] = &[S::FileDoc, S::FileOther];
const MEDIA: &[Section] = &[S::FileMedia];
const IMAGES: &[Section] = &[S::FileImage];
const EXTERNAL: &[Section] = &[S::FileUrl, S::TrackSite];
const OVERVIEW: &[Section] = &[S::Dashboard, S::Analytics];
const CONTACTS: &[Section] = &[S::Contacts];

fn views(n: u32) -> String {
    format!("{} {}", n, pluralize(n, "view", "views"))
}

fn people(n: u32) -> String {
    format!("{} {}", n, pluralize(n, "person", "people"))
}

pub static INSIGHT_RULES: &[InsightRule] = &[
    // ------------------------------------------------------------------
    // Leads
    // ------------------------------------------------------------------
    InsightRule {
        id: "hot-leads",
        icon: "🔥",
        priority: Priority::High,
        category: C::Leads,
        applies_to: LINKS,
        condition: |s, _| Ok(s.hot_leads_count > 0),
        text: |s, _| {
            Ok(match (s.hot_leads_count, s.hot_leads.first()) {
                (1, Some(lead)) => format!("{} is a hot lead", lead.display_name()),
                (n, _) => format!("{} hot {} ready for follow-up", n, pluralize(n, "lead", "leads")),
            })
        },
        implication: |_, _| {
            Ok("They spent real time with your content. Reach out while interest is high.".to_string())
        },
    },
    InsightRule {
        id: "active-companies",
        icon: "🏢",
        priority: Priority::High,
        category: C::Leads,
        applies_to: LINKS,
        condition: |s, _| Ok(!s.active_companies.is_empty()),
        text: |s, _| {
            let company = require(s.active_companies.first(), "active_companies")?;
            Ok(match s.active_companies.len() {
                1 => format!("{} people from {} are viewing", company.viewer_count, company.name),
                n => format!("{} companies have multiple viewers, led by {}", n, company.name),
            })
        },
        implication: |_, _| {
            Ok("Several people at one company usually means the content is being shared internally.".to_string())
        },
    },
    InsightRule {
        id: "warm-leads",
        icon: "🌡️",
        priority: Priority::Medium,
        category: C::Leads,
        applies_to: LINKS,
        condition: |s, _| Ok(s.warm_leads_count >= 2 && s.hot_leads_count == 0),
        text: |s, _| Ok(format!("{} warm leads are showing interest", s.warm_leads_count)),
        implication: |_, _| Ok("A light touch now could turn them into hot leads.".to_string()),
    },
    // ------------------------------------------------------------------
    // Engagement
    // ------------------------------------------------------------------
    InsightRule {
        id: "link-score-hot",
        icon: "⭐",
        priority: Priority::High,
        category: C::Engagement,
        applies_to: SHARED_LINKS,
        condition: |s, _| Ok(s.link_tier == EngagementTier::Hot),
        text: |s, _| Ok(format!("This link scores {}/100 across its audience", s.link_score)),
        implication: |_, _| Ok("Broad, sustained engagement. This content is working.".to_string()),
    },
    InsightRule {
        id: "high-engagement",
        icon: "💪",
        priority: Priority::Medium,
        category: C::Engagement,
        applies_to: LINKS,
        condition: |s, _| Ok(s.avg_engagement >= 60 && s.unique_viewers >= 3),
        text: |s, _| Ok(format!("Average engagement score is {}", s.avg_engagement)),
        implication: |_, _| Ok("Viewers are genuinely interested in this content.".to_string()),
    },
    InsightRule {
        id: "low-engagement",
        icon: "📉",
        priority: Priority::Medium,
        category: C::Engagement,
        applies_to: LINKS,
        condition: |s, _| Ok(s.avg_engagement < 20 && s.total_views >= 5),
        text: |s, _| {
            Ok(format!(
                "Engagement is low: average score {} over {}",
                s.avg_engagement,
                views(s.total_views)
            ))
        },
        implication: |_, _| {
            Ok("People open the link but move on quickly. Revisit the opening of your content.".to_string())
        },
    },
    // ------------------------------------------------------------------
    // Audience
    // ------------------------------------------------------------------
    InsightRule {
        id: "strong-return-rate",
        icon: "🔁",
        priority: Priority::Medium,
        category: C::Audience,
        applies_to: LINKS,
        condition: |s, _| Ok(s.return_rate >= 40 && s.unique_viewers >= 3),
        text: |s, _| Ok(format!("{}% of viewers came back for another look", s.return_rate)),
        implication: |_, _| Ok("Return visits are a strong buying signal.".to_string()),
    },
    InsightRule {
        id: "no-return-visits",
        icon: "↩️",
        priority: Priority::Low,
        category: C::Audience,
        applies_to: LINKS,
        condition: |s, _| Ok(s.return_visitors == 0 && s.unique_viewers >= 5),
        text: |s, _| Ok(format!("None of {} came back", people(s.unique_viewers))),
        implication: |_, _| Ok("A follow-up message can prompt a second look.".to_string()),
    },
    InsightRule {
        id: "anonymous-majority",
        icon: "🕵️",
        priority: Priority::Medium,
        category: C::Audience,
        applies_to: LINKS,
        condition: |s, _| Ok(s.anonymous_viewers > s.identified_viewers && s.unique_viewers >= 5),
        text: |s, _| {
            Ok(format!(
                "{} of {} viewers are anonymous",
                s.anonymous_viewers, s.unique_viewers
            ))
        },
        implication: |_, _| Ok("Ask for an email before viewing to know who is interested.".to_string()),
    },
    InsightRule {
        id: "all-identified",
        icon: "🪪",
        priority: Priority::Low,
        category: C::Audience,
        applies_to: LINKS,
        condition: |s, _| Ok(s.unique_viewers >= 3 && s.identified_viewers == s.unique_viewers),
        text: |s, _| Ok(format!("All {} viewers are identified", s.unique_viewers)),
        implication: |_, _| Ok("You know exactly who engaged. Every view is a follow-up opportunity.".to_string()),
    },
    InsightRule {
        id: "single-viewer-repeat",
        icon: "👤",
        priority: Priority::Low,
        category: C::Audience,
        applies_to: LINKS,
        condition: |s, _| Ok(s.unique_viewers == 1 && s.total_views >= 3),
        text: |s, logs| {
            let first = require(logs.first(), "logs")?;
            let who = first
                .viewer_name
                .clone()
                .unwrap_or_else(|| viewer_identity(first).to_string());
            Ok(format!("{} opened this {} times", who, s.total_views))
        },
        implication: |_, _| Ok("One person keeps coming back. They may be evaluating it closely.".to_string()),
    },
    // ------------------------------------------------------------------
    // Documents
    // ------------------------------------------------------------------
    InsightRule {
        id: "high-drop-off",
        icon: "🚪",
        priority: Priority::High,
        category: C::Content,
        applies_to: DOCS,
        condition: |s, _| {
            Ok(match (s.drop_off_page, s.total_pages) {
                (Some(page), Some(total)) => s.drop_off_rate > 25 && page != 1 && page != total,
                _ => false,
            })
        },
        text: |s, _| {
            let page = require(s.drop_off_page, "drop_off_page")?;
            Ok(format!("{}% of viewers leave on page {}", s.drop_off_rate, page))
        },
        implication: |s, _| {
            let page = require(s.drop_off_page, "drop_off_page")?;
            Ok(format!("Something on page {} loses people. Consider tightening or moving it.", page))
        },
    },
    InsightRule {
        id: "most-engaging-page",
        icon: "📌",
        priority: Priority::Medium,
        category: C::Content,
        applies_to: DOCS,
        condition: |s, _| {
            Ok(s.most_engaging_page.is_some_and(|page| page != 1)
                && s.avg_page_seconds > 0.0
                && s.most_engaging_page_seconds >= 2.0 * s.avg_page_seconds)
        },
        text: |s, _| {
            let page = require(s.most_engaging_page, "most_engaging_page")?;
            Ok(format!(
                "Page {} holds attention longest ({} on average)",
                page,
                format_duration(s.most_engaging_page_seconds)
            ))
        },
        implication: |_, _| Ok("That page resonates. Lead with it in your follow-up.".to_string()),
    },
    InsightRule {
        id: "full-reads",
        icon: "📖",
        priority: Priority::Medium,
        category: C::Content,
        applies_to: DOCS,
        condition: |s, _| Ok(s.completion_rate >= 50 && s.unique_viewers >= 3),
        text: |s, _| Ok(format!("{}% of viewers read the whole document", s.completion_rate)),
        implication: |_, _| Ok("The document keeps attention from start to finish.".to_string()),
    },
    InsightRule {
        id: "quick-skims",
        icon: "⏩",
        priority: Priority::Medium,
        category: C::Content,
        applies_to: TEXT_FILES,
        condition: |s, _| {
            Ok(s.total_views >= 5 && s.avg_duration_seconds < 30.0 && s.avg_completion < 40.0)
        },
        text: |s, _| {
            Ok(format!(
                "Most visits are quick skims ({} on average)",
                format_duration(s.avg_duration_seconds)
            ))
        },
        implication: |_, _| Ok("Put the key message on the first page.".to_string()),
    },
    InsightRule {
        id: "reached-end",
        icon: "🏁",
        priority: Priority::Low,
        category: C::Content,
        applies_to: DOCS,
        condition: |s, _| {
            Ok(s.total_pages.is_some() && s.reached_last_page_percent >= 60 && s.total_views >= 3)
        },
        text: |s, _| {
            let pages = require(s.total_pages, "total_pages")?;
            Ok(format!(
                "{}% of views reach the last page of {}",
                s.reached_last_page_percent, pages
            ))
        },
        implication: |_, _| Ok("Your closing call to action is being seen.".to_string()),
    },
    InsightRule {
        id: "strong-downloads",
        icon: "📥",
        priority: Priority::Medium,
        category: C::Content,
        applies_to: FILES_AND_OVERVIEW,
        condition: |s, _| Ok(s.downloads > 0 && s.download_rate >= 30),
        text: |s, _| {
            Ok(format!(
                "{}% of viewers downloaded a copy ({} {})",
                s.download_rate,
                s.downloads,
                pluralize(s.downloads, "download", "downloads")
            ))
        },
        implication: |_, _| Ok("Downloads often mean the file is being shared with others.".to_string()),
    },
    InsightRule {
        id: "no-downloads",
        icon: "🔒",
        priority: Priority::Low,
        category: C::Content,
        applies_to: TEXT_FILES,
        condition: |s, _| Ok(s.downloads == 0 && s.total_views >= 10),
        text: |s, _| Ok(format!("No downloads across {}", views(s.total_views))),
        implication: |_, _| Ok("Viewers read online only. Make sure downloads are enabled if you want them shared.".to_string()),
    },
    // ------------------------------------------------------------------
    // Media
    // ------------------------------------------------------------------
    InsightRule {
        id: "media-early-drop",
        icon: "⏱️",
        priority: Priority::High,
        category: C::Content,
        applies_to: MEDIA,
        condition: |s, _| Ok(s.early_drop_rate > 40 && s.media_views >= 3),
        text: |s, _| Ok(format!("{}% of viewers stop within the first quarter", s.early_drop_rate)),
        implication: |_, _| Ok("The opening is losing people. Get to the point sooner.".to_string()),
    },
    InsightRule {
        id: "media-completion",
        icon: "🎬",
        priority: Priority::Medium,
        category: C::Content,
        applies_to: MEDIA,
        condition: |s, _| Ok(s.watch_completion_rate >= 50 && s.media_views >= 3),
        text: |s, _| Ok(format!("{}% of viewers watched to the end", s.watch_completion_rate)),
        implication: |_, _| Ok("Strong retention. The full message is landing.".to_string()),
    },
    InsightRule {
        id: "media-watch-time",
        icon: "⏯️",
        priority: Priority::Low,
        category: C::Content,
        applies_to: MEDIA,
        condition: |s, _| Ok(s.media_views > 0 && s.avg_watch_time_seconds > 0.0),
        text: |s, _| {
            Ok(format!(
                "Average watch time is {} ({}% watched)",
                format_duration(s.avg_watch_time_seconds),
                s.avg_watch_completion.round()
            ))
        },
        implication: |_, _| Ok("Keep the most important part before the average drop point.".to_string()),
    },
    // ------------------------------------------------------------------
    // Images
    // ------------------------------------------------------------------
    InsightRule {
        id: "image-reach",
        icon: "🖼️",
        priority: Priority::Low,
        category: C::Audience,
        applies_to: IMAGES,
        condition: |s, _| Ok(s.total_views > 0),
        text: |s, _| Ok(format!("Seen {} by {}", views(s.total_views), people(s.unique_viewers))),
        implication: |_, _| Ok("Images are consumed at a glance; reach matters more than time.".to_string()),
    },
    // ------------------------------------------------------------------
    // Tracked sites
    // ------------------------------------------------------------------
    InsightRule {
        id: "track-site-clicks",
        icon: "🔗",
        priority: Priority::Medium,
        category: C::Engagement,
        applies_to: EXTERNAL,
        condition: |s, _| Ok(s.total_views > 0),
        text: |s, _| {
            Ok(format!(
                "{} {} from {}",
                s.total_views,
                pluralize(s.total_views, "click", "clicks"),
                people(s.unique_viewers)
            ))
        },
        implication: |_, _| Ok("Clicks show interest; return visits show intent.".to_string()),
    },
    InsightRule {
        id: "track-site-repeat-visitors",
        icon: "🔁",
        priority: Priority::Medium,
        category: C::Audience,
        applies_to: EXTERNAL,
        condition: |s, _| Ok(s.return_visitors > 0),
        text: |s, _| {
            Ok(format!(
                "{} clicked more than once",
                people(s.return_visitors)
            ))
        },
        implication: |_, _| Ok("Repeat clicks on a tracked site usually mean active evaluation.".to_string()),
    },
    // ------------------------------------------------------------------
    // Timing
    // ------------------------------------------------------------------
    InsightRule {
        id: "recent-activity",
        icon: "⚡",
        priority: Priority::Medium,
        category: C::Timing,
        applies_to: LINKS,
        condition: |s, _| Ok(s.views_last_24h >= 3),
        text: |s, _| Ok(format!("{} in the last 24 hours", views(s.views_last_24h))),
        implication: |_, _| Ok("Interest is live right now. Good moment to follow up.".to_string()),
    },
    InsightRule {
        id: "gone-quiet",
        icon: "💤",
        priority: Priority::Medium,
        category: C::Timing,
        applies_to: LINKS,
        condition: |s, _| Ok(s.days_since_last_view.is_some_and(|d| d >= 14)),
        text: |s, _| {
            let days = require(s.days_since_last_view, "days_since_last_view")?;
            Ok(format!("No views in the last {} days", days))
        },
        implication: |_, _| Ok("This link has gone quiet. Reshare it or send a reminder.".to_string()),
    },
    InsightRule {
        id: "peak-day",
        icon: "📅",
        priority: Priority::Low,
        category: C::Timing,
        applies_to: LINKS,
        condition: |s, _| Ok(s.total_views >= 5 && s.peak_day.is_some() && s.peak_day_percent >= 25),
        text: |s, _| {
            let day = require(s.peak_day.as_deref(), "peak_day")?;
            Ok(format!("{} is the busiest day ({}% of views)", day, s.peak_day_percent))
        },
        implication: |_, _| Ok("Schedule shares and follow-ups for that day.".to_string()),
    },
    InsightRule {
        id: "peak-hour",
        icon: "🕐",
        priority: Priority::Low,
        category: C::Timing,
        applies_to: LINKS,
        condition: |s, _| Ok(s.total_views >= 5 && s.peak_hour.is_some()),
        text: |s, _| {
            let hour = require(s.peak_hour, "peak_hour")?;
            if hour > 23 {
                return Err(RuleError::InvalidMetric {
                    metric: "peak_hour",
                    value: hour.to_string(),
                });
            }
            Ok(format!("Most views happen around {}", format_hour(hour)))
        },
        implication: |_, _| Ok("Send messages shortly before the peak hour.".to_string()),
    },
    InsightRule {
        id: "weekend-views",
        icon: "🛋️",
        priority: Priority::Low,
        category: C::Timing,
        applies_to: LINKS,
        condition: |s, _| Ok(s.weekend_percent >= 40 && s.total_views >= 10),
        text: |s, _| Ok(format!("{}% of views happen on weekends", s.weekend_percent)),
        implication: |_, _| Ok("Your audience reads in their own time.".to_string()),
    },
    InsightRule {
        id: "after-hours",
        icon: "🌙",
        priority: Priority::Low,
        category: C::Timing,
        applies_to: LINKS,
        condition: |s, _| Ok(s.after_hours_percent >= 50 && s.total_views >= 10),
        text: |s, _| Ok(format!("{}% of views happen outside business hours", s.after_hours_percent)),
        implication: |_, _| Ok("People are reading after work. Keep content easy to digest.".to_string()),
    },
    // ------------------------------------------------------------------
    // Geography
    // ------------------------------------------------------------------
    InsightRule {
        id: "top-country",
        icon: "🌍",
        priority: Priority::Low,
        category: C::Geography,
        applies_to: LINKS,
        condition: |s, _| {
            Ok(s.total_views >= 5 && s.top_country.is_some() && s.top_country_percent >= 50)
        },
        text: |s, _| {
            let country = require(s.top_country.as_deref(), "top_country")?;
            Ok(format!(
                "{} {}% of views come from {}",
                country_flag(country),
                s.top_country_percent,
                country
            ))
        },
        implication: |_, _| Ok("Time follow-ups to that market's working hours.".to_string()),
    },
    InsightRule {
        id: "international-reach",
        icon: "🌐",
        priority: Priority::Medium,
        category: C::Geography,
        applies_to: LINKS,
        condition: |s, _| Ok(s.country_count >= 5),
        text: |s, _| Ok(format!("Viewed from {} countries", s.country_count)),
        implication: |_, _| Ok("Your content is travelling well beyond its first audience.".to_string()),
    },
    // ------------------------------------------------------------------
    // Devices
    // ------------------------------------------------------------------
    InsightRule {
        id: "mobile-heavy",
        icon: "📱",
        priority: Priority::Medium,
        category: C::Device,
        applies_to: LINKS,
        condition: |s, _| Ok(s.mobile_percent >= 50 && s.total_views >= 5),
        text: |s, _| Ok(format!("{}% of views are on mobile", s.mobile_percent)),
        implication: |_, _| Ok("Check that your content reads well on a small screen.".to_string()),
    },
    InsightRule {
        id: "desktop-dominant",
        icon: "🖥️",
        priority: Priority::Low,
        category: C::Device,
        applies_to: LINKS,
        condition: |s, _| Ok(s.desktop_percent >= 80 && s.total_views >= 10),
        text: |s, _| Ok(format!("{}% of views are on desktop", s.desktop_percent)),
        implication: |_, _| Ok("Viewers are at their desks, likely during the working day.".to_string()),
    },
    // ------------------------------------------------------------------
    // Acquisition
    // ------------------------------------------------------------------
    InsightRule {
        id: "social-traffic",
        icon: "📣",
        priority: Priority::Medium,
        category: C::Acquisition,
        applies_to: LINKS,
        condition: |s, _| Ok(s.social_percent >= 30 && s.total_views >= 5),
        text: |s, _| Ok(format!("{}% of views come from social media", s.social_percent)),
        implication: |_, _| Ok("Social sharing is driving reach. Post there again.".to_string()),
    },
    InsightRule {
        id: "search-traffic",
        icon: "🔍",
        priority: Priority::Low,
        category: C::Acquisition,
        applies_to: LINKS,
        condition: |s, _| Ok(s.search_percent >= 20 && s.total_views >= 5),
        text: |s, _| Ok(format!("{}% of views come from search", s.search_percent)),
        implication: |_, _| Ok("People are finding this on their own.".to_string()),
    },
    InsightRule {
        id: "referral-traffic",
        icon: "🤝",
        priority: Priority::Low,
        category: C::Acquisition,
        applies_to: LINKS,
        condition: |s, _| Ok(s.referral_percent >= 20 && s.total_views >= 5),
        text: |s, _| Ok(format!("{}% of views come from referring sites", s.referral_percent)),
        implication: |_, _| Ok("Someone is linking to you. Find out who.".to_string()),
    },
    InsightRule {
        id: "direct-traffic",
        icon: "➡️",
        priority: Priority::Low,
        category: C::Acquisition,
        applies_to: LINKS,
        condition: |s, _| Ok(s.direct_percent >= 70 && s.total_views >= 10),
        text: |s, _| Ok(format!("{}% of views come from direct links", s.direct_percent)),
        implication: |_, _| Ok("Most viewers got the link from you directly.".to_string()),
    },
    InsightRule {
        id: "top-campaign",
        icon: "🎯",
        priority: Priority::Medium,
        category: C::Acquisition,
        applies_to: LINKS,
        condition: |s, _| Ok(s.top_campaign.is_some()),
        text: |s, _| {
            let campaign = require(s.top_campaign.as_deref(), "top_campaign")?;
            Ok(format!("Campaign \"{}\" drives the most views", campaign))
        },
        implication: |s, _| {
            Ok(if s.campaign_count > 1 {
                format!("Compare it against your other {} campaigns.", s.campaign_count - 1)
            } else {
                "Tag other channels too so you can compare them.".to_string()
            })
        },
    },
    InsightRule {
        id: "qr-scans",
        icon: "📷",
        priority: Priority::Medium,
        category: C::Acquisition,
        applies_to: LINKS,
        condition: |s, _| Ok(s.qr_scans > 0),
        text: |s, _| {
            Ok(format!(
                "{} {} came from QR codes ({}%)",
                s.qr_scans,
                pluralize(s.qr_scans, "view", "views"),
                s.qr_scan_percent
            ))
        },
        implication: |_, _| Ok("Your printed or in-person placements are working.".to_string()),
    },
    // ------------------------------------------------------------------
    // Trends
    // ------------------------------------------------------------------
    InsightRule {
        id: "views-up",
        icon: "📈",
        priority: Priority::High,
        category: C::Trend,
        applies_to: LINKS,
        condition: |s, _| Ok(s.views_change_percent.is_some_and(|c| c >= 50)),
        text: |s, _| {
            let change = require(s.views_change_percent, "views_change_percent")?;
            Ok(format!("Views are up {}% on the previous period", change))
        },
        implication: |_, _| Ok("Momentum is building. Capitalise on it.".to_string()),
    },
    InsightRule {
        id: "views-down",
        icon: "📉",
        priority: Priority::Medium,
        category: C::Trend,
        applies_to: LINKS,
        condition: |s, _| Ok(s.views_change_percent.is_some_and(|c| c <= -30)),
        text: |s, _| {
            let change = require(s.views_change_percent, "views_change_percent")?;
            Ok(format!("Views are down {}% on the previous period", change.abs()))
        },
        implication: |_, _| Ok("Interest is fading. A fresh share can revive it.".to_string()),
    },
    InsightRule {
        id: "engagement-up",
        icon: "⬆️",
        priority: Priority::Medium,
        category: C::Trend,
        applies_to: LINKS,
        condition: |s, _| Ok(s.engagement_change.is_some_and(|c| c >= 10)),
        text: |s, _| {
            let change = require(s.engagement_change, "engagement_change")?;
            Ok(format!("Engagement is up {} points", change))
        },
        implication: |_, _| Ok("Recent viewers are more engaged than before.".to_string()),
    },
    InsightRule {
        id: "engagement-down",
        icon: "⬇️",
        priority: Priority::Medium,
        category: C::Trend,
        applies_to: LINKS,
        condition: |s, _| Ok(s.engagement_change.is_some_and(|c| c <= -10)),
        text: |s, _| {
            let change = require(s.engagement_change, "engagement_change")?;
            Ok(format!("Engagement is down {} points", change.abs()))
        },
        implication: |_, _| Ok("Newer viewers are less engaged. Check who the link reaches now.".to_string()),
    },
    InsightRule {
        id: "audience-growth",
        icon: "👥",
        priority: Priority::Low,
        category: C::Trend,
        applies_to: LINKS,
        condition: |s, _| Ok(s.viewers_change_percent.is_some_and(|c| c >= 50)),
        text: |s, _| {
            let change = require(s.viewers_change_percent, "viewers_change_percent")?;
            Ok(format!("{}% more unique viewers than the previous period", change))
        },
        implication: |_, _| Ok("Your audience is growing, not just returning.".to_string()),
    },
    // ------------------------------------------------------------------
    // Overview
    // ------------------------------------------------------------------
    InsightRule {
        id: "top-file",
        icon: "🏆",
        priority: Priority::Low,
        category: C::Content,
        applies_to: OVERVIEW,
        condition: |s, _| Ok(s.files_count >= 2 && s.top_file.is_some()),
        text: |s, _| {
            let file = require(s.top_file.as_deref(), "top_file")?;
            Ok(format!("\"{}\" is your most viewed link ({})", file, views(s.top_file_views)))
        },
        implication: |_, _| Ok("Use it as the lead piece in new conversations.".to_string()),
    },
    // ------------------------------------------------------------------
    // Contacts
    // ------------------------------------------------------------------
    InsightRule {
        id: "contact-hot",
        icon: "🔥",
        priority: Priority::High,
        category: C::Contact,
        applies_to: CONTACTS,
        condition: |s, _| Ok(s.contact.as_ref().is_some_and(|c| c.tier == EngagementTier::Hot)),
        text: |s, _| {
            let contact = require(s.contact.as_ref(), "contact")?;
            Ok(format!(
                "{} is highly engaged (score {})",
                contact.display_name(),
                contact.engagement_score
            ))
        },
        implication: |_, _| Ok("This contact is ready for a conversation.".to_string()),
    },
    InsightRule {
        id: "contact-downloaded",
        icon: "📥",
        priority: Priority::Medium,
        category: C::Contact,
        applies_to: CONTACTS,
        condition: |s, _| Ok(s.contact.as_ref().is_some_and(|c| c.downloaded)),
        text: |s, _| {
            let contact = require(s.contact.as_ref(), "contact")?;
            Ok(format!("{} downloaded your content", contact.display_name()))
        },
        implication: |_, _| Ok("They may be sharing it with colleagues.".to_string()),
    },
    InsightRule {
        id: "contact-returning",
        icon: "🔁",
        priority: Priority::Medium,
        category: C::Contact,
        applies_to: CONTACTS,
        condition: |s, _| Ok(s.contact.as_ref().is_some_and(|c| c.total_visits >= 3)),
        text: |s, _| {
            let contact = require(s.contact.as_ref(), "contact")?;
            Ok(format!(
                "{} has visited {} times",
                contact.display_name(),
                contact.total_visits
            ))
        },
        implication: |_, _| Ok("Repeated visits signal an active evaluation.".to_string()),
    },
    InsightRule {
        id: "contact-deep-read",
        icon: "📖",
        priority: Priority::Medium,
        category: C::Contact,
        applies_to: CONTACTS,
        condition: |s, _| {
            Ok(s.contact
                .as_ref()
                .is_some_and(|c| c.total_duration_seconds >= 300.0))
        },
        text: |s, _| {
            let contact = require(s.contact.as_ref(), "contact")?;
            Ok(format!(
                "{} spent {} with your content",
                contact.display_name(),
                format_duration(contact.total_duration_seconds)
            ))
        },
        implication: |_, _| Ok("That is a careful read, not a skim.".to_string()),
    },
    InsightRule {
        id: "contact-cooling",
        icon: "💤",
        priority: Priority::Medium,
        category: C::Contact,
        applies_to: CONTACTS,
        condition: |s, _| {
            Ok(s.contact
                .as_ref()
                .and_then(|c| c.days_since_last_visit)
                .is_some_and(|d| d >= 14))
        },
        text: |s, _| {
            let contact = require(s.contact.as_ref(), "contact")?;
            let days = require(contact.days_since_last_visit, "days_since_last_visit")?;
            Ok(format!("{} has not visited in {} days", contact.display_name(), days))
        },
        implication: |_, _| Ok("Interest may be cooling. A check-in could help.".to_string()),
    },
    InsightRule {
        id: "contact-multi-file",
        icon: "📚",
        priority: Priority::Low,
        category: C::Contact,
        applies_to: CONTACTS,
        condition: |s, _| Ok(s.contact.as_ref().is_some_and(|c| c.unique_files >= 2)),
        text: |s, _| {
            let contact = require(s.contact.as_ref(), "contact")?;
            Ok(format!(
                "{} viewed {} different links",
                contact.display_name(),
                contact.unique_files
            ))
        },
        implication: |_, _| Ok("Broad interest across your content.".to_string()),
    },
];
