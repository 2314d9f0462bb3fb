//! Insights summary builder.
//!
//! Folds a log set into the flat [`InsightsSummary`] read by both rule
//! engines. Viewer grouping and scoring go through the shared identity and
//! scoring functions so every metric agrees on who a viewer is.

use chrono::{DateTime, Datelike, Duration, Timelike, Utc};
use shared::email::{company_domain, company_name_from_domain};
use shared::validation::clamp_percentage;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::models::summary::{
    ActiveCompany, Breakdown, ContactSummary, HotLead, InsightsSummary, SummaryOptions,
};
use crate::models::viewer::{AggregatedViewer, EngagementTier};
use crate::models::{AccessLog, ContentKind};

use super::identity::{group_by_viewer, ViewerGroup, ViewerKey};
use super::metrics::{change_percent, mean, percent_of};
use super::return_rate::get_return_stats;
use super::scoring::{aggregate_viewer, LinkScoreGate};

pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Completion at or above which a visit counts as fully read or watched.
const FULL_COMPLETION_PERCENT: f64 = 90.0;
/// Watch completion below which a media view counts as an early drop.
const EARLY_DROP_PERCENT: f64 = 25.0;
/// Business hours are [8, 18) local time.
const BUSINESS_HOURS: std::ops::Range<u32> = 8..18;

/// Builds the insights summary for one log set.
pub fn calculate_insights_summary(logs: &[AccessLog], options: &SummaryOptions) -> InsightsSummary {
    let is_external_url = options.external_url();
    let total_pages = options.total_pages;

    let groups = group_by_viewer(logs);
    let viewers: Vec<AggregatedViewer> = groups
        .iter()
        .map(|g| aggregate_viewer(g, is_external_url, total_pages))
        .collect();
    let return_stats = get_return_stats(logs);

    let total_views = logs.len() as u32;
    let unique_viewers = return_stats.unique_viewers;
    let identified_viewers = viewers.iter().filter(|v| v.email.is_some()).count() as u32;

    let mut summary = InsightsSummary {
        section: options.section,
        total_views,
        unique_viewers,
        identified_viewers,
        anonymous_viewers: unique_viewers - identified_viewers,
        return_visitors: return_stats.returning_viewers,
        return_rate: return_stats.return_rate,
        contact: options.contact.clone(),
        ..Default::default()
    };

    apply_scores(&mut summary, &viewers, options);
    apply_attention(&mut summary, logs, &viewers);
    apply_context(&mut summary, logs);
    apply_timing(&mut summary, logs, options);
    apply_content_mix(&mut summary, logs);
    if let Some(pages) = total_pages.filter(|p| *p > 1) {
        apply_document_pages(&mut summary, logs, pages);
    }
    apply_media(&mut summary, logs);
    apply_trends(&mut summary, options);

    tracing::debug!(
        section = %options.section,
        total_views = summary.total_views,
        unique_viewers = summary.unique_viewers,
        hot_leads = summary.hot_leads_count,
        link_score = summary.link_score,
        "Built insights summary"
    );

    summary
}

// ============================================================================
// Scores, leads and companies
// ============================================================================

fn apply_scores(
    summary: &mut InsightsSummary,
    viewers: &[AggregatedViewer],
    options: &SummaryOptions,
) {
    let score_sum: f64 = viewers.iter().map(|v| v.engagement_score as f64).sum();
    summary.avg_engagement = mean(score_sum, viewers.len()).round() as u32;

    let gate = LinkScoreGate::new(options.full_confidence_viewers);
    summary.link_score = gate.gate(viewers);
    summary.link_tier = EngagementTier::from_score(summary.link_score);

    for viewer in viewers {
        match viewer.tier {
            EngagementTier::Hot => summary.hot_leads_count += 1,
            EngagementTier::Warm => summary.warm_leads_count += 1,
            EngagementTier::Cold => summary.cold_leads_count += 1,
        }
    }

    let extra = &options.extra_consumer_domains;

    let mut hot_leads: Vec<HotLead> = viewers
        .iter()
        .filter(|v| v.tier == EngagementTier::Hot)
        .filter_map(|v| {
            let email = v.email.clone()?;
            let company = company_domain(&email, extra).map(|d| company_name_from_domain(&d));
            Some(HotLead {
                email,
                name: v.name.clone(),
                company,
                score: v.engagement_score,
                visits: v.total_clicks,
                total_duration_seconds: v.total_duration_seconds,
                downloaded: v.downloaded,
                last_accessed_at: v.last_accessed_at,
            })
        })
        .collect();
    hot_leads.sort_by(|a, b| b.score.cmp(&a.score));
    summary.hot_leads = hot_leads;

    summary.active_companies = detect_active_companies(viewers, extra);
}

/// Companies with at least two distinct viewers, most viewers first.
fn detect_active_companies(viewers: &[AggregatedViewer], extra: &[String]) -> Vec<ActiveCompany> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, (u32, u32)> = HashMap::new();

    for viewer in viewers {
        let Some(domain) = viewer.email.as_deref().and_then(|e| company_domain(e, extra)) else {
            continue;
        };
        let entry = counts.entry(domain.clone()).or_insert_with(|| {
            order.push(domain);
            (0, 0)
        });
        entry.0 += 1;
        entry.1 += viewer.total_clicks;
    }

    let mut companies: Vec<ActiveCompany> = order
        .into_iter()
        .filter_map(|domain| {
            let (viewer_count, view_count) = counts.get(&domain).copied()?;
            (viewer_count >= 2).then(|| ActiveCompany {
                name: company_name_from_domain(&domain),
                domain,
                viewer_count,
                view_count,
            })
        })
        .collect();
    companies.sort_by(|a, b| b.viewer_count.cmp(&a.viewer_count));
    companies
}

// ============================================================================
// Time, completion and downloads
// ============================================================================

fn apply_attention(summary: &mut InsightsSummary, logs: &[AccessLog], viewers: &[AggregatedViewer]) {
    summary.total_duration_seconds = viewers.iter().map(|v| v.total_duration_seconds).sum();
    summary.avg_duration_seconds = mean(summary.total_duration_seconds, logs.len());

    let completion_sum: f64 = viewers.iter().map(|v| v.max_completion_percentage).sum();
    summary.avg_completion = mean(completion_sum, viewers.len());
    summary.full_completion_count = viewers
        .iter()
        .filter(|v| v.max_completion_percentage >= FULL_COMPLETION_PERCENT)
        .count() as u32;
    summary.completion_rate = percent_of(summary.full_completion_count, summary.unique_viewers);

    summary.downloads = logs.iter().filter(|l| l.is_downloaded()).count() as u32;
    let downloaders = viewers.iter().filter(|v| v.downloaded).count() as u32;
    summary.download_rate = percent_of(downloaders, summary.unique_viewers);
}

// ============================================================================
// Geography, devices and acquisition
// ============================================================================

/// Counts values in first-seen order, returned most frequent first.
fn tally<'a>(values: impl Iterator<Item = &'a str>) -> Vec<(String, u32)> {
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut tallies: Vec<(String, u32)> = Vec::new();
    for value in values.map(str::trim).filter(|v| !v.is_empty()) {
        match index.get(value) {
            Some(&i) => tallies[i].1 += 1,
            None => {
                index.insert(value, tallies.len());
                tallies.push((value.to_string(), 1));
            }
        }
    }
    tallies.sort_by(|a, b| b.1.cmp(&a.1));
    tallies
}

fn apply_context(summary: &mut InsightsSummary, logs: &[AccessLog]) {
    let total = summary.total_views;

    let countries = tally(logs.iter().filter_map(|l| l.country.as_deref()));
    summary.country_count = countries.len() as u32;
    if let Some((country, count)) = countries.first() {
        summary.top_country = Some(country.clone());
        summary.top_country_percent = percent_of(*count, total);
    }
    summary.countries = countries
        .into_iter()
        .map(|(label, count)| Breakdown {
            label,
            count,
            percent: percent_of(count, total),
        })
        .collect();

    summary.top_city = tally(logs.iter().filter_map(|l| l.city.as_deref()))
        .into_iter()
        .next()
        .map(|(city, _)| city);
    summary.top_browser = tally(logs.iter().filter_map(|l| l.browser.as_deref()))
        .into_iter()
        .next()
        .map(|(browser, _)| browser);

    let (mut mobile, mut desktop, mut tablet) = (0, 0, 0);
    for log in logs {
        match log.device_type.as_deref().map(str::to_ascii_lowercase).as_deref() {
            Some("mobile" | "phone" | "smartphone") => mobile += 1,
            Some("tablet") => tablet += 1,
            Some("desktop" | "laptop") => desktop += 1,
            _ => {}
        }
    }
    summary.mobile_percent = percent_of(mobile, total);
    summary.desktop_percent = percent_of(desktop, total);
    summary.tablet_percent = percent_of(tablet, total);

    let (mut social, mut search, mut referral, mut direct, mut email) = (0, 0, 0, 0, 0);
    for log in logs {
        match log.traffic_source.as_deref().map(str::to_ascii_lowercase).as_deref() {
            Some("social") => social += 1,
            Some("search") => search += 1,
            Some("referral") => referral += 1,
            Some("direct") => direct += 1,
            Some("email") => email += 1,
            _ => {}
        }
    }
    summary.social_percent = percent_of(social, total);
    summary.search_percent = percent_of(search, total);
    summary.referral_percent = percent_of(referral, total);
    summary.direct_percent = percent_of(direct, total);
    summary.email_percent = percent_of(email, total);
    summary.top_traffic_source = tally(logs.iter().filter_map(|l| l.traffic_source.as_deref()))
        .into_iter()
        .next()
        .map(|(source, _)| source.to_ascii_lowercase());

    let campaigns = tally(logs.iter().filter_map(|l| l.utm_campaign.as_deref()));
    summary.campaign_count = campaigns.len() as u32;
    summary.top_campaign = campaigns.into_iter().next().map(|(campaign, _)| campaign);

    summary.qr_scans = logs.iter().filter(|l| l.is_qr_scan()).count() as u32;
    summary.qr_scan_percent = percent_of(summary.qr_scans, total);
}

// ============================================================================
// Timing
// ============================================================================

/// Index of the largest count; ties go to the lowest index.
fn peak_index(counts: &[u32]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, &count) in counts.iter().enumerate() {
        if count > 0 && best.map_or(true, |b| count > counts[b]) {
            best = Some(i);
        }
    }
    best
}

fn apply_timing(summary: &mut InsightsSummary, logs: &[AccessLog], options: &SummaryOptions) {
    let total = summary.total_views;
    let offset = Duration::minutes(options.utc_offset_minutes as i64);

    let mut day_counts = [0u32; 7];
    let mut hour_counts = [0u32; 24];
    let (mut weekend, mut after_hours) = (0, 0);

    for log in logs {
        let local = log.accessed_at + offset;
        let day = local.weekday().num_days_from_sunday() as usize;
        let hour = local.hour();
        day_counts[day] += 1;
        hour_counts[hour as usize] += 1;
        if day == 0 || day == 6 {
            weekend += 1;
        }
        if !BUSINESS_HOURS.contains(&hour) {
            after_hours += 1;
        }
    }

    if let Some(day) = peak_index(&day_counts) {
        summary.peak_day = Some(WEEKDAY_NAMES[day].to_string());
        summary.peak_day_index = Some(day as u8);
        summary.peak_day_percent = percent_of(day_counts[day], total);
    }
    if let Some(hour) = peak_index(&hour_counts) {
        summary.peak_hour = Some(hour as u8);
        summary.peak_hour_percent = percent_of(hour_counts[hour], total);
    }
    summary.weekend_percent = percent_of(weekend, total);
    summary.after_hours_percent = percent_of(after_hours, total);

    let last_view = logs.iter().map(|l| l.accessed_at).max();
    let now = options.now.or(last_view).unwrap_or_else(Utc::now);
    let day_ago = now - Duration::hours(24);

    summary.views_last_24h = logs
        .iter()
        .filter(|l| l.accessed_at > day_ago && l.accessed_at <= now)
        .count() as u32;
    summary.days_since_last_view = last_view.map(|last| (now - last).num_days().max(0));
}

// ============================================================================
// Content mix
// ============================================================================

fn apply_content_mix(summary: &mut InsightsSummary, logs: &[AccessLog]) {
    for log in logs {
        match log.content_kind() {
            ContentKind::Document => summary.doc_views += 1,
            ContentKind::Media => summary.media_views += 1,
            ContentKind::Image => summary.image_views += 1,
            ContentKind::Url => summary.url_views += 1,
            ContentKind::Other => summary.other_views += 1,
        }
    }

    let file_ids: HashSet<_> = logs.iter().filter_map(|l| l.file_id).collect();
    summary.files_count = if file_ids.is_empty() {
        tally(logs.iter().filter_map(|l| l.file_name.as_deref())).len() as u32
    } else {
        file_ids.len() as u32
    };

    if let Some((name, views)) = tally(logs.iter().filter_map(|l| l.file_name.as_deref()))
        .into_iter()
        .next()
    {
        summary.top_file = Some(name);
        summary.top_file_views = views;
    }
}

// ============================================================================
// Document pages
// ============================================================================

/// Page-level analysis for documents with more than one page.
///
/// Page 1 is never the most engaging page and neither the first nor the last
/// page is a drop-off page: everyone sees the first page and everyone who
/// finishes exits on the last one.
fn apply_document_pages(summary: &mut InsightsSummary, logs: &[AccessLog], total_pages: u32) {
    summary.total_pages = Some(total_pages);

    let reached: Vec<f64> = logs
        .iter()
        .filter_map(|l| l.max_page_reached)
        .map(|p| p.min(total_pages) as f64)
        .collect();
    summary.avg_pages_reached = mean(reached.iter().sum(), reached.len());

    let finished = logs
        .iter()
        .filter(|l| {
            l.max_page_reached.is_some_and(|p| p >= total_pages)
                || l.exit_page.is_some_and(|p| p >= total_pages)
        })
        .count() as u32;
    summary.reached_last_page_percent = percent_of(finished, summary.total_views);

    // page -> (seconds, samples)
    let mut page_times: BTreeMap<u32, (f64, u32)> = BTreeMap::new();
    for pages in logs.iter().filter_map(|l| l.pages_time_data.as_ref()) {
        for (&page, &seconds) in pages {
            if page == 0 || page > total_pages || !seconds.is_finite() || seconds < 0.0 {
                continue;
            }
            let entry = page_times.entry(page).or_insert((0.0, 0));
            entry.0 += seconds;
            entry.1 += 1;
        }
    }

    let page_avgs: Vec<(u32, f64)> = page_times
        .iter()
        .map(|(&page, &(seconds, samples))| (page, mean(seconds, samples as usize)))
        .collect();
    let cross_page_avg = mean(page_avgs.iter().map(|(_, avg)| avg).sum(), page_avgs.len());
    summary.avg_page_seconds = cross_page_avg;

    let mut best: Option<(u32, f64)> = None;
    for &(page, avg) in page_avgs.iter().filter(|(page, _)| *page != 1) {
        if best.map_or(true, |(_, best_avg)| avg > best_avg) {
            best = Some((page, avg));
        }
    }
    if let Some((page, avg)) = best {
        if cross_page_avg > 0.0 && avg >= 2.0 * cross_page_avg {
            summary.most_engaging_page = Some(page);
            summary.most_engaging_page_seconds = avg;
        }
    }

    let mut exits: BTreeMap<u32, u32> = BTreeMap::new();
    for page in logs.iter().filter_map(|l| l.exit_page) {
        if page > 1 && page < total_pages {
            *exits.entry(page).or_insert(0) += 1;
        }
    }
    let mut drop_off: Option<(u32, u32)> = None;
    for (&page, &count) in &exits {
        if drop_off.map_or(true, |(_, best_count)| count > best_count) {
            drop_off = Some((page, count));
        }
    }
    if let Some((page, count)) = drop_off {
        summary.drop_off_page = Some(page);
        summary.drop_off_rate = percent_of(count, summary.total_views);
    }
}

// ============================================================================
// Media
// ============================================================================

fn apply_media(summary: &mut InsightsSummary, logs: &[AccessLog]) {
    let media: Vec<&AccessLog> = logs
        .iter()
        .filter(|l| l.video_completion_percent.is_some() || l.content_kind() == ContentKind::Media)
        .collect();
    if media.is_empty() {
        return;
    }

    let completions: Vec<f64> = media
        .iter()
        .map(|l| {
            l.video_completion_percent
                .or(l.completion_percentage)
                .map(clamp_percentage)
                .unwrap_or(0.0)
        })
        .collect();
    let count = completions.len() as u32;

    summary.media_views = summary.media_views.max(count);
    summary.avg_watch_completion = mean(completions.iter().sum(), completions.len());
    summary.watch_completion_rate = percent_of(
        completions.iter().filter(|c| **c >= FULL_COMPLETION_PERCENT).count() as u32,
        count,
    );
    summary.early_drop_rate = percent_of(
        completions.iter().filter(|c| **c < EARLY_DROP_PERCENT).count() as u32,
        count,
    );

    let watch_times: Vec<f64> = media
        .iter()
        .filter_map(|l| l.watch_time_seconds)
        .filter(|s| s.is_finite() && *s >= 0.0)
        .collect();
    summary.avg_watch_time_seconds = mean(watch_times.iter().sum(), watch_times.len());
}

// ============================================================================
// Trends
// ============================================================================

fn apply_trends(summary: &mut InsightsSummary, options: &SummaryOptions) {
    let Some(previous) = options.previous else {
        return;
    };

    summary.previous_views = Some(previous.views);
    summary.views_change_percent = change_percent(summary.total_views, previous.views);
    summary.viewers_change_percent = change_percent(summary.unique_viewers, previous.unique_viewers);
    summary.engagement_change = previous
        .avg_engagement
        .map(|prev| summary.avg_engagement as i32 - prev as i32);
}

// ============================================================================
// Contacts
// ============================================================================

/// Builds the contact summary for one email across all of their logs.
///
/// Returns `None` when the contact has no logs.
pub fn build_contact_summary(
    email: &str,
    logs: &[AccessLog],
    now: DateTime<Utc>,
    extra_consumer_domains: &[String],
) -> Option<ContactSummary> {
    let email = email.trim();
    let contact_logs: Vec<&AccessLog> = logs
        .iter()
        .filter(|l| l.email().is_some_and(|e| e.eq_ignore_ascii_case(email)))
        .collect();

    // Every casing of the address is one contact.
    let first_email = contact_logs.first().copied()?.email()?;
    let group = ViewerGroup {
        key: ViewerKey::Email(first_email),
        logs: contact_logs,
    };
    let viewer = aggregate_viewer(&group, false, None);

    let file_names: Vec<String> = tally(group.logs.iter().filter_map(|l| l.file_name.as_deref()))
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    let file_ids: HashSet<_> = group.logs.iter().filter_map(|l| l.file_id).collect();
    let unique_files = file_ids.len().max(file_names.len()) as u32;

    Some(ContactSummary {
        email: viewer.email.clone().unwrap_or_else(|| email.to_string()),
        name: viewer.name.clone(),
        company: company_domain(email, extra_consumer_domains)
            .map(|d| company_name_from_domain(&d)),
        total_visits: viewer.total_clicks,
        unique_files,
        file_names,
        total_duration_seconds: viewer.total_duration_seconds,
        engagement_score: viewer.engagement_score,
        tier: viewer.tier,
        downloaded: viewer.downloaded,
        first_seen_at: Some(viewer.first_accessed_at),
        last_seen_at: Some(viewer.last_accessed_at),
        days_since_last_visit: Some((now - viewer.last_accessed_at).num_days().max(0)),
    })
}
