//! End-to-end tests for the analytics engine: logs in, scores, summary,
//! insights and actions out.

mod common;

use common::{anonymous_visit, engaged_visit, random_logs, visit};
use domain::models::{
    AccessLog, EngagementTier, Insight, InsightCategory, InsightsSummary, PeriodBaseline,
    Priority, Section, SummaryOptions,
};
use domain::services::{
    aggregate_viewers, build_contact_summary, calculate_file_score, calculate_insights_summary,
    calculate_return_rate, calculate_track_site_score, generate_insights_with_rules,
    generate_unified_actions, generate_unified_insights, get_return_stats, no_views_insight,
    scoring::time_score, FileScoreInput, InsightRule, DEFAULT_MAX_INSIGHTS, MAX_ACTIONS,
};

// ============================================================================
// Helper Functions
// ============================================================================

/// Alice visits eight times for 700s in total, reads everything and downloads.
/// Bob and Carol each glance once.
fn mixed_audience() -> Vec<AccessLog> {
    let mut logs: Vec<AccessLog> = (0..7)
        .map(|i| engaged_visit("alice@acme.io", i * 60, 50.0, 40.0))
        .collect();
    logs.push(AccessLog {
        viewer_name: Some("Alice Chen".to_string()),
        downloaded: Some(true),
        ..engaged_visit("alice@acme.io", 500, 350.0, 100.0)
    });
    logs.push(engaged_visit("bob@globex.com", 30, 10.0, 5.0));
    logs.push(engaged_visit("carol@gmail.com", 45, 10.0, 5.0));
    logs
}

fn ids(insights: &[Insight]) -> Vec<&str> {
    insights.iter().map(|i| i.id.as_str()).collect()
}

fn is_priority_ordered(priorities: impl Iterator<Item = Priority>) -> bool {
    let weights: Vec<u8> = priorities.map(|p| p.weight()).collect();
    weights.windows(2).all(|w| w[0] <= w[1])
}

/// Nine readers of a five-page deck; `middle_exits` of them leave on page 3,
/// three leave on page 1 and the rest finish on page 5.
fn deck_readers(middle_exits: usize) -> Vec<AccessLog> {
    let pages: [(u32, f64); 5] = [(1, 200.0), (2, 5.0), (3, 5.0), (4, 150.0), (5, 5.0)];
    (0..9)
        .map(|i| {
            let exit = if i < 3 {
                1
            } else if i < 3 + middle_exits {
                3
            } else {
                5
            };
            AccessLog {
                exit_page: Some(exit),
                max_page_reached: Some(exit),
                pages_time_data: Some(pages.iter().copied().collect()),
                file_name: Some("deck.pdf".to_string()),
                ..visit(&format!("reader{}@example.com", i), i as i64)
            }
        })
        .collect()
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_mixed_audience_end_to_end() {
    let logs = mixed_audience();
    let summary = calculate_insights_summary(&logs, &SummaryOptions::default());

    assert_eq!(summary.total_views, 10);
    assert_eq!(summary.unique_viewers, 3);
    assert_eq!(summary.return_visitors, 1);
    assert_eq!(summary.return_rate, 33);
    assert_eq!(summary.hot_leads_count, 1);
    assert_eq!(summary.cold_leads_count, 2);

    let lead = &summary.hot_leads[0];
    assert_eq!(lead.email, "alice@acme.io");
    assert_eq!(lead.score, 100);
    assert_eq!(lead.visits, 8);
    assert_eq!(lead.company.as_deref(), Some("Acme"));
    assert!(lead.downloaded);

    // A small audience never earns the full link score.
    assert!(summary.link_score > 0);
    assert!(summary.link_score < summary.avg_engagement);

    let insights = generate_unified_insights(&logs, &summary, Section::Dashboard, DEFAULT_MAX_INSIGHTS);
    assert_eq!(insights[0].id, "hot-leads");
    assert_eq!(insights[0].text, "Alice Chen is a hot lead");
    assert_eq!(insights[0].category, InsightCategory::Leads);
    assert!(insights.len() <= DEFAULT_MAX_INSIGHTS);
    assert!(is_priority_ordered(insights.iter().map(|i| i.priority)));

    let actions = generate_unified_actions(&summary, Section::Dashboard);
    assert_eq!(actions[0].id, "follow-up-hot-leads");
    assert_eq!(actions[0].title, "Follow up with Alice Chen");
    assert!(!actions[0].buttons.is_empty());
}

#[test]
fn test_four_visit_reader_is_hot() {
    let mut logs: Vec<AccessLog> = (0..3)
        .map(|i| engaged_visit("erin@umbrella.com", i * 90, 175.0, 60.0))
        .collect();
    logs.push(AccessLog {
        downloaded: Some(true),
        ..engaged_visit("erin@umbrella.com", 400, 175.0, 100.0)
    });
    logs.push(engaged_visit("frank@umbrella.com", 10, 20.0, 10.0));
    logs.push(engaged_visit("grace@yahoo.com", 20, 20.0, 10.0));

    let viewers = aggregate_viewers(&logs, false, None);
    assert_eq!(viewers[0].total_clicks, 4);
    assert_eq!(viewers[0].total_duration_seconds, 700.0);
    assert_eq!(viewers[0].engagement_score, 100);
    assert_eq!(viewers[0].tier, EngagementTier::Hot);

    assert_eq!(calculate_return_rate(&logs), 33);
    let summary = calculate_insights_summary(&logs, &SummaryOptions::default());
    assert_eq!(summary.hot_leads_count, 1);
    assert_eq!(summary.hot_leads[0].company.as_deref(), Some("Umbrella"));
    assert_eq!(summary.active_companies.len(), 1);
    assert_eq!(summary.active_companies[0].view_count, 5);
}

#[test]
fn test_viewer_scores_match_aggregation() {
    let viewers = aggregate_viewers(&mixed_audience(), false, None);
    assert_eq!(viewers.len(), 3);
    assert_eq!(viewers[0].email.as_deref(), Some("alice@acme.io"));
    assert_eq!(viewers[0].engagement_score, 100);
    assert_eq!(viewers[0].tier, EngagementTier::Hot);
    assert!(viewers[0].is_return_visitor);
    assert!(viewers[1..].iter().all(|v| v.tier == EngagementTier::Cold));
}

#[test]
fn test_no_logs_yields_no_views_insight() {
    let summary = calculate_insights_summary(&[], &SummaryOptions::default());

    for &section in Section::ALL {
        let insights = generate_unified_insights(&[], &summary, section, DEFAULT_MAX_INSIGHTS);
        assert_eq!(insights, vec![no_views_insight()]);
    }

    let actions = generate_unified_actions(&summary, Section::Dashboard);
    assert_eq!(actions[0].id, "share-first-link");
}

#[test]
fn test_section_filtering() {
    let logs = mixed_audience();
    let summary = calculate_insights_summary(&logs, &SummaryOptions::for_section(Section::FileDoc));

    let doc = generate_unified_insights(&logs, &summary, Section::FileDoc, 50);
    assert!(doc.iter().all(|i| i.category != InsightCategory::Contact));
    assert!(!ids(&doc).contains(&"track-site-clicks"));

    let site_summary =
        calculate_insights_summary(&logs, &SummaryOptions::for_section(Section::TrackSite));
    let site = generate_unified_insights(&logs, &site_summary, Section::TrackSite, 50);
    assert!(ids(&site).contains(&"track-site-clicks"));
    assert!(!ids(&site).contains(&"full-reads"));
}

#[test]
fn test_contacts_section_uses_contact_summary() {
    let logs = mixed_audience();
    let contact = build_contact_summary("Alice@Acme.io", &logs, common::base_time(), &[])
        .expect("alice has logs");
    assert_eq!(contact.total_visits, 8);
    assert_eq!(contact.tier, EngagementTier::Hot);
    assert_eq!(contact.company.as_deref(), Some("Acme"));

    let options = SummaryOptions {
        contact: Some(contact),
        ..SummaryOptions::for_section(Section::Contacts)
    };
    let alice_logs: Vec<AccessLog> = logs
        .iter()
        .filter(|l| l.viewer_email.as_deref() == Some("alice@acme.io"))
        .cloned()
        .collect();
    let summary = calculate_insights_summary(&alice_logs, &options);

    let insights = generate_unified_insights(&alice_logs, &summary, Section::Contacts, 50);
    assert_eq!(insights[0].id, "contact-hot");
    assert!(insights.iter().all(|i| i.category == InsightCategory::Contact));
    assert!(ids(&insights).contains(&"contact-downloaded"));
    assert!(ids(&insights).contains(&"contact-returning"));

    let actions = generate_unified_actions(&summary, Section::Contacts);
    assert_eq!(actions[0].id, "contact-follow-up");
}

#[test]
fn test_failing_rules_are_isolated() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let rules = vec![
        InsightRule {
            id: "fails",
            icon: "❌",
            priority: Priority::High,
            category: InsightCategory::Engagement,
            applies_to: &[Section::Dashboard],
            condition: |_, _| Ok(true),
            text: |s, _| {
                let page = domain::error::require(s.drop_off_page, "drop_off_page")?;
                Ok(format!("page {}", page))
            },
            implication: |_, _| Ok(String::new()),
        },
        InsightRule {
            id: "panics",
            icon: "💥",
            priority: Priority::High,
            category: InsightCategory::Engagement,
            applies_to: &[Section::Dashboard],
            condition: |_, logs| Ok(logs[1000].downloaded.is_some()),
            text: |_, _| Ok(String::new()),
            implication: |_, _| Ok(String::new()),
        },
        InsightRule {
            id: "works",
            icon: "✅",
            priority: Priority::Low,
            category: InsightCategory::Engagement,
            applies_to: &[Section::Dashboard],
            condition: |s, _| Ok(s.total_views > 0),
            text: |s, _| Ok(format!("{} views", s.total_views)),
            implication: |_, _| Ok(String::new()),
        },
    ];

    let logs = mixed_audience();
    let summary = calculate_insights_summary(&logs, &SummaryOptions::default());
    let insights = generate_insights_with_rules(&rules, &logs, &summary, Section::Dashboard, 8);

    assert_eq!(ids(&insights), vec!["works"]);
    assert_eq!(insights[0].text, "10 views");
}

#[test]
fn test_document_page_edges_are_excluded() {
    let options = SummaryOptions {
        total_pages: Some(5),
        ..SummaryOptions::for_section(Section::FileDoc)
    };

    // Two of nine leave on page 3: reported, but below the insight threshold.
    let logs = deck_readers(2);
    let summary = calculate_insights_summary(&logs, &options);
    assert_eq!(summary.drop_off_page, Some(3));
    assert_eq!(summary.drop_off_rate, 22);
    assert_eq!(summary.most_engaging_page, Some(4));

    let insights = generate_unified_insights(&logs, &summary, Section::FileDoc, 50);
    assert!(!ids(&insights).contains(&"high-drop-off"));
    let engaging = insights
        .iter()
        .find(|i| i.id == "most-engaging-page")
        .expect("page 4 doubles the average");
    assert!(engaging.text.starts_with("Page 4"));

    // Three of nine: now worth flagging.
    let logs = deck_readers(3);
    let summary = calculate_insights_summary(&logs, &options);
    let insights = generate_unified_insights(&logs, &summary, Section::FileDoc, 50);
    let drop_off = insights
        .iter()
        .find(|i| i.id == "high-drop-off")
        .expect("33% leave on page 3");
    assert_eq!(drop_off.text, "33% of viewers leave on page 3");
    assert_eq!(drop_off.priority, Priority::High);
}

#[test]
fn test_action_cap_and_order() {
    let summary = InsightsSummary {
        total_views: 60,
        unique_viewers: 30,
        hot_leads_count: 2,
        warm_leads_count: 1,
        social_percent: 40,
        peak_hour: Some(9),
        peak_hour_percent: 20,
        views_change_percent: Some(80),
        days_since_last_view: Some(20),
        ..Default::default()
    };

    let actions = generate_unified_actions(&summary, Section::Dashboard);
    assert_eq!(actions.len(), MAX_ACTIONS);
    assert_eq!(
        actions.iter().map(|a| a.id.as_str()).collect::<Vec<_>>(),
        vec![
            "follow-up-hot-leads",
            "reshare-link",
            "capitalize-momentum",
            "double-down-social",
            "schedule-peak-hour",
        ]
    );
    assert!(is_priority_ordered(actions.iter().map(|a| a.priority)));
}

#[test]
fn test_insight_cap_keeps_highest_priority() {
    let logs = mixed_audience();
    let options = SummaryOptions {
        previous: Some(PeriodBaseline {
            views: 4,
            unique_viewers: 1,
            avg_engagement: Some(10),
        }),
        ..SummaryOptions::default()
    };
    let summary = calculate_insights_summary(&logs, &options);

    let all = generate_unified_insights(&logs, &summary, Section::Dashboard, 50);
    let capped = generate_unified_insights(&logs, &summary, Section::Dashboard, 2);

    assert!(all.len() > 2);
    assert_eq!(capped.len(), 2);
    assert_eq!(capped[..], all[..2]);
    assert_eq!(ids(&capped), vec!["hot-leads", "views-up"]);
}

#[test]
fn test_anonymous_viewers_are_counted_separately() {
    let logs = vec![
        visit("dana@initech.com", 0),
        anonymous_visit("10.0.0.1", 5),
        anonymous_visit("10.0.0.1", 10),
        anonymous_visit("10.0.0.2", 15),
    ];
    let summary = calculate_insights_summary(&logs, &SummaryOptions::default());
    assert_eq!(summary.unique_viewers, 3);
    assert_eq!(summary.identified_viewers, 1);
    assert_eq!(summary.anonymous_viewers, 2);
    assert_eq!(summary.return_visitors, 1);
}

// ============================================================================
// Properties over random logs
// ============================================================================

#[test]
fn test_random_logs_stay_in_bounds() {
    for seed in 0..20 {
        let logs = random_logs(seed, 40, 8);
        let summary = calculate_insights_summary(&logs, &SummaryOptions::default());

        assert!(summary.avg_engagement <= 100);
        assert!(summary.link_score <= summary.avg_engagement);
        assert!(summary.return_rate <= 100);
        assert_eq!(
            summary.hot_leads_count + summary.warm_leads_count + summary.cold_leads_count,
            summary.unique_viewers
        );

        for viewer in aggregate_viewers(&logs, false, None) {
            assert!(viewer.engagement_score <= 100);
            assert_eq!(viewer.tier, EngagementTier::from_score(viewer.engagement_score));
        }

        let insights = generate_unified_insights(&logs, &summary, Section::Dashboard, DEFAULT_MAX_INSIGHTS);
        assert!(!insights.is_empty() || summary.total_views == 0);
        assert!(insights.len() <= DEFAULT_MAX_INSIGHTS);
        assert!(is_priority_ordered(insights.iter().map(|i| i.priority)));

        let actions = generate_unified_actions(&summary, Section::Dashboard);
        assert!(actions.len() <= MAX_ACTIONS);
    }
}

#[test]
fn test_return_rate_agrees_with_stats() {
    for seed in 0..20 {
        let logs = random_logs(seed, 25, 10);
        let stats = get_return_stats(&logs);
        assert_eq!(calculate_return_rate(&logs), stats.return_rate);
        assert_eq!(
            stats.returning_viewers + stats.single_visit_viewers,
            stats.unique_viewers
        );
        assert_eq!(
            calculate_insights_summary(&logs, &SummaryOptions::default()).return_rate,
            stats.return_rate
        );
    }
}

#[test]
fn test_scores_are_monotonic() {
    let mut previous = 0.0;
    for seconds in (0..=700).step_by(5) {
        let score = time_score(seconds as f64);
        assert!(score >= previous);
        previous = score;
    }

    let mut previous = 0;
    for seconds in (0..=900).step_by(30) {
        let score = calculate_file_score(&FileScoreInput {
            total_duration_seconds: seconds as f64,
            max_completion_percentage: 50.0,
            visit_count: 1,
            ..Default::default()
        });
        assert!(score >= previous);
        previous = score;
    }

    assert_eq!(calculate_track_site_score(1, false), 13);
    assert!(calculate_track_site_score(2, true) > calculate_track_site_score(1, false));
}
