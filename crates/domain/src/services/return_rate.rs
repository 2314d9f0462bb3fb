//! Return-visitor statistics.

use crate::models::viewer::ReturnStats;
use crate::models::AccessLog;

use super::identity::group_by_viewer;
use super::metrics::{percent_of, ratio};

/// Number of distinct viewer identities in the logs.
pub fn calculate_unique_viewers(logs: &[AccessLog]) -> u32 {
    group_by_viewer(logs).len() as u32
}

/// Structured return statistics. `return_rate` is identical to
/// [`calculate_return_rate`] for the same input.
pub fn get_return_stats(logs: &[AccessLog]) -> ReturnStats {
    let groups = group_by_viewer(logs);
    let unique_viewers = groups.len() as u32;
    let returning_viewers = groups.iter().filter(|g| g.is_return_visitor()).count() as u32;

    ReturnStats {
        unique_viewers,
        returning_viewers,
        single_visit_viewers: unique_viewers - returning_viewers,
        return_ratio: ratio(returning_viewers, unique_viewers),
        return_rate: percent_of(returning_viewers, unique_viewers),
    }
}

/// Percentage (0-100, rounded) of viewers who visited more than once.
pub fn calculate_return_rate(logs: &[AccessLog]) -> u32 {
    get_return_stats(logs).return_rate
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn visit(email: &str) -> AccessLog {
        AccessLog {
            viewer_email: Some(email.to_string()),
            ..AccessLog::new(Utc::now())
        }
    }

    #[test]
    fn test_return_rate_empty() {
        assert_eq!(calculate_return_rate(&[]), 0);
        let stats = get_return_stats(&[]);
        assert_eq!(stats.unique_viewers, 0);
        assert_eq!(stats.return_ratio, 0.0);
    }

    #[test]
    fn test_return_rate_one_of_three() {
        let logs = vec![
            visit("a@x.com"),
            visit("a@x.com"),
            visit("b@x.com"),
            visit("c@x.com"),
        ];
        assert_eq!(calculate_return_rate(&logs), 33);
        assert_eq!(calculate_unique_viewers(&logs), 3);

        let stats = get_return_stats(&logs);
        assert_eq!(stats.returning_viewers, 1);
        assert_eq!(stats.single_visit_viewers, 2);
        assert!((stats.return_ratio - 1.0 / 3.0).abs() < f64::EPSILON);
        assert_eq!(stats.return_rate, calculate_return_rate(&logs));
    }

    #[test]
    fn test_return_rate_all_returning() {
        let logs = vec![visit("a@x.com"), visit("a@x.com")];
        assert_eq!(calculate_return_rate(&logs), 100);
    }

    #[test]
    fn test_anonymous_logs_are_distinct_viewers() {
        let now = Utc::now();
        let logs = vec![AccessLog::new(now), AccessLog::new(now)];
        assert_eq!(calculate_unique_viewers(&logs), 2);
        assert_eq!(calculate_return_rate(&logs), 0);
    }
}
