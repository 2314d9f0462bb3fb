//! Common test utilities for engine integration tests.
//!
//! Log builders and a seeded random log generator.

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use domain::models::AccessLog;
use fake::faker::internet::en::SafeEmail;
use fake::Fake;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Monday 2026-03-02 10:00 UTC.
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap()
}

/// A visit by `email`, `minutes` after [`base_time`].
pub fn visit(email: &str, minutes: i64) -> AccessLog {
    AccessLog {
        viewer_email: Some(email.to_string()),
        ..AccessLog::new(base_time() + Duration::minutes(minutes))
    }
}

/// A visit that spent `seconds` with the content at `completion` percent.
pub fn engaged_visit(email: &str, minutes: i64, seconds: f64, completion: f64) -> AccessLog {
    AccessLog {
        total_duration_seconds: Some(seconds),
        completion_percentage: Some(completion),
        ..visit(email, minutes)
    }
}

/// An anonymous visit identified only by IP address.
pub fn anonymous_visit(ip: &str, minutes: i64) -> AccessLog {
    AccessLog {
        ip_address: Some(ip.to_string()),
        ..AccessLog::new(base_time() + Duration::minutes(minutes))
    }
}

/// Random logs from a pool of `viewers` viewers, reproducible for a given seed.
pub fn random_logs(seed: u64, count: usize, viewers: usize) -> Vec<AccessLog> {
    let mut rng = StdRng::seed_from_u64(seed);
    let emails: Vec<String> = (0..viewers.max(1))
        .map(|_| SafeEmail().fake_with_rng(&mut rng))
        .collect();

    (0..count)
        .map(|i| {
            let email = &emails[rng.gen_range(0..emails.len())];
            let mut log = visit(email, (i as i64) * 37);
            log.total_duration_seconds = Some((0.0..1500.0).fake_with_rng(&mut rng));
            log.completion_percentage = Some((0.0..100.0).fake_with_rng(&mut rng));
            log.downloaded = Some(rng.gen_bool(0.2));
            if rng.gen_bool(0.3) {
                log.viewer_email = None;
                log.ip_address = Some(format!("10.0.0.{}", rng.gen_range(1..20)));
            }
            log
        })
        .collect()
}
