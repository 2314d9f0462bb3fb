//! Viewer identity.
//!
//! Every place that groups logs into viewers (return rate, scoring, hot leads,
//! company detection) goes through [`viewer_identity`], so metrics shown side
//! by side always agree on who a viewer is.

use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

use crate::models::access_log::{non_blank, AccessLog};

/// Identity of a viewer: email, else IP address, else session id, else the
/// log's own id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewerKey<'a> {
    Email(&'a str),
    Ip(&'a str),
    Session(&'a str),
    Log(Uuid),
}

impl ViewerKey<'_> {
    pub fn is_identified(&self) -> bool {
        matches!(self, ViewerKey::Email(_))
    }
}

impl fmt::Display for ViewerKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewerKey::Email(v) | ViewerKey::Ip(v) | ViewerKey::Session(v) => write!(f, "{}", v),
            ViewerKey::Log(id) => write!(f, "{}", id),
        }
    }
}

/// Resolves the identity key of a log. Blank strings count as absent.
pub fn viewer_identity(log: &AccessLog) -> ViewerKey<'_> {
    if let Some(email) = log.email() {
        ViewerKey::Email(email)
    } else if let Some(ip) = non_blank(log.ip_address.as_deref()) {
        ViewerKey::Ip(ip)
    } else if let Some(session) = non_blank(log.session_id.as_deref()) {
        ViewerKey::Session(session)
    } else {
        ViewerKey::Log(log.id)
    }
}

/// All logs of one viewer, in input order.
#[derive(Debug, Clone)]
pub struct ViewerGroup<'a> {
    pub key: ViewerKey<'a>,
    pub logs: Vec<&'a AccessLog>,
}

impl ViewerGroup<'_> {
    pub fn visits(&self) -> u32 {
        self.logs.len() as u32
    }

    pub fn is_return_visitor(&self) -> bool {
        self.logs.len() > 1
    }
}

/// Groups logs by viewer identity, preserving first-appearance order.
pub fn group_by_viewer(logs: &[AccessLog]) -> Vec<ViewerGroup<'_>> {
    let mut index: HashMap<ViewerKey<'_>, usize> = HashMap::new();
    let mut groups: Vec<ViewerGroup<'_>> = Vec::new();

    for log in logs {
        let key = viewer_identity(log);
        match index.get(&key) {
            Some(&i) => groups[i].logs.push(log),
            None => {
                index.insert(key, groups.len());
                groups.push(ViewerGroup {
                    key,
                    logs: vec![log],
                });
            }
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn log() -> AccessLog {
        AccessLog::new(Utc::now())
    }

    #[test]
    fn test_identity_precedence() {
        let full = AccessLog {
            viewer_email: Some("jane@acme.com".to_string()),
            ip_address: Some("10.0.0.1".to_string()),
            session_id: Some("s1".to_string()),
            ..log()
        };
        assert_eq!(viewer_identity(&full), ViewerKey::Email("jane@acme.com"));

        let ip = AccessLog {
            ip_address: Some("10.0.0.1".to_string()),
            session_id: Some("s1".to_string()),
            ..log()
        };
        assert_eq!(viewer_identity(&ip), ViewerKey::Ip("10.0.0.1"));

        let session = AccessLog {
            session_id: Some("s1".to_string()),
            ..log()
        };
        assert_eq!(viewer_identity(&session), ViewerKey::Session("s1"));

        let bare = log();
        assert_eq!(viewer_identity(&bare), ViewerKey::Log(bare.id));
    }

    #[test]
    fn test_blank_fields_fall_through() {
        let log = AccessLog {
            viewer_email: Some("".to_string()),
            ip_address: Some("  ".to_string()),
            session_id: Some("s9".to_string()),
            ..log()
        };
        assert_eq!(viewer_identity(&log), ViewerKey::Session("s9"));
    }

    #[test]
    fn test_group_by_viewer_preserves_order() {
        let logs = vec![
            AccessLog {
                viewer_email: Some("b@x.com".to_string()),
                ..log()
            },
            AccessLog {
                viewer_email: Some("a@x.com".to_string()),
                ..log()
            },
            AccessLog {
                viewer_email: Some("b@x.com".to_string()),
                ..log()
            },
            log(),
        ];

        let groups = group_by_viewer(&logs);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].key, ViewerKey::Email("b@x.com"));
        assert_eq!(groups[0].visits(), 2);
        assert!(groups[0].is_return_visitor());
        assert_eq!(groups[1].key, ViewerKey::Email("a@x.com"));
        assert!(!groups[2].key.is_identified());
    }

    #[test]
    fn test_group_by_viewer_empty() {
        assert!(group_by_viewer(&[]).is_empty());
    }

    #[test]
    fn test_viewer_key_display() {
        assert_eq!(ViewerKey::Ip("10.0.0.1").to_string(), "10.0.0.1");
    }
}
