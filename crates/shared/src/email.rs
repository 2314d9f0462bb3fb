//! Email domain utilities.
//!
//! Viewers are grouped into companies by the domain of their email address.
//! Free consumer mailbox providers say nothing about an employer, so they are
//! excluded from every company heuristic.

use lazy_static::lazy_static;
use regex::Regex;

/// Free consumer email providers that never identify an employer.
pub const CONSUMER_EMAIL_DOMAINS: &[&str] = &[
    "gmail.com",
    "googlemail.com",
    "yahoo.com",
    "yahoo.co.uk",
    "ymail.com",
    "hotmail.com",
    "hotmail.co.uk",
    "outlook.com",
    "live.com",
    "msn.com",
    "aol.com",
    "icloud.com",
    "me.com",
    "mac.com",
    "protonmail.com",
    "proton.me",
    "gmx.com",
    "gmx.de",
    "web.de",
    "mail.com",
    "mail.ru",
    "yandex.com",
    "yandex.ru",
    "zoho.com",
    "qq.com",
    "163.com",
    "126.com",
    "hey.com",
    "fastmail.com",
    "tutanota.com",
];

lazy_static! {
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[^@\s]+@((?:[A-Za-z0-9-]+\.)+[A-Za-z]{2,})$").unwrap();
}

/// Extracts the lowercased domain of an email address.
///
/// Returns `None` when the input does not look like an email address.
pub fn email_domain(email: &str) -> Option<String> {
    EMAIL_REGEX
        .captures(email.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_ascii_lowercase())
}

/// Check if a domain belongs to a free consumer email provider.
///
/// `extra` holds additional consumer domains supplied by configuration.
pub fn is_consumer_domain(domain: &str, extra: &[String]) -> bool {
    let domain = domain.to_ascii_lowercase();
    CONSUMER_EMAIL_DOMAINS.contains(&domain.as_str())
        || extra.iter().any(|d| d.eq_ignore_ascii_case(&domain))
}

/// Returns the employer domain of an email, or `None` for consumer mailboxes
/// and malformed addresses.
pub fn company_domain(email: &str, extra: &[String]) -> Option<String> {
    email_domain(email).filter(|domain| !is_consumer_domain(domain, extra))
}

/// Derives a display name for a company from its email domain.
///
/// `acme-labs.io` becomes `Acme Labs`, `globex.co.uk` becomes `Globex`.
pub fn company_name_from_domain(domain: &str) -> String {
    let labels: Vec<&str> = domain.split('.').filter(|l| !l.is_empty()).collect();

    let name = match labels.len() {
        0 => return String::new(),
        1 => labels[0],
        n => {
            let second_level = labels[n - 2];
            let tld = labels[n - 1];
            // Two-part public suffixes such as co.uk or com.au
            if n >= 3 && tld.len() == 2 && second_level.len() <= 3 {
                labels[n - 3]
            } else {
                second_level
            }
        }
    };

    name.split(['-', '_'])
        .filter(|w| !w.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::internet::en::{FreeEmail, SafeEmail};
    use fake::Fake;

    #[test]
    fn test_email_domain() {
        assert_eq!(email_domain("jane@Acme.com"), Some("acme.com".to_string()));
        assert_eq!(
            email_domain("  bob@sales.globex.co.uk "),
            Some("sales.globex.co.uk".to_string())
        );
        assert_eq!(email_domain("not-an-email"), None);
        assert_eq!(email_domain("a@b"), None);
        assert_eq!(email_domain(""), None);
    }

    #[test]
    fn test_is_consumer_domain() {
        assert!(is_consumer_domain("gmail.com", &[]));
        assert!(is_consumer_domain("GMAIL.COM", &[]));
        assert!(!is_consumer_domain("acme.com", &[]));
        assert!(is_consumer_domain("acme.com", &["ACME.com".to_string()]));
    }

    #[test]
    fn test_company_domain() {
        assert_eq!(company_domain("jane@acme.com", &[]), Some("acme.com".to_string()));
        assert_eq!(company_domain("jane@gmail.com", &[]), None);
        assert_eq!(company_domain("jane@", &[]), None);
    }

    #[test]
    fn test_company_name_from_domain() {
        assert_eq!(company_name_from_domain("acme.com"), "Acme");
        assert_eq!(company_name_from_domain("acme-labs.io"), "Acme Labs");
        assert_eq!(company_name_from_domain("globex.co.uk"), "Globex");
        assert_eq!(company_name_from_domain("mail.initech.com"), "Initech");
        assert_eq!(company_name_from_domain("localhost"), "Localhost");
        assert_eq!(company_name_from_domain(""), "");
    }

    #[test]
    fn test_company_domain_random_addresses() {
        for _ in 0..50 {
            let work: String = SafeEmail().fake();
            assert!(company_domain(&work, &[]).is_some(), "{work}");

            let personal: String = FreeEmail().fake();
            assert_eq!(company_domain(&personal, &[]), None, "{personal}");
        }
    }
}
