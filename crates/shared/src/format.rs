//! Human-readable formatting helpers used in insight and action text.

use lazy_static::lazy_static;
use std::collections::HashMap;

/// Flag shown when a country cannot be resolved.
pub const UNKNOWN_COUNTRY_FLAG: &str = "🌍";

lazy_static! {
    static ref COUNTRY_CODES: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("united states", "US");
        m.insert("united states of america", "US");
        m.insert("usa", "US");
        m.insert("united kingdom", "GB");
        m.insert("uk", "GB");
        m.insert("great britain", "GB");
        m.insert("canada", "CA");
        m.insert("australia", "AU");
        m.insert("new zealand", "NZ");
        m.insert("ireland", "IE");
        m.insert("germany", "DE");
        m.insert("france", "FR");
        m.insert("spain", "ES");
        m.insert("portugal", "PT");
        m.insert("italy", "IT");
        m.insert("netherlands", "NL");
        m.insert("belgium", "BE");
        m.insert("switzerland", "CH");
        m.insert("austria", "AT");
        m.insert("sweden", "SE");
        m.insert("norway", "NO");
        m.insert("denmark", "DK");
        m.insert("finland", "FI");
        m.insert("poland", "PL");
        m.insert("czechia", "CZ");
        m.insert("czech republic", "CZ");
        m.insert("slovakia", "SK");
        m.insert("hungary", "HU");
        m.insert("romania", "RO");
        m.insert("greece", "GR");
        m.insert("turkey", "TR");
        m.insert("ukraine", "UA");
        m.insert("israel", "IL");
        m.insert("united arab emirates", "AE");
        m.insert("saudi arabia", "SA");
        m.insert("india", "IN");
        m.insert("pakistan", "PK");
        m.insert("china", "CN");
        m.insert("japan", "JP");
        m.insert("south korea", "KR");
        m.insert("singapore", "SG");
        m.insert("hong kong", "HK");
        m.insert("taiwan", "TW");
        m.insert("indonesia", "ID");
        m.insert("philippines", "PH");
        m.insert("vietnam", "VN");
        m.insert("thailand", "TH");
        m.insert("malaysia", "MY");
        m.insert("brazil", "BR");
        m.insert("mexico", "MX");
        m.insert("argentina", "AR");
        m.insert("chile", "CL");
        m.insert("colombia", "CO");
        m.insert("peru", "PE");
        m.insert("south africa", "ZA");
        m.insert("nigeria", "NG");
        m.insert("kenya", "KE");
        m.insert("egypt", "EG");
        m
    };
}

/// Formats a number of seconds as a compact duration such as `45s`,
/// `2m 5s` or `1h 3m`.
pub fn format_duration(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 1.0 {
        return "0s".to_string();
    }

    let total = seconds.round() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        if minutes > 0 {
            format!("{}h {}m", hours, minutes)
        } else {
            format!("{}h", hours)
        }
    } else if minutes > 0 {
        if secs > 0 {
            format!("{}m {}s", minutes, secs)
        } else {
            format!("{}m", minutes)
        }
    } else {
        format!("{}s", secs)
    }
}

/// Resolves a country name or ISO 3166-1 alpha-2 code to its flag emoji.
pub fn country_flag(country: &str) -> String {
    let trimmed = country.trim();

    let code = if trimmed.len() == 2 && trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(trimmed.to_ascii_uppercase())
    } else {
        COUNTRY_CODES
            .get(trimmed.to_lowercase().as_str())
            .map(|c| c.to_string())
    };

    code.and_then(|c| flag_from_code(&c))
        .unwrap_or_else(|| UNKNOWN_COUNTRY_FLAG.to_string())
}

fn flag_from_code(code: &str) -> Option<String> {
    code.chars()
        .map(|c| char::from_u32(0x1F1E6 + (c as u32 - 'A' as u32)))
        .collect()
}

/// Returns `singular` when `count` is one and `plural` otherwise.
pub fn pluralize<'a>(count: u32, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 {
        singular
    } else {
        plural
    }
}

/// Formats an hour of day (0-23) as `9am`, `12pm`, `6pm`.
pub fn format_hour(hour: u8) -> String {
    match hour % 24 {
        0 => "12am".to_string(),
        h @ 1..=11 => format!("{}am", h),
        12 => "12pm".to_string(),
        h => format!("{}pm", h - 12),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0.0), "0s");
        assert_eq!(format_duration(0.4), "0s");
        assert_eq!(format_duration(-5.0), "0s");
        assert_eq!(format_duration(f64::NAN), "0s");
        assert_eq!(format_duration(45.0), "45s");
        assert_eq!(format_duration(60.0), "1m");
        assert_eq!(format_duration(125.0), "2m 5s");
        assert_eq!(format_duration(3600.0), "1h");
        assert_eq!(format_duration(3780.0), "1h 3m");
    }

    #[test]
    fn test_country_flag_by_code() {
        assert_eq!(country_flag("US"), "🇺🇸");
        assert_eq!(country_flag("de"), "🇩🇪");
    }

    #[test]
    fn test_country_flag_by_name() {
        assert_eq!(country_flag("United Kingdom"), "🇬🇧");
        assert_eq!(country_flag(" japan "), "🇯🇵");
    }

    #[test]
    fn test_country_flag_unknown() {
        assert_eq!(country_flag("Atlantis"), UNKNOWN_COUNTRY_FLAG);
        assert_eq!(country_flag(""), UNKNOWN_COUNTRY_FLAG);
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize(1, "view", "views"), "view");
        assert_eq!(pluralize(0, "view", "views"), "views");
        assert_eq!(pluralize(7, "view", "views"), "views");
    }

    #[test]
    fn test_format_hour() {
        assert_eq!(format_hour(0), "12am");
        assert_eq!(format_hour(9), "9am");
        assert_eq!(format_hour(12), "12pm");
        assert_eq!(format_hour(18), "6pm");
    }
}
