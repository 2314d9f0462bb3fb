//! Common validation utilities.

use validator::ValidationError;

/// Validates that a page number is 1-based.
pub fn validate_page_number(page: u32) -> Result<(), ValidationError> {
    if page >= 1 {
        Ok(())
    } else {
        let mut err = ValidationError::new("page_range");
        err.message = Some("Page numbers start at 1".into());
        Err(err)
    }
}

/// Validates that a UTC offset in minutes is a real timezone offset (-14h to +14h).
pub fn validate_utc_offset_minutes(offset: i32) -> Result<(), ValidationError> {
    if (-840..=840).contains(&offset) {
        Ok(())
    } else {
        let mut err = ValidationError::new("utc_offset_range");
        err.message = Some("UTC offset must be between -840 and 840 minutes".into());
        Err(err)
    }
}

/// Clamps a possibly malformed percentage into 0..=100, mapping NaN to 0.
pub fn clamp_percentage(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_message() {
        let err = validate_page_number(0).unwrap_err();
        assert_eq!(err.code, "page_range");
        assert!(err.message.unwrap().contains("start at 1"));
    }

    #[test]
    fn test_validate_page_number() {
        assert!(validate_page_number(1).is_ok());
        assert!(validate_page_number(250).is_ok());
        assert!(validate_page_number(0).is_err());
    }

    #[test]
    fn test_validate_utc_offset_minutes() {
        assert!(validate_utc_offset_minutes(0).is_ok());
        assert!(validate_utc_offset_minutes(-300).is_ok());
        assert!(validate_utc_offset_minutes(840).is_ok());
        assert!(validate_utc_offset_minutes(900).is_err());
    }

    #[test]
    fn test_clamp_percentage() {
        assert_eq!(clamp_percentage(-3.0), 0.0);
        assert_eq!(clamp_percentage(42.0), 42.0);
        assert_eq!(clamp_percentage(180.0), 100.0);
        assert_eq!(clamp_percentage(f64::NAN), 0.0);
    }
}
