//! Domain error types.

use thiserror::Error;

/// Failure while evaluating a single insight or action rule.
///
/// Rule failures are isolated by the engines: the failing rule is skipped
/// and logged, the remaining rules still run.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuleError {
    #[error("Missing metric: {0}")]
    MissingMetric(&'static str),

    #[error("Invalid metric {metric}: {value}")]
    InvalidMetric { metric: &'static str, value: String },

    #[error("Rule panicked: {0}")]
    Panicked(String),
}

pub type RuleResult<T> = Result<T, RuleError>;

/// Unwraps an optional summary field or reports it as missing.
pub fn require<T>(value: Option<T>, metric: &'static str) -> RuleResult<T> {
    value.ok_or(RuleError::MissingMetric(metric))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require() {
        assert_eq!(require(Some(3), "views"), Ok(3));
        assert_eq!(
            require::<u32>(None, "contact"),
            Err(RuleError::MissingMetric("contact"))
        );
    }

    #[test]
    fn test_rule_error_display() {
        assert_eq!(
            RuleError::MissingMetric("drop_off_page").to_string(),
            "Missing metric: drop_off_page"
        );
        let err = RuleError::InvalidMetric {
            metric: "peak_hour",
            value: "25".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid metric peak_hour: 25");
    }
}
