//! Logging initialization and configuration.

use serde::Deserialize;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter,
};

/// Logging configuration for services embedding the engine.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}

/// Initializes the logging subsystem based on configuration.
///
/// `RUST_LOG` takes precedence over the configured level. Fails if a global
/// subscriber has already been installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), TryInitError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let subscriber = tracing_subscriber::registry().with(env_filter);

    match config.format.as_str() {
        "json" => {
            let json_layer = fmt::layer()
                .json()
                .with_span_events(FmtSpan::CLOSE)
                .with_current_span(true)
                .with_target(true);
            subscriber.with(json_layer).try_init()
        }
        _ => {
            let pretty_layer = fmt::layer()
                .pretty()
                .with_span_events(FmtSpan::CLOSE)
                .with_target(true);
            subscriber.with(pretty_layer).try_init()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_config_defaults() {
        let config: LoggingConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, LoggingConfig::default());
        assert_eq!(config.level, "info");
        assert_eq!(config.format, "json");
    }

    #[test]
    fn test_init_logging_only_once() {
        let config = LoggingConfig {
            level: "debug".to_string(),
            format: "pretty".to_string(),
        };
        assert!(init_logging(&config).is_ok());
        assert!(init_logging(&config).is_err());
    }
}
