//! Engine configuration.

use chrono::Utc;
use serde::Deserialize;
use shared::logging::LoggingConfig;

use crate::models::{Section, SummaryOptions, DEFAULT_FULL_CONFIDENCE_VIEWERS};
use crate::services::DEFAULT_MAX_INSIGHTS;

/// Built-in defaults, overridden by `config/analytics.*` and `ANALYTICS__*`.
const DEFAULTS: &str = r#"
    [insights]
    max_total = 8

    [link_score]
    full_confidence_viewers = 20

    [leads]
    extra_consumer_domains = []

    [logging]
    level = "info"
    format = "json"
"#;

const MAX_INSIGHTS_CEILING: usize = 50;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub insights: InsightsConfig,
    #[serde(default)]
    pub link_score: LinkScoreConfig,
    #[serde(default)]
    pub leads: LeadsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InsightsConfig {
    #[serde(default = "default_max_total")]
    pub max_total: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LinkScoreConfig {
    /// View count at which the link score carries full weight.
    #[serde(default = "default_full_confidence_viewers")]
    pub full_confidence_viewers: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LeadsConfig {
    /// Domains treated as personal email providers on top of the built-in list.
    #[serde(default)]
    pub extra_consumer_domains: Vec<String>,
}

fn default_max_total() -> usize {
    DEFAULT_MAX_INSIGHTS
}

fn default_full_confidence_viewers() -> u32 {
    DEFAULT_FULL_CONFIDENCE_VIEWERS
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            max_total: default_max_total(),
        }
    }
}

impl Default for LinkScoreConfig {
    fn default() -> Self {
        Self {
            full_confidence_viewers: default_full_confidence_viewers(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            insights: InsightsConfig::default(),
            link_score: LinkScoreConfig::default(),
            leads: LeadsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl EngineConfig {
    /// Load configuration from defaults, files and environment variables.
    ///
    /// Loading order (later sources override earlier):
    /// 1. built-in defaults
    /// 2. config/analytics.toml (optional)
    /// 3. Environment variables with ANALYTICS__ prefix, e.g.
    ///    `ANALYTICS__INSIGHTS__MAX_TOTAL=5`
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULTS, config::FileFormat::Toml))
            .add_source(config::File::with_name("config/analytics").required(false))
            .add_source(
                config::Environment::with_prefix("ANALYTICS")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("leads.extra_consumer_domains")
                    .try_parsing(true),
            )
            .build()?;

        let cfg: Self = config.try_deserialize()?;
        cfg.validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(cfg)
    }

    /// Load configuration for testing with custom overrides, without touching
    /// files or the environment.
    #[cfg(test)]
    pub fn load_for_test(overrides: &[(&str, &str)]) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULTS, config::FileFormat::Toml));

        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }

        builder.build()?.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !(1..=MAX_INSIGHTS_CEILING).contains(&self.insights.max_total) {
            return Err(ConfigValidationError::InvalidValue(format!(
                "insights.max_total must be between 1 and {}",
                MAX_INSIGHTS_CEILING
            )));
        }

        if self.link_score.full_confidence_viewers == 0 {
            return Err(ConfigValidationError::InvalidValue(
                "link_score.full_confidence_viewers must be at least 1".to_string(),
            ));
        }

        if !matches!(self.logging.format.as_str(), "json" | "pretty") {
            return Err(ConfigValidationError::InvalidValue(format!(
                "logging.format must be \"json\" or \"pretty\", got \"{}\"",
                self.logging.format
            )));
        }

        Ok(())
    }

    /// Summary options for `section` carrying the configured tuning values,
    /// with recency measured against the current time.
    pub fn summary_options(&self, section: Section) -> SummaryOptions {
        SummaryOptions {
            now: Some(Utc::now()),
            full_confidence_viewers: self.link_score.full_confidence_viewers,
            extra_consumer_domains: self
                .leads
                .extra_consumer_domains
                .iter()
                .map(|d| d.trim().to_lowercase())
                .filter(|d| !d.is_empty())
                .collect(),
            ..SummaryOptions::for_section(section)
        }
    }
}
