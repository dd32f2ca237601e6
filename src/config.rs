use serde::Deserialize;
use std::fs;
use thiserror::Error;

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub check_interval_seconds: u64,
    pub cache_ttl_seconds: u64,
    pub request_timeout_seconds: u64,
    pub user_agent: String,
    /// Reported as-is; there is no public feed for the market-wide ratio.
    pub margin_maintenance_ratio: f64,
    /// Range requested from the quote API, in days.
    pub history_days: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            check_interval_seconds: 300,
            cache_ttl_seconds: 300,
            request_timeout_seconds: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            margin_maintenance_ratio: 170.23,
            history_days: 90,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_string(),
        source,
    })?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = serde_json::from_str(content)?;
    config.validate()?;
    Ok(config)
}

impl AppConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_seconds == 0 {
            return Err(ConfigError::Invalid {
                field: "request_timeout_seconds",
                reason: "must be positive".into(),
            });
        }
        if self.check_interval_seconds == 0 {
            return Err(ConfigError::Invalid {
                field: "check_interval_seconds",
                reason: "must be positive".into(),
            });
        }
        if !(1..=365).contains(&self.history_days) {
            return Err(ConfigError::Invalid {
                field: "history_days",
                reason: format!("{} is outside 1..=365", self.history_days),
            });
        }
        if !self.margin_maintenance_ratio.is_finite() || self.margin_maintenance_ratio <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "margin_maintenance_ratio",
                reason: "must be a positive number".into(),
            });
        }
        Ok(())
    }
}
