// ABOUTME: Store session configuration loaded from the environment
// ABOUTME: Event channel capacity, fixture seeding, and the fallback log filter

use std::env;
use std::num::ParseIntError;
use thiserror::Error;
use tracing::debug;

use crate::constants::{
    DEFAULT_EVENT_CHANNEL_SIZE, DEFAULT_LOG_FILTER, SITEDESK_EVENT_CHANNEL_SIZE, SITEDESK_LOG,
    SITEDESK_SEED_FIXTURES,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid event channel size: {0}")]
    InvalidChannelSize(#[from] ParseIntError),
    #[error("Event channel size must be at least 1")]
    ZeroChannelSize,
    #[error("Invalid boolean for {key}: {value}. Must be 'true' or 'false'")]
    InvalidBoolean { key: String, value: String },
}

/// Settings for one in-memory store session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Capacity of the change-event broadcast channel
    pub event_channel_size: usize,
    /// Start sessions from the demo fixtures
    pub seed_fixtures: bool,
    /// Log filter used when RUST_LOG is not set
    pub log_filter: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            event_channel_size: DEFAULT_EVENT_CHANNEL_SIZE,
            seed_fixtures: true,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl StoreConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let event_channel_size = match env::var(SITEDESK_EVENT_CHANNEL_SIZE) {
            Ok(raw) => raw.trim().parse::<usize>()?,
            Err(_) => DEFAULT_EVENT_CHANNEL_SIZE,
        };

        if event_channel_size == 0 {
            return Err(ConfigError::ZeroChannelSize);
        }

        let seed_fixtures = match env::var(SITEDESK_SEED_FIXTURES) {
            Ok(raw) => parse_bool(SITEDESK_SEED_FIXTURES, &raw)?,
            Err(_) => true,
        };

        let log_filter = env::var(SITEDESK_LOG)
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        let config = StoreConfig {
            event_channel_size,
            seed_fixtures,
            log_filter,
        };
        debug!("Loaded store config: {:?}", config);

        Ok(config)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidBoolean {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
