// ABOUTME: Configuration for sitedesk sessions
// ABOUTME: Environment variable names and the store configuration loaded from them

pub mod constants;
pub mod store_config;

pub use store_config::{ConfigError, StoreConfig};
