// ABOUTME: Environment variable name constants
// ABOUTME: Centralized definitions of all environment variable names used across sitedesk

// Store Configuration
pub const SITEDESK_EVENT_CHANNEL_SIZE: &str = "SITEDESK_EVENT_CHANNEL_SIZE";
pub const SITEDESK_SEED_FIXTURES: &str = "SITEDESK_SEED_FIXTURES";

// Logging
pub const SITEDESK_LOG: &str = "SITEDESK_LOG";

// Defaults
pub const DEFAULT_EVENT_CHANNEL_SIZE: usize = 200;
pub const DEFAULT_LOG_FILTER: &str = "info";
