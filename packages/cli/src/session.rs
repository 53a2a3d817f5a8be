// ABOUTME: Session bootstrap for the command-line tool
// ABOUTME: Loads .env, reads configuration, initialises logging, and opens a store

use sitedesk_config::StoreConfig;
use sitedesk_store::ProjectStore;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Route log output to stderr so stdout stays clean for `--json`
pub fn init_tracing(config: &StoreConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("Failed to initialise logging: {}", e);
    }
}

/// Fresh in-memory session for one invocation
pub fn open_session() -> anyhow::Result<ProjectStore> {
    dotenvy::dotenv().ok();

    let config = StoreConfig::from_env()?;
    init_tracing(&config);
    debug!("Loaded configuration: {:?}", config);

    Ok(ProjectStore::open(&config))
}
