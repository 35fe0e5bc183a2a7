//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use kiosk_client::ClientConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub client: ClientConfig,
    /// Directory holding the persisted credential files.
    pub state_dir: PathBuf,
    /// Webhook receiving server-incident reports, if configured.
    pub monitor_webhook_url: Option<String>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let state_dir = env::var("KIOSK_STATE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(".kiosk"));

        Self {
            client: ClientConfig::from_env(),
            state_dir,
            monitor_webhook_url: env::var("KIOSK_MONITOR_WEBHOOK_URL").ok(),
        }
    }
}
