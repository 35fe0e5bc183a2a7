//! Application state - wires the SDK from the configured adapters.

use std::sync::Arc;

use kiosk_client::KioskApi;
use kiosk_core::ports::{ErrorMonitor, TokenStore};
use kiosk_infra::monitor::{BufferedMonitor, NoopMonitor, WebhookMonitor};
use kiosk_infra::token_store::FileTokenStore;
use kiosk_infra::transport::ReqwestTransport;

use crate::config::AppConfig;

/// Build the API façades with the appropriate adapter implementations.
pub fn build_api(config: &AppConfig) -> anyhow::Result<KioskApi> {
    let transport = Arc::new(ReqwestTransport::new(config.client.timeout)?);
    let store: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new(&config.state_dir));

    let monitor: Arc<dyn ErrorMonitor> = match &config.monitor_webhook_url {
        Some(url) => {
            tracing::info!("Incident webhook configured");
            Arc::new(BufferedMonitor::new(
                Arc::new(WebhookMonitor::new(url.clone())),
                100,
            ))
        }
        None => Arc::new(NoopMonitor),
    };

    Ok(KioskApi::new(config.client.clone(), transport, store, monitor))
}
