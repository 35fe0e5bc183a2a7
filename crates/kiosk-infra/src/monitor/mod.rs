//! Incident sinks for server-class failures.
//!
//! The executor forwards 5xx-class errors to an [`ErrorMonitor`]; these
//! adapters deliver them to configured channels (webhook, console) without
//! ever blocking a request path.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use kiosk_core::ports::{ErrorMonitor, Incident, MonitorError};

/// Discards every incident. The default when no monitor is configured.
pub struct NoopMonitor;

#[async_trait]
impl ErrorMonitor for NoopMonitor {
    async fn report(&self, _incident: Incident) -> Result<(), MonitorError> {
        Ok(())
    }
}

/// Logs incidents through tracing (for development).
pub struct ConsoleMonitor;

#[async_trait]
impl ErrorMonitor for ConsoleMonitor {
    async fn report(&self, incident: Incident) -> Result<(), MonitorError> {
        tracing::error!(
            context = %incident.context,
            url = %incident.url,
            status = incident.status,
            "server incident: {}",
            incident.message
        );
        Ok(())
    }
}

/// Posts incidents to a webhook URL (Slack, Discord, an ops collector).
pub struct WebhookMonitor {
    url: String,
    client: reqwest::Client,
}

impl WebhookMonitor {
    pub fn new(url: String) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ErrorMonitor for WebhookMonitor {
    async fn report(&self, incident: Incident) -> Result<(), MonitorError> {
        let payload = serde_json::json!({
            "context": incident.context,
            "url": incident.url,
            "status": incident.status,
            "message": incident.message,
            "timestamp": incident.timestamp.to_rfc3339(),
        });

        self.client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| MonitorError::Delivery(e.to_string()))?;

        Ok(())
    }
}

/// Decouples reporting from delivery with a bounded channel and a
/// background drain task. `report` never waits; when the buffer is full
/// the incident is dropped.
pub struct BufferedMonitor {
    sender: mpsc::Sender<Incident>,
}

impl BufferedMonitor {
    /// Wrap `inner`, draining incidents on a spawned task.
    pub fn new(inner: Arc<dyn ErrorMonitor>, buffer_size: usize) -> Self {
        let (tx, mut rx) = mpsc::channel::<Incident>(buffer_size);

        tokio::spawn(async move {
            while let Some(incident) = rx.recv().await {
                if let Err(error) = inner.report(incident).await {
                    tracing::warn!(%error, "incident delivery failed");
                }
            }
        });

        Self { sender: tx }
    }
}

#[async_trait]
impl ErrorMonitor for BufferedMonitor {
    async fn report(&self, incident: Incident) -> Result<(), MonitorError> {
        // Non-blocking send
        let _ = self.sender.try_send(incident);
        Ok(())
    }
}
