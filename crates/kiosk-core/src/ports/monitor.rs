//! Error monitoring port - external collaborator for server-class failures.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// A server-side failure worth forwarding to an external monitor.
#[derive(Debug, Clone)]
pub struct Incident {
    /// Label of the operation that failed, e.g. `orders.create`.
    pub context: String,
    pub url: String,
    pub status: u16,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl Incident {
    pub fn new(
        context: impl Into<String>,
        url: impl Into<String>,
        status: u16,
        message: impl Into<String>,
    ) -> Self {
        Self {
            context: context.into(),
            url: url.into(),
            status,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Trait for incident sinks - implement this for different backends.
#[async_trait]
pub trait ErrorMonitor: Send + Sync {
    async fn report(&self, incident: Incident) -> Result<(), MonitorError>;
}

#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    #[error("Failed to deliver incident: {0}")]
    Delivery(String),
}
