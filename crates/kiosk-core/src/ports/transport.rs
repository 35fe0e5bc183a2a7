//! HTTP transport port.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// The HTTP methods the executor issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }

    /// Whether a repeat of the request cannot change server state further.
    /// Only idempotent requests are eligible for automatic retry.
    pub fn is_idempotent(&self) -> bool {
        !matches!(self, Self::Post | Self::Patch)
    }
}

/// A fully-assembled outbound request.
#[derive(Debug, Clone)]
pub struct RequestParts {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

/// Status and raw body of an HTTP exchange that reached the server.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport-level failures - the exchange never produced a status code.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// DNS failure, refused or unreachable connection.
    #[error("network unreachable: {0}")]
    Offline(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("request cancelled")]
    Cancelled,

    /// Any other transport failure (protocol error, broken body stream).
    #[error("transport failure: {0}")]
    Failed(String),
}

/// Transport trait - abstraction over the HTTP client backend.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Issue the request and return the raw status and body.
    async fn execute(&self, request: RequestParts) -> Result<RawResponse, TransportError>;
}
