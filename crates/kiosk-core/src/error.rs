//! The closed error taxonomy of the request pipeline.
//!
//! Every failure that leaves the executor is exactly one of these variants;
//! callers never observe a raw transport error. Each variant carries a
//! display-ready message and its creation timestamp.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde_json::Value;
use thiserror::Error;

/// Per-field validation messages, keyed by field name.
pub type FieldErrors = HashMap<String, Vec<String>>;

/// Classified API failure.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// No connectivity: DNS failure, refused connection, unreachable host.
    #[error("{message}")]
    Network {
        message: String,
        timestamp: DateTime<Utc>,
    },

    /// The request timed out or was cancelled before completion.
    #[error("{message}")]
    Timeout {
        message: String,
        timestamp: DateTime<Utc>,
    },

    /// 422-class rejection carrying per-field details.
    #[error("{message}")]
    Validation {
        message: String,
        details: FieldErrors,
        timestamp: DateTime<Utc>,
    },

    #[error("{message}")]
    Unauthorized {
        message: String,
        timestamp: DateTime<Utc>,
    },

    #[error("{message}")]
    Forbidden {
        message: String,
        timestamp: DateTime<Utc>,
    },

    #[error("{message}")]
    NotFound {
        message: String,
        timestamp: DateTime<Utc>,
    },

    /// 5xx-class upstream failure.
    #[error("{message}")]
    Server {
        message: String,
        status: u16,
        timestamp: DateTime<Utc>,
    },

    /// Anything the other variants do not cover, carrying the upstream
    /// message, machine code, and details verbatim.
    #[error("{message}")]
    Api {
        message: String,
        status: u16,
        code: Option<String>,
        details: Option<Value>,
        timestamp: DateTime<Utc>,
    },
}

impl ApiError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn validation(message: impl Into<String>, details: FieldErrors) -> Self {
        Self::Validation {
            message: message.into(),
            details,
            timestamp: Utc::now(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn server(message: impl Into<String>, status: u16) -> Self {
        Self::Server {
            message: message.into(),
            status,
            timestamp: Utc::now(),
        }
    }

    pub fn api(
        message: impl Into<String>,
        status: u16,
        code: Option<String>,
        details: Option<Value>,
    ) -> Self {
        Self::Api {
            message: message.into(),
            status,
            code,
            details,
            timestamp: Utc::now(),
        }
    }

    /// Fallback for failures nothing else explains.
    pub fn unknown() -> Self {
        Self::api("An unknown error occurred", 500, None, None)
    }

    /// The display-ready message carried by every variant.
    pub fn message(&self) -> &str {
        match self {
            Self::Network { message, .. }
            | Self::Timeout { message, .. }
            | Self::Validation { message, .. }
            | Self::Unauthorized { message, .. }
            | Self::Forbidden { message, .. }
            | Self::NotFound { message, .. }
            | Self::Server { message, .. }
            | Self::Api { message, .. } => message,
        }
    }

    /// Numeric status classification. Network failures have no HTTP status
    /// and report 0.
    pub fn status(&self) -> u16 {
        match self {
            Self::Network { .. } => 0,
            Self::Timeout { .. } => 408,
            Self::Validation { .. } => 422,
            Self::Unauthorized { .. } => 401,
            Self::Forbidden { .. } => 403,
            Self::NotFound { .. } => 404,
            Self::Server { status, .. } | Self::Api { status, .. } => *status,
        }
    }

    /// Short human title for UI surfaces.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Network { .. } => "Connection problem",
            Self::Timeout { .. } => "Request timed out",
            Self::Validation { .. } => "Validation failed",
            Self::Unauthorized { .. } => "Sign-in required",
            Self::Forbidden { .. } => "Access denied",
            Self::NotFound { .. } => "Not found",
            Self::Server { .. } => "Server error",
            Self::Api { .. } => "Request failed",
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::Network { timestamp, .. }
            | Self::Timeout { timestamp, .. }
            | Self::Validation { timestamp, .. }
            | Self::Unauthorized { timestamp, .. }
            | Self::Forbidden { timestamp, .. }
            | Self::NotFound { timestamp, .. }
            | Self::Server { timestamp, .. }
            | Self::Api { timestamp, .. } => *timestamp,
        }
    }

    /// Whether a retry could plausibly succeed. Only transient failures
    /// qualify; client-side rejections never do.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Network { .. } | Self::Timeout { .. } | Self::Server { .. }
        )
    }

    /// Server-class failures are forwarded to the error monitor.
    pub fn is_server(&self) -> bool {
        matches!(self, Self::Server { .. })
    }
}
