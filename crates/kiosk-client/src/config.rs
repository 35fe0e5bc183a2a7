//! Client configuration and the contractual endpoint path templates.

use std::env;
use std::time::Duration;

use crate::retry::RetryPolicy;

/// Configuration of the request pipeline.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL prefixed onto relative request paths.
    pub base_url: String,
    /// Transport-level request timeout.
    pub timeout: Duration,
    pub retry: RetryPolicy,
    /// Emit a structured log record for every classified error.
    pub log_errors: bool,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout: Duration::from_secs(30),
            retry: RetryPolicy::default(),
            log_errors: true,
            user_agent: concat!("kiosk-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env::var("KIOSK_API_URL").unwrap_or(defaults.base_url),
            timeout: env::var("KIOSK_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            retry: RetryPolicy {
                max_retries: env::var("KIOSK_MAX_RETRIES")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.retry.max_retries),
                ..defaults.retry
            },
            log_errors: env::var("KIOSK_LOG_ERRORS")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(defaults.log_errors),
            user_agent: defaults.user_agent,
        }
    }
}

/// Per-resource path templates.
///
/// Contractual with the backend server; changing one breaks the deployment.
pub mod paths {
    pub const AUTH_REGISTER: &str = "/api/auth/register";
    pub const AUTH_LOGIN: &str = "/api/auth/login";
    pub const AUTH_LOGOUT: &str = "/api/auth/logout";
    pub const AUTH_REFRESH: &str = "/api/auth/refresh";
    pub const AUTH_ME: &str = "/api/auth/me";

    pub const USERS: &str = "/api/users";
    pub const TOOLS: &str = "/api/tools";
    pub const FILES: &str = "/api/files";
    pub const TRANSACTIONS: &str = "/api/transactions";
    pub const PROXY: &str = "/api/proxy";
    pub const ORDERS: &str = "/api/orders";
    pub const VPS: &str = "/api/vps";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_usable() {
        let config = ClientConfig::default();
        assert!(config.base_url.starts_with("http"));
        assert!(config.log_errors);
        assert!(config.user_agent.starts_with("kiosk-client/"));
    }
}
