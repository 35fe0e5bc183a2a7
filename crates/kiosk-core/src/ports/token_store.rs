//! Credential storage port.

use async_trait::async_trait;

use crate::domain::{TokenPair, User};

/// Storage key for the credential pair. Contractual: persisted state from
/// earlier client versions is read back under the same key.
pub const TOKENS_STORAGE_KEY: &str = "auth_tokens";

/// Storage key for the cached user snapshot.
pub const USER_STORAGE_KEY: &str = "auth_user";

/// Token store trait - abstraction over credential storage backends.
///
/// Reads never fail: unreadable or corrupt data comes back as `None`.
/// Writes are last-writer-wins; callers are user-initiated actions that
/// cannot overlap within one session.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Read the stored credential pair.
    async fn tokens(&self) -> Option<TokenPair>;

    /// Write or delete the stored pair. `None` clears the entry.
    async fn set_tokens(&self, tokens: Option<TokenPair>) -> Result<(), StoreError>;

    /// Read the cached user snapshot.
    async fn user(&self) -> Option<User>;

    /// Write or delete the cached snapshot. `None` clears the entry.
    async fn set_user(&self, user: Option<User>) -> Result<(), StoreError>;

    /// Delete both entries. Idempotent.
    async fn clear_all(&self) -> Result<(), StoreError>;
}

/// Credential storage errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Storage write failed: {0}")]
    Write(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),
}
