//! No-op token store for hosts without persistent storage.

use async_trait::async_trait;

use kiosk_core::domain::{TokenPair, User};
use kiosk_core::ports::{StoreError, TokenStore};

/// Accepts every write and remembers nothing. Reads always return `None`,
/// so authorized requests simply go out without a bearer header.
pub struct NullTokenStore;

#[async_trait]
impl TokenStore for NullTokenStore {
    async fn tokens(&self) -> Option<TokenPair> {
        None
    }

    async fn set_tokens(&self, _tokens: Option<TokenPair>) -> Result<(), StoreError> {
        tracing::debug!("token store disabled - dropping credential write");
        Ok(())
    }

    async fn user(&self) -> Option<User> {
        None
    }

    async fn set_user(&self, _user: Option<User>) -> Result<(), StoreError> {
        Ok(())
    }

    async fn clear_all(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
