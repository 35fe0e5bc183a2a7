//! In-memory token store - used in tests and short-lived processes.

use async_trait::async_trait;
use tokio::sync::RwLock;

use kiosk_core::domain::{TokenPair, User};
use kiosk_core::ports::{StoreError, TokenStore};

#[derive(Default)]
struct StoredState {
    tokens: Option<TokenPair>,
    user: Option<User>,
}

/// Credential store backed by process memory.
///
/// Note: contents are lost on process exit.
#[derive(Default)]
pub struct InMemoryTokenStore {
    state: RwLock<StoredState>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn tokens(&self) -> Option<TokenPair> {
        self.state.read().await.tokens.clone()
    }

    async fn set_tokens(&self, tokens: Option<TokenPair>) -> Result<(), StoreError> {
        self.state.write().await.tokens = tokens;
        Ok(())
    }

    async fn user(&self) -> Option<User> {
        self.state.read().await.user.clone()
    }

    async fn set_user(&self, user: Option<User>) -> Result<(), StoreError> {
        self.state.write().await.user = user;
        Ok(())
    }

    async fn clear_all(&self) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        state.tokens = None;
        state.user = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> TokenPair {
        TokenPair::new("access".into(), "refresh".into())
    }

    #[tokio::test]
    async fn test_round_trip() {
        let store = InMemoryTokenStore::new();
        store.set_tokens(Some(pair())).await.unwrap();
        assert_eq!(store.tokens().await, Some(pair()));

        store.set_tokens(None).await.unwrap();
        assert_eq!(store.tokens().await, None);
    }

    #[tokio::test]
    async fn test_clear_all_is_idempotent() {
        let store = InMemoryTokenStore::new();
        store.set_tokens(Some(pair())).await.unwrap();
        store
            .set_user(Some(User::new("a@b.c".into(), "a".into())))
            .await
            .unwrap();

        store.clear_all().await.unwrap();
        store.clear_all().await.unwrap();
        assert_eq!(store.tokens().await, None);
        assert_eq!(store.user().await, None);
    }
}
