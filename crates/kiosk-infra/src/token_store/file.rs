//! File-backed token store - one JSON document per storage key.
//!
//! The credential pair lives under `auth_tokens.json` and the user
//! snapshot under `auth_user.json` inside the configured directory, so
//! persisted sessions survive client upgrades.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use kiosk_core::domain::{TokenPair, User};
use kiosk_core::ports::{StoreError, TokenStore, TOKENS_STORAGE_KEY, USER_STORAGE_KEY};

/// Credential store backed by per-key JSON files.
pub struct FileTokenStore {
    dir: PathBuf,
}

impl FileTokenStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    async fn read_entry<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let bytes = tokio::fs::read(self.entry_path(key)).await.ok()?;
        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(error) => {
                // Corrupt entries read as absent rather than failing the caller.
                tracing::warn!(key, %error, "unreadable token store entry");
                None
            }
        }
    }

    async fn write_entry<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| StoreError::Write(e.to_string()))?;
        let bytes =
            serde_json::to_vec(value).map_err(|e| StoreError::Serialization(e.to_string()))?;
        tokio::fs::write(self.entry_path(key), bytes)
            .await
            .map_err(|e| StoreError::Write(e.to_string()))
    }

    async fn delete_entry(&self, key: &str) -> Result<(), StoreError> {
        match tokio::fs::remove_file(self.entry_path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Write(e.to_string())),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn tokens(&self) -> Option<TokenPair> {
        self.read_entry(TOKENS_STORAGE_KEY).await
    }

    async fn set_tokens(&self, tokens: Option<TokenPair>) -> Result<(), StoreError> {
        match tokens {
            Some(pair) => self.write_entry(TOKENS_STORAGE_KEY, &pair).await,
            None => self.delete_entry(TOKENS_STORAGE_KEY).await,
        }
    }

    async fn user(&self) -> Option<User> {
        self.read_entry(USER_STORAGE_KEY).await
    }

    async fn set_user(&self, user: Option<User>) -> Result<(), StoreError> {
        match user {
            Some(user) => self.write_entry(USER_STORAGE_KEY, &user).await,
            None => self.delete_entry(USER_STORAGE_KEY).await,
        }
    }

    async fn clear_all(&self) -> Result<(), StoreError> {
        self.delete_entry(TOKENS_STORAGE_KEY).await?;
        self.delete_entry(USER_STORAGE_KEY).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn pair() -> TokenPair {
        TokenPair::new("access-1".into(), "refresh-1".into()).with_expiry(Utc::now())
    }

    #[tokio::test]
    async fn test_round_trip_deep_equal() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path());

        store.set_tokens(Some(pair())).await.unwrap();
        assert_eq!(store.tokens().await, Some(pair()));

        let user = User::new("a@b.c".into(), "alice".into());
        store.set_user(Some(user.clone())).await.unwrap();
        assert_eq!(store.user().await, Some(user));
    }

    #[tokio::test]
    async fn test_set_none_clears_the_entry() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path());

        store.set_tokens(Some(pair())).await.unwrap();
        store.set_tokens(None).await.unwrap();
        assert_eq!(store.tokens().await, None);
        assert!(!store.dir().join("auth_tokens.json").exists());
    }

    #[tokio::test]
    async fn test_corrupt_entry_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path());

        tokio::fs::write(dir.path().join("auth_tokens.json"), b"not json")
            .await
            .unwrap();
        assert_eq!(store.tokens().await, None);
    }

    #[tokio::test]
    async fn test_clear_all_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path());

        store.set_tokens(Some(pair())).await.unwrap();
        store
            .set_user(Some(User::new("a@b.c".into(), "alice".into())))
            .await
            .unwrap();

        store.clear_all().await.unwrap();
        // Second clear sees no entries and still succeeds.
        store.clear_all().await.unwrap();
        assert_eq!(store.tokens().await, None);
        assert_eq!(store.user().await, None);
    }
}
