//! Account and session operations.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use kiosk_core::ApiError;
use kiosk_core::domain::{TokenPair, User};
use kiosk_core::ports::TokenStore;
use kiosk_shared::Envelope;
use kiosk_shared::dto::{LoginRequest, RefreshRequest, RegisterRequest};

use super::require_data;
use crate::config::paths;
use crate::executor::Executor;
use crate::request::ApiRequest;

/// Payload returned by login and register.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: User,
    pub tokens: TokenPair,
}

pub struct AuthService {
    executor: Arc<Executor>,
    store: Arc<dyn TokenStore>,
}

impl AuthService {
    pub fn new(executor: Arc<Executor>, store: Arc<dyn TokenStore>) -> Self {
        Self { executor, store }
    }

    /// POST /api/auth/register
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthSession, ApiError> {
        let api_request = ApiRequest::post(paths::AUTH_REGISTER)
            .context("auth.register")
            .no_auth()
            .json(request)?;
        let envelope: Envelope<AuthSession> = self.executor.execute(api_request).await?;
        let session = require_data(envelope)?;
        self.persist(&session).await;
        Ok(session)
    }

    /// POST /api/auth/login
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthSession, ApiError> {
        let api_request = ApiRequest::post(paths::AUTH_LOGIN)
            .context("auth.login")
            .no_auth()
            .json(request)?;
        let envelope: Envelope<AuthSession> = self.executor.execute(api_request).await?;
        let session = require_data(envelope)?;
        self.persist(&session).await;
        Ok(session)
    }

    /// POST /api/auth/logout
    ///
    /// Local credentials are cleared even when the server call fails; the
    /// error is still propagated so callers can surface it.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let result = self
            .executor
            .execute::<serde_json::Value>(ApiRequest::post(paths::AUTH_LOGOUT).context("auth.logout"))
            .await;

        if let Err(error) = self.store.clear_all().await {
            tracing::warn!(%error, "failed to clear stored credentials");
        }

        result.map(|_| ())
    }

    /// POST /api/auth/refresh - rotate the credential pair.
    pub async fn refresh(&self) -> Result<TokenPair, ApiError> {
        let Some(pair) = self.store.tokens().await else {
            return Err(ApiError::unauthorized("No stored session to refresh"));
        };

        let api_request = ApiRequest::post(paths::AUTH_REFRESH)
            .context("auth.refresh")
            .no_auth()
            .json(&RefreshRequest {
                refresh_token: pair.refresh_token,
            })?;
        let envelope: Envelope<TokenPair> = self.executor.execute(api_request).await?;
        let fresh = require_data(envelope)?;

        if let Err(error) = self.store.set_tokens(Some(fresh.clone())).await {
            tracing::warn!(%error, "failed to persist rotated credentials");
        }
        Ok(fresh)
    }

    /// GET /api/auth/me - fetch the profile and refresh the cached snapshot.
    pub async fn me(&self) -> Result<User, ApiError> {
        let envelope: Envelope<User> = self
            .executor
            .execute(ApiRequest::get(paths::AUTH_ME).context("auth.me"))
            .await?;
        let user = require_data(envelope)?;

        if let Err(error) = self.store.set_user(Some(user.clone())).await {
            tracing::warn!(%error, "failed to cache user snapshot");
        }
        Ok(user)
    }

    /// The cached snapshot, without a network round trip.
    pub async fn cached_user(&self) -> Option<User> {
        self.store.user().await
    }

    async fn persist(&self, session: &AuthSession) {
        if let Err(error) = self.store.set_tokens(Some(session.tokens.clone())).await {
            tracing::warn!(%error, "failed to persist credential pair");
        }
        if let Err(error) = self.store.set_user(Some(session.user.clone())).await {
            tracing::warn!(%error, "failed to persist user snapshot");
        }
    }
}
