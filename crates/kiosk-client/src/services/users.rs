//! Profile operations.

use std::sync::Arc;

use kiosk_core::ApiError;
use kiosk_core::domain::User;
use kiosk_shared::Envelope;
use kiosk_shared::dto::{ChangePasswordRequest, UpdateProfileRequest};

use super::require_data;
use crate::config::paths;
use crate::executor::Executor;
use crate::request::ApiRequest;

pub struct UsersService {
    executor: Arc<Executor>,
}

impl UsersService {
    pub fn new(executor: Arc<Executor>) -> Self {
        Self { executor }
    }

    /// PUT /api/users/me
    pub async fn update_profile(&self, request: &UpdateProfileRequest) -> Result<User, ApiError> {
        let api_request = ApiRequest::put(format!("{}/me", paths::USERS))
            .context("users.update_profile")
            .json(request)?;
        let envelope: Envelope<User> = self.executor.execute(api_request).await?;
        require_data(envelope)
    }

    /// POST /api/users/password
    pub async fn change_password(&self, request: &ChangePasswordRequest) -> Result<(), ApiError> {
        let api_request = ApiRequest::post(format!("{}/password", paths::USERS))
            .context("users.change_password")
            .json(request)?;
        self.executor
            .execute::<serde_json::Value>(api_request)
            .await?;
        Ok(())
    }
}
