//! Data Transfer Objects - request payloads sent to the API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to register a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request to rotate the credential pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Request to change the account password.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Partial profile update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Request to top up the account balance, in minor currency units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepositRequest {
    pub amount: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

/// Request to purchase a catalog item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub item_id: Uuid,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon: Option<String>,
}

/// Request to provision a VPS from a plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVpsRequest {
    pub plan_id: Uuid,
    pub region: String,
    pub period_months: u32,
}

/// Request to purchase a proxy package.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProxyOrderRequest {
    pub plan_id: Uuid,
    pub period_months: u32,
}
