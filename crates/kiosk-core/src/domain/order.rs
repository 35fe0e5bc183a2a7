use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle of a purchase as the backend reports it.
///
/// `Unknown` absorbs states the backend adds without notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Setup,
    Active,
    Completed,
    Failed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

/// A purchase record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub code: String,
    pub total_price: i64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// The payload returned by order/VPS provisioning endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    pub code: String,
    pub total_price: i64,
    pub status: OrderStatus,
}
