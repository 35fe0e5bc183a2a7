use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A storefront account as the backend reports it.
///
/// `balance` is in minor currency units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub balance: i64,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user snapshot with a generated ID and current timestamp.
    pub fn new(email: String, username: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            username,
            balance: 0,
            created_at: Utc::now(),
        }
    }
}
