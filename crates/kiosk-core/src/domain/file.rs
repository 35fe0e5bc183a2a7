use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A file attached to a purchased tool or support ticket.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    pub id: Uuid,
    pub name: String,
    pub size_bytes: u64,
    pub content_type: String,
    pub created_at: DateTime<Utc>,
}
