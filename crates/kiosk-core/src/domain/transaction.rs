use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Deposit,
    Purchase,
    Refund,
    #[serde(other)]
    Other,
}

impl TransactionKind {
    /// The wire name used in query parameters.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Purchase => "purchase",
            Self::Refund => "refund",
            Self::Other => "other",
        }
    }
}

/// A balance movement on the account ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Uuid,
    /// Signed amount in minor currency units; deposits positive.
    pub amount: i64,
    pub kind: TransactionKind,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
}
