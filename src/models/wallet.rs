//! Wallet and transaction models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wallet state as returned by `GET /wallet/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wallet {
    pub id: i64,
    /// Decimal balance serialized as a string by the backend.
    pub balance: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Up to five most recent transactions, newest first.
    #[serde(default)]
    pub recent_transactions: Vec<Transaction>,
}

/// One wallet ledger entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub amount: String,
    /// CREDIT or DEBIT
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub reason: Option<String>,
    /// Appointment this entry paid for or refunded, if any.
    #[serde(default)]
    pub appointment: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}
