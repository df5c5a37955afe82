use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Lifecycle of one payment attempt. A transaction is created as `Paid`
/// once the purchase records exist and only becomes `Completed` after the
/// receipt was accepted by the delivery endpoint. There is no transition
/// back to `Pending`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Paid,
    Completed,
    Declined,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Paid => "paid",
            TransactionStatus::Completed => "completed",
            TransactionStatus::Declined => "declined",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(TransactionStatus::Pending),
            "paid" => Some(TransactionStatus::Paid),
            "completed" => Some(TransactionStatus::Completed),
            "declined" => Some(TransactionStatus::Declined),
            _ => None,
        }
    }
}

impl Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
