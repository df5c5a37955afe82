use anyhow::anyhow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::transactions::TransactionEntity;
use crate::domain::value_objects::enums::transaction_statuses::TransactionStatus;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionModel {
    pub id: i64,
    pub subscription_id: i64,
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<TransactionEntity> for TransactionModel {
    type Error = anyhow::Error;

    fn try_from(entity: TransactionEntity) -> Result<Self, Self::Error> {
        let status = TransactionStatus::from_str(&entity.status).ok_or_else(|| {
            anyhow!(
                "transaction {} has unrecognized status {:?}",
                entity.id,
                entity.status
            )
        })?;

        Ok(Self {
            id: entity.id,
            subscription_id: entity.plan_id,
            status,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }
}
