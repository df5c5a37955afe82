use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::user_subscriptions::UserSubscriptionEntity;

/// A grant of access for one user over a time window, created once per
/// successful purchase attempt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserSubscriptionModel {
    pub id: i64,
    pub user_id: i64,
    pub subscription_id: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserSubscriptionEntity> for UserSubscriptionModel {
    fn from(entity: UserSubscriptionEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            subscription_id: entity.plan_id,
            start_date: entity.starts_at,
            end_date: entity.ends_at,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
