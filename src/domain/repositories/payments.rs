use anyhow::Result;
use async_trait::async_trait;

use crate::domain::entities::{
    plans::PlanEntity,
    transactions::{InsertTransactionEntity, TransactionEntity},
    user_subscriptions::{InsertUserSubscriptionEntity, UserSubscriptionEntity},
    users::UserEntity,
};

/// Persistence seam of the payment workflow: plan/user lookups, the two
/// purchase-record creates, and the completion update. Each call is a single
/// independent statement; the workflow itself provides no atomicity across
/// them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn find_plan(&self, plan_id: i64) -> Result<Option<PlanEntity>>;

    async fn find_user(&self, user_id: i64) -> Result<Option<UserEntity>>;

    async fn create_user_subscription(
        &self,
        insert_user_subscription_entity: InsertUserSubscriptionEntity,
    ) -> Result<UserSubscriptionEntity>;

    async fn create_transaction(
        &self,
        insert_transaction_entity: InsertTransactionEntity,
    ) -> Result<TransactionEntity>;

    async fn complete_transaction(&self, transaction_id: i64) -> Result<TransactionEntity>;
}
