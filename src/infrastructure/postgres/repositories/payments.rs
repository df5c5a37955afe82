use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::{RunQueryDsl, insert_into, prelude::*, update};

use crate::{
    domain::{
        entities::{
            plans::PlanEntity,
            transactions::{InsertTransactionEntity, TransactionEntity},
            user_subscriptions::{InsertUserSubscriptionEntity, UserSubscriptionEntity},
            users::UserEntity,
        },
        repositories::payments::PaymentRepository,
        value_objects::enums::transaction_statuses::TransactionStatus,
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{plans, transactions, user_subscriptions, users},
    },
};

pub struct PaymentPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl PaymentPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl PaymentRepository for PaymentPostgres {
    async fn find_plan(&self, plan_id: i64) -> Result<Option<PlanEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = plans::table
            .find(plan_id)
            .select(PlanEntity::as_select())
            .first::<PlanEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn find_user(&self, user_id: i64) -> Result<Option<UserEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = users::table
            .find(user_id)
            .select(UserEntity::as_select())
            .first::<UserEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn create_user_subscription(
        &self,
        insert_user_subscription_entity: InsertUserSubscriptionEntity,
    ) -> Result<UserSubscriptionEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(user_subscriptions::table)
            .values(&insert_user_subscription_entity)
            .returning(UserSubscriptionEntity::as_returning())
            .get_result::<UserSubscriptionEntity>(&mut conn)?;

        Ok(result)
    }

    async fn create_transaction(
        &self,
        insert_transaction_entity: InsertTransactionEntity,
    ) -> Result<TransactionEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(transactions::table)
            .values(&insert_transaction_entity)
            .returning(TransactionEntity::as_returning())
            .get_result::<TransactionEntity>(&mut conn)?;

        Ok(result)
    }

    async fn complete_transaction(&self, transaction_id: i64) -> Result<TransactionEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = update(transactions::table.find(transaction_id))
            .set((
                transactions::status.eq(TransactionStatus::Completed.to_string()),
                transactions::updated_at.eq(Utc::now()),
            ))
            .returning(TransactionEntity::as_returning())
            .get_result::<TransactionEntity>(&mut conn)?;

        Ok(result)
    }
}
