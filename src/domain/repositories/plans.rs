use anyhow::Result;
use async_trait::async_trait;

use crate::domain::entities::plans::{InsertPlanEntity, PlanEntity, UpdatePlanEntity};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlanRepository: Send + Sync {
    async fn create(&self, insert_plan_entity: InsertPlanEntity) -> Result<PlanEntity>;

    async fn find_by_id(&self, plan_id: i64) -> Result<Option<PlanEntity>>;

    async fn list(&self) -> Result<Vec<PlanEntity>>;

    async fn update(
        &self,
        plan_id: i64,
        update_plan_entity: UpdatePlanEntity,
    ) -> Result<Option<PlanEntity>>;

    /// Removes the plan together with its dependent user subscriptions and
    /// transactions in one database transaction.
    async fn delete_with_related(&self, plan_id: i64) -> Result<()>;
}
