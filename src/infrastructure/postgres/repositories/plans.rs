use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, delete, insert_into, prelude::*, update};

use crate::{
    domain::{
        entities::plans::{InsertPlanEntity, PlanEntity, UpdatePlanEntity},
        repositories::plans::PlanRepository,
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{plans, transactions, user_subscriptions},
    },
};

pub struct PlanPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl PlanPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl PlanRepository for PlanPostgres {
    async fn create(&self, insert_plan_entity: InsertPlanEntity) -> Result<PlanEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(plans::table)
            .values(&insert_plan_entity)
            .returning(PlanEntity::as_returning())
            .get_result::<PlanEntity>(&mut conn)?;

        Ok(result)
    }

    async fn find_by_id(&self, plan_id: i64) -> Result<Option<PlanEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = plans::table
            .find(plan_id)
            .select(PlanEntity::as_select())
            .first::<PlanEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn list(&self) -> Result<Vec<PlanEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = plans::table
            .order(plans::id.asc())
            .select(PlanEntity::as_select())
            .load::<PlanEntity>(&mut conn)?;

        Ok(results)
    }

    async fn update(
        &self,
        plan_id: i64,
        update_plan_entity: UpdatePlanEntity,
    ) -> Result<Option<PlanEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = update(plans::table.find(plan_id))
            .set(&update_plan_entity)
            .returning(PlanEntity::as_returning())
            .get_result::<PlanEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn delete_with_related(&self, plan_id: i64) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            delete(user_subscriptions::table.filter(user_subscriptions::plan_id.eq(plan_id)))
                .execute(conn)?;
            delete(transactions::table.filter(transactions::plan_id.eq(plan_id))).execute(conn)?;
            delete(plans::table.find(plan_id)).execute(conn)?;
            Ok(())
        })?;

        Ok(())
    }
}
