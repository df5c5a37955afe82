use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::domain::{
    entities::plans::{InsertPlanEntity, UpdatePlanEntity},
    repositories::plans::PlanRepository,
    value_objects::plans::{InsertPlanModel, PlanModel, UpdatePlanModel},
};

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Subscription not found")]
    NotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl PlanError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            PlanError::NotFound => StatusCode::NOT_FOUND,
            PlanError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type PlanResult<T> = std::result::Result<T, PlanError>;

/// Admin CRUD over the plan catalog. Read-only to the payment workflow.
pub struct PlanUseCase<T>
where
    T: PlanRepository + Send + Sync + 'static,
{
    plan_repository: Arc<T>,
}

impl<T> PlanUseCase<T>
where
    T: PlanRepository + Send + Sync + 'static,
{
    pub fn new(plan_repository: Arc<T>) -> Self {
        Self { plan_repository }
    }

    pub async fn create(&self, insert_plan_model: InsertPlanModel) -> PlanResult<PlanModel> {
        let plan = self
            .plan_repository
            .create(InsertPlanEntity {
                name: insert_plan_model.name,
                price: insert_plan_model.price,
                period_days: insert_plan_model.period_days,
                status: insert_plan_model.status.to_string(),
            })
            .await
            .map_err(|err| {
                error!(db_error = ?err, "plans: failed to create plan");
                PlanError::Internal(err)
            })?;

        info!(plan_id = plan.id, "plans: plan created");
        Ok(plan.into())
    }

    pub async fn get(&self, plan_id: i64) -> PlanResult<PlanModel> {
        let plan = self
            .plan_repository
            .find_by_id(plan_id)
            .await
            .map_err(|err| {
                error!(plan_id, db_error = ?err, "plans: failed to load plan");
                PlanError::Internal(err)
            })?
            .ok_or_else(|| {
                warn!(plan_id, "plans: plan not found");
                PlanError::NotFound
            })?;

        Ok(plan.into())
    }

    pub async fn list(&self) -> PlanResult<Vec<PlanModel>> {
        let plans = self.plan_repository.list().await.map_err(|err| {
            error!(db_error = ?err, "plans: failed to list plans");
            PlanError::Internal(err)
        })?;

        Ok(plans.into_iter().map(PlanModel::from).collect())
    }

    pub async fn update(
        &self,
        plan_id: i64,
        update_plan_model: UpdatePlanModel,
    ) -> PlanResult<PlanModel> {
        let plan = self
            .plan_repository
            .update(
                plan_id,
                UpdatePlanEntity {
                    name: update_plan_model.name,
                    price: update_plan_model.price,
                    period_days: update_plan_model.period_days,
                    status: update_plan_model.status.map(|status| status.to_string()),
                    updated_at: Utc::now(),
                },
            )
            .await
            .map_err(|err| {
                error!(plan_id, db_error = ?err, "plans: failed to update plan");
                PlanError::Internal(err)
            })?
            .ok_or_else(|| {
                warn!(plan_id, "plans: plan not found for update");
                PlanError::NotFound
            })?;

        info!(plan_id, "plans: plan updated");
        Ok(plan.into())
    }

    pub async fn delete(&self, plan_id: i64) -> PlanResult<()> {
        self.plan_repository
            .delete_with_related(plan_id)
            .await
            .map_err(|err| {
                error!(plan_id, db_error = ?err, "plans: failed to delete plan");
                PlanError::Internal(err)
            })?;

        info!(plan_id, "plans: plan and related records deleted");
        Ok(())
    }
}
