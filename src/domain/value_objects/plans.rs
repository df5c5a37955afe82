use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::plans::PlanEntity;
use crate::domain::value_objects::enums::plan_statuses::PlanStatus;

/// Catalog entry for a purchasable plan. Serialized as `subscription` inside
/// the payment success envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanModel {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub period_days: i32,
    pub status: PlanStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertPlanModel {
    pub name: String,
    pub price: f64,
    pub period_days: i32,
    #[serde(default)]
    pub status: PlanStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePlanModel {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub period_days: Option<i32>,
    pub status: Option<PlanStatus>,
}

impl From<PlanEntity> for PlanModel {
    fn from(entity: PlanEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            price: entity.price,
            period_days: entity.period_days,
            status: PlanStatus::from_str(&entity.status).unwrap_or_default(),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
