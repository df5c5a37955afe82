use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};

use crate::{
    application::usecases::plans::PlanUseCase,
    domain::{
        repositories::plans::PlanRepository,
        value_objects::{
            plans::{InsertPlanModel, UpdatePlanModel},
            responses::ApiResponse,
        },
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad, repositories::plans::PlanPostgres,
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let plan_repository = PlanPostgres::new(Arc::clone(&db_pool));
    let plan_usecase = PlanUseCase::new(Arc::new(plan_repository));

    Router::new()
        .route("/", post(create_plan::<PlanPostgres>))
        .route("/", get(list_plans::<PlanPostgres>))
        .route("/:id", get(get_plan::<PlanPostgres>))
        .route("/:id", put(update_plan::<PlanPostgres>))
        .route("/:id", delete(delete_plan::<PlanPostgres>))
        .with_state(Arc::new(plan_usecase))
}

pub async fn create_plan<T>(
    State(plan_usecase): State<Arc<PlanUseCase<T>>>,
    Json(insert_plan_model): Json<InsertPlanModel>,
) -> impl IntoResponse
where
    T: PlanRepository + Send + Sync + 'static,
{
    match plan_usecase.create(insert_plan_model).await {
        Ok(plan) => (
            StatusCode::CREATED,
            Json(ApiResponse::success("Subscription created successfully", plan)),
        )
            .into_response(),
        Err(err) => (
            err.status_code(),
            Json(ApiResponse::<()>::fail(err.to_string())),
        )
            .into_response(),
    }
}

pub async fn list_plans<T>(
    State(plan_usecase): State<Arc<PlanUseCase<T>>>,
) -> impl IntoResponse
where
    T: PlanRepository + Send + Sync + 'static,
{
    match plan_usecase.list().await {
        Ok(plans) => (
            StatusCode::OK,
            Json(ApiResponse::success("Subscriptions retrieved successfully", plans)),
        )
            .into_response(),
        Err(err) => (
            err.status_code(),
            Json(ApiResponse::<()>::fail(err.to_string())),
        )
            .into_response(),
    }
}

pub async fn get_plan<T>(
    State(plan_usecase): State<Arc<PlanUseCase<T>>>,
    Path(id): Path<i64>,
) -> impl IntoResponse
where
    T: PlanRepository + Send + Sync + 'static,
{
    match plan_usecase.get(id).await {
        Ok(plan) => (
            StatusCode::OK,
            Json(ApiResponse::success("Subscription retrieved successfully", plan)),
        )
            .into_response(),
        Err(err) => (
            err.status_code(),
            Json(ApiResponse::<()>::fail(err.to_string())),
        )
            .into_response(),
    }
}

pub async fn update_plan<T>(
    State(plan_usecase): State<Arc<PlanUseCase<T>>>,
    Path(id): Path<i64>,
    Json(update_plan_model): Json<UpdatePlanModel>,
) -> impl IntoResponse
where
    T: PlanRepository + Send + Sync + 'static,
{
    match plan_usecase.update(id, update_plan_model).await {
        Ok(plan) => (
            StatusCode::OK,
            Json(ApiResponse::success("Subscription updated successfully", plan)),
        )
            .into_response(),
        Err(err) => (
            err.status_code(),
            Json(ApiResponse::<()>::fail(err.to_string())),
        )
            .into_response(),
    }
}

pub async fn delete_plan<T>(
    State(plan_usecase): State<Arc<PlanUseCase<T>>>,
    Path(id): Path<i64>,
) -> impl IntoResponse
where
    T: PlanRepository + Send + Sync + 'static,
{
    match plan_usecase.delete(id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::<()>::success_no_data(
                "Subscription and related data deleted successfully",
            )),
        )
            .into_response(),
        Err(err) => (
            err.status_code(),
            Json(ApiResponse::<()>::fail(err.to_string())),
        )
            .into_response(),
    }
}
