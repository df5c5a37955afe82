use std::sync::Arc;

use anyhow::Result;
use axum::{
    Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post,
};

use crate::{
    application::usecases::payments::PaymentUseCase,
    config::config_model::DotEnvyConfig,
    domain::{
        repositories::{
            payments::PaymentRepository, receipt_delivery::ReceiptDelivery,
            receipts::ReceiptRenderer,
        },
        value_objects::{payments::PaymentModel, responses::ApiResponse},
    },
    infrastructure::{
        email::email_delivery::EmailHttpDelivery,
        postgres::{postgres_connection::PgPoolSquad, repositories::payments::PaymentPostgres},
        receipts::pdf_receipt::PdfReceiptRenderer,
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>, config: Arc<DotEnvyConfig>) -> Result<Router> {
    let payment_repository = PaymentPostgres::new(Arc::clone(&db_pool));
    let receipt_renderer = PdfReceiptRenderer::new();
    let receipt_delivery = EmailHttpDelivery::new(config.email.service_url.clone())?;
    let payment_usecase = PaymentUseCase::new(
        Arc::new(payment_repository),
        Arc::new(receipt_renderer),
        Arc::new(receipt_delivery),
        config.receipt.issuer.clone(),
    );

    Ok(Router::new()
        .route(
            "/payment",
            post(pay_subscription::<PaymentPostgres, PdfReceiptRenderer, EmailHttpDelivery>),
        )
        .with_state(Arc::new(payment_usecase)))
}

pub async fn pay_subscription<T, R, D>(
    State(payment_usecase): State<Arc<PaymentUseCase<T, R, D>>>,
    Json(payment): Json<PaymentModel>,
) -> impl IntoResponse
where
    T: PaymentRepository + Send + Sync + 'static,
    R: ReceiptRenderer + Send + Sync + 'static,
    D: ReceiptDelivery + Send + Sync + 'static,
{
    match payment_usecase.pay(payment).await {
        Ok(completed) => (
            StatusCode::OK,
            Json(ApiResponse::success("Payment successful", completed)),
        )
            .into_response(),
        Err(err) => (
            err.status_code(),
            Json(ApiResponse::<()>::fail(err.to_string())),
        )
            .into_response(),
    }
}
