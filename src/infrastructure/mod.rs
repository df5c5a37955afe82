pub mod axum_http;
pub mod email;
pub mod postgres;
pub mod receipts;
