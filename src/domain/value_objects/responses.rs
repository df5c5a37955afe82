use serde::Serialize;

use crate::domain::value_objects::{
    payments::PaymentModel, plans::PlanModel, transactions::TransactionModel,
    user_subscriptions::UserSubscriptionModel,
};

/// Uniform response envelope; every handler answers with this shape.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn success_no_data(message: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
            data: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            status: "fail".to_string(),
            message: message.into(),
            data: None,
        }
    }
}

/// Data section of a successful payment response: the request echo, both
/// created records, the catalog plan and a confirmation naming the recipient.
#[derive(Debug, Serialize)]
pub struct PaymentCompletedModel {
    pub payment: PaymentModel,
    pub user_subscription: UserSubscriptionModel,
    pub transaction: TransactionModel,
    pub subscription: PlanModel,
    pub message: String,
}
