use std::sync::Arc;

use anyhow::Context;
use chrono::{Duration, Utc};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::domain::{
    entities::{
        transactions::InsertTransactionEntity, user_subscriptions::InsertUserSubscriptionEntity,
    },
    repositories::{
        payments::PaymentRepository,
        receipt_delivery::{DeliveryError, ReceiptDelivery},
        receipts::ReceiptRenderer,
    },
    value_objects::{
        enums::transaction_statuses::TransactionStatus,
        payments::{CardValidationError, PaymentModel},
        receipts::{ReceiptModel, mask_card},
        responses::PaymentCompletedModel,
        transactions::TransactionModel,
    },
};

const RECEIPT_QUANTITY: u32 = 1;

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("Invalid payment details")]
    InvalidDetails,
    #[error("Invalid expiration date format")]
    InvalidExpirationFormat,
    #[error("Payment rejected: Card expired")]
    CardExpired,
    #[error("Subscription plan not found")]
    PlanNotFound,
    #[error("User not found")]
    UserNotFound,
    #[error("Error generating PDF receipt")]
    ReceiptRendering(#[source] anyhow::Error),
    #[error("Error preparing email data")]
    DeliveryPayload(#[source] anyhow::Error),
    #[error("Error sending email receipt")]
    DeliveryTransport(#[source] anyhow::Error),
    #[error("Error sending email receipt")]
    DeliveryRejected(u16),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl PaymentError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            PaymentError::InvalidDetails | PaymentError::InvalidExpirationFormat => {
                StatusCode::BAD_REQUEST
            }
            PaymentError::CardExpired => StatusCode::PAYMENT_REQUIRED,
            PaymentError::PlanNotFound => StatusCode::NOT_FOUND,
            PaymentError::UserNotFound
            | PaymentError::ReceiptRendering(_)
            | PaymentError::DeliveryPayload(_)
            | PaymentError::DeliveryTransport(_)
            | PaymentError::DeliveryRejected(_)
            | PaymentError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CardValidationError> for PaymentError {
    fn from(err: CardValidationError) -> Self {
        match err {
            CardValidationError::MissingDetails => PaymentError::InvalidDetails,
            CardValidationError::MalformedExpiration => PaymentError::InvalidExpirationFormat,
            CardValidationError::Expired => PaymentError::CardExpired,
        }
    }
}

impl From<DeliveryError> for PaymentError {
    fn from(err: DeliveryError) -> Self {
        match err {
            DeliveryError::Payload(source) => PaymentError::DeliveryPayload(source),
            DeliveryError::Transport(source) => PaymentError::DeliveryTransport(source),
            DeliveryError::Rejected(status) => PaymentError::DeliveryRejected(status),
        }
    }
}

pub type PaymentResult<T> = std::result::Result<T, PaymentError>;

/// Orchestrates one purchase attempt: validate the card, record the
/// purchase, render the receipt, hand it to the delivery endpoint and
/// complete the transaction. The two creates are the commit point; nothing
/// after them is rolled back on failure, so a transaction left in `paid`
/// means the receipt never went out.
pub struct PaymentUseCase<T, R, D>
where
    T: PaymentRepository + Send + Sync + 'static,
    R: ReceiptRenderer + Send + Sync + 'static,
    D: ReceiptDelivery + Send + Sync + 'static,
{
    payment_repository: Arc<T>,
    receipt_renderer: Arc<R>,
    receipt_delivery: Arc<D>,
    issuer: String,
}

impl<T, R, D> PaymentUseCase<T, R, D>
where
    T: PaymentRepository + Send + Sync + 'static,
    R: ReceiptRenderer + Send + Sync + 'static,
    D: ReceiptDelivery + Send + Sync + 'static,
{
    pub fn new(
        payment_repository: Arc<T>,
        receipt_renderer: Arc<R>,
        receipt_delivery: Arc<D>,
        issuer: String,
    ) -> Self {
        Self {
            payment_repository,
            receipt_renderer,
            receipt_delivery,
            issuer,
        }
    }

    pub async fn pay(&self, payment: PaymentModel) -> PaymentResult<PaymentCompletedModel> {
        info!(
            user_id = payment.user_id,
            subscription_id = payment.subscription_id,
            "payments: payment attempt received"
        );

        payment.payment_form.validate(Utc::now()).map_err(|err| {
            warn!(
                user_id = payment.user_id,
                error = %err,
                "payments: card validation failed"
            );
            PaymentError::from(err)
        })?;

        let plan = self
            .payment_repository
            .find_plan(payment.subscription_id)
            .await
            .map_err(|err| {
                error!(
                    subscription_id = payment.subscription_id,
                    db_error = ?err,
                    "payments: failed to load plan"
                );
                PaymentError::Internal(err)
            })?
            .ok_or_else(|| {
                warn!(
                    subscription_id = payment.subscription_id,
                    "payments: plan not found"
                );
                PaymentError::PlanNotFound
            })?;

        let starts_at = Utc::now();
        let ends_at = starts_at
            .checked_add_signed(Duration::days(plan.period_days.into()))
            .context("failed to compute subscription end date")?;

        // Commit point: once these two rows exist the purchase stands, even
        // if a later step fails.
        let user_subscription = self
            .payment_repository
            .create_user_subscription(InsertUserSubscriptionEntity {
                user_id: payment.user_id,
                plan_id: plan.id,
                starts_at,
                ends_at,
            })
            .await
            .map_err(|err| {
                error!(
                    user_id = payment.user_id,
                    plan_id = plan.id,
                    db_error = ?err,
                    "payments: failed to create user subscription"
                );
                PaymentError::Internal(err)
            })?;

        let transaction = self
            .payment_repository
            .create_transaction(InsertTransactionEntity {
                plan_id: plan.id,
                status: TransactionStatus::Paid.to_string(),
            })
            .await
            .map_err(|err| {
                error!(
                    plan_id = plan.id,
                    db_error = ?err,
                    "payments: failed to create transaction"
                );
                PaymentError::Internal(err)
            })?;

        let user = self
            .payment_repository
            .find_user(payment.user_id)
            .await
            .map_err(|err| {
                error!(
                    user_id = payment.user_id,
                    db_error = ?err,
                    "payments: failed to load user"
                );
                PaymentError::Internal(err)
            })?
            .ok_or_else(|| {
                // The purchase records already exist at this point and stay.
                error!(
                    user_id = payment.user_id,
                    transaction_id = transaction.id,
                    "payments: user not found after purchase records were created"
                );
                PaymentError::UserNotFound
            })?;

        let receipt = ReceiptModel {
            issuer: self.issuer.clone(),
            transaction_id: transaction.id,
            ordered_at: Utc::now(),
            item_name: plan.name.clone(),
            unit_price: plan.price,
            quantity: RECEIPT_QUANTITY,
            client_name: user.name.clone(),
            payment_method: mask_card(&payment.payment_form.card_number),
        };

        let receipt_pdf = self.receipt_renderer.render(&receipt).map_err(|err| {
            error!(
                transaction_id = transaction.id,
                error = ?err,
                "payments: receipt rendering failed"
            );
            PaymentError::ReceiptRendering(err)
        })?;

        let subject = format!("Payment Receipt - {}", self.issuer);
        let body = format!(
            "Dear {},\n\nPlease find attached your payment receipt.\n\nThank you for your purchase.",
            user.name
        );

        self.receipt_delivery
            .deliver(&user.email, &subject, &body, receipt_pdf)
            .await
            .map_err(|err| {
                error!(
                    transaction_id = transaction.id,
                    recipient = %user.email,
                    error = ?err,
                    "payments: receipt delivery failed, transaction stays paid"
                );
                PaymentError::from(err)
            })?;

        let transaction = self
            .payment_repository
            .complete_transaction(transaction.id)
            .await
            .map_err(|err| {
                error!(
                    transaction_id = transaction.id,
                    db_error = ?err,
                    "payments: failed to complete transaction"
                );
                PaymentError::Internal(err)
            })?;

        info!(
            user_id = payment.user_id,
            transaction_id = transaction.id,
            recipient = %user.email,
            "payments: payment completed"
        );

        let message = format!(
            "Payment successful. Receipt has been sent to {}",
            user.email
        );

        Ok(PaymentCompletedModel {
            payment,
            user_subscription: user_subscription.into(),
            transaction: TransactionModel::try_from(transaction).map_err(PaymentError::Internal)?,
            subscription: plan.into(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use chrono::{DateTime, Utc};
    use mockall::predicate::eq;

    use crate::domain::{
        entities::{
            plans::PlanEntity, transactions::TransactionEntity,
            user_subscriptions::UserSubscriptionEntity, users::UserEntity,
        },
        repositories::{
            payments::MockPaymentRepository, receipt_delivery::MockReceiptDelivery,
            receipts::MockReceiptRenderer,
        },
        value_objects::payments::PaymentForm,
    };

    fn valid_payment() -> PaymentModel {
        PaymentModel {
            user_id: 1,
            subscription_id: 5,
            payment_form: PaymentForm {
                card_number: "4111111111111111".to_string(),
                expiration_date: "01/2099".to_string(),
                cvv: "123".to_string(),
            },
        }
    }

    fn sample_plan() -> PlanEntity {
        let now = Utc::now();
        PlanEntity {
            id: 5,
            name: "Premium Subscription".to_string(),
            price: 100.0,
            period_days: 30,
            status: "active".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_user() -> UserEntity {
        let now = Utc::now();
        UserEntity {
            id: 1,
            name: "Alice".to_string(),
            email: "a@example.com".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_user_subscription(starts_at: DateTime<Utc>) -> UserSubscriptionEntity {
        UserSubscriptionEntity {
            id: 11,
            user_id: 1,
            plan_id: 5,
            starts_at,
            ends_at: starts_at + Duration::days(30),
            created_at: starts_at,
            updated_at: starts_at,
        }
    }

    fn sample_transaction(status: TransactionStatus) -> TransactionEntity {
        let now = Utc::now();
        TransactionEntity {
            id: 21,
            plan_id: 5,
            status: status.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn usecase(
        repository: MockPaymentRepository,
        renderer: MockReceiptRenderer,
        delivery: MockReceiptDelivery,
    ) -> PaymentUseCase<MockPaymentRepository, MockReceiptRenderer, MockReceiptDelivery> {
        PaymentUseCase::new(
            Arc::new(repository),
            Arc::new(renderer),
            Arc::new(delivery),
            "Example Corp".to_string(),
        )
    }

    #[tokio::test]
    async fn successful_payment_completes_the_transaction() {
        let mut repository = MockPaymentRepository::new();
        let mut renderer = MockReceiptRenderer::new();
        let mut delivery = MockReceiptDelivery::new();

        repository
            .expect_find_plan()
            .with(eq(5))
            .times(1)
            .returning(|_| Ok(Some(sample_plan())));
        repository
            .expect_create_user_subscription()
            .times(1)
            .returning(|insert| Ok(sample_user_subscription(insert.starts_at)));
        repository
            .expect_create_transaction()
            .withf(|insert| insert.status == "paid" && insert.plan_id == 5)
            .times(1)
            .returning(|_| Ok(sample_transaction(TransactionStatus::Paid)));
        repository
            .expect_find_user()
            .with(eq(1))
            .times(1)
            .returning(|_| Ok(Some(sample_user())));
        renderer
            .expect_render()
            .withf(|receipt| {
                receipt.payment_method == "**** **** **** 1111"
                    && receipt.transaction_id == 21
                    && receipt.quantity == 1
            })
            .times(1)
            .returning(|_| Ok(b"%PDF-1.3 receipt".to_vec()));
        delivery
            .expect_deliver()
            .withf(|recipient, subject, _body, receipt| {
                recipient == "a@example.com"
                    && subject == "Payment Receipt - Example Corp"
                    && !receipt.is_empty()
            })
            .times(1)
            .returning(|_, _, _, _| Ok(()));
        repository
            .expect_complete_transaction()
            .with(eq(21))
            .times(1)
            .returning(|_| Ok(sample_transaction(TransactionStatus::Completed)));

        let completed = usecase(repository, renderer, delivery)
            .pay(valid_payment())
            .await
            .unwrap();

        assert_eq!(completed.transaction.status, TransactionStatus::Completed);
        assert_eq!(
            completed.user_subscription.end_date - completed.user_subscription.start_date,
            Duration::days(30)
        );
        assert!(
            completed
                .message
                .contains("Receipt has been sent to a@example.com")
        );
    }

    #[tokio::test]
    async fn resubmitting_an_identical_request_creates_a_second_purchase() {
        let mut repository = MockPaymentRepository::new();
        let mut renderer = MockReceiptRenderer::new();
        let mut delivery = MockReceiptDelivery::new();

        // No dedup across attempts: the same request records a fresh
        // subscription/transaction pair each time.
        repository
            .expect_find_plan()
            .with(eq(5))
            .times(2)
            .returning(|_| Ok(Some(sample_plan())));
        repository
            .expect_create_user_subscription()
            .times(2)
            .returning(|insert| Ok(sample_user_subscription(insert.starts_at)));
        repository
            .expect_create_transaction()
            .times(2)
            .returning(|_| Ok(sample_transaction(TransactionStatus::Paid)));
        repository
            .expect_find_user()
            .times(2)
            .returning(|_| Ok(Some(sample_user())));
        renderer
            .expect_render()
            .times(2)
            .returning(|_| Ok(b"%PDF-1.3 receipt".to_vec()));
        delivery
            .expect_deliver()
            .times(2)
            .returning(|_, _, _, _| Ok(()));
        repository
            .expect_complete_transaction()
            .times(2)
            .returning(|_| Ok(sample_transaction(TransactionStatus::Completed)));

        let payment_usecase = usecase(repository, renderer, delivery);

        let first = payment_usecase.pay(valid_payment()).await.unwrap();
        let second = payment_usecase.pay(valid_payment()).await.unwrap();

        assert_eq!(first.transaction.status, TransactionStatus::Completed);
        assert_eq!(second.transaction.status, TransactionStatus::Completed);
    }

    #[tokio::test]
    async fn expired_card_is_rejected_before_any_write() {
        let mut payment = valid_payment();
        payment.payment_form.expiration_date = "01/2020".to_string();

        // No expectations set: any repository call would panic the test.
        let err = usecase(
            MockPaymentRepository::new(),
            MockReceiptRenderer::new(),
            MockReceiptDelivery::new(),
        )
        .pay(payment)
        .await
        .unwrap_err();

        assert!(matches!(err, PaymentError::CardExpired));
        assert_eq!(err.status_code(), StatusCode::PAYMENT_REQUIRED);
    }

    #[tokio::test]
    async fn malformed_expiration_is_rejected_before_any_write() {
        let mut payment = valid_payment();
        payment.payment_form.expiration_date = "2099/01/01".to_string();

        let err = usecase(
            MockPaymentRepository::new(),
            MockReceiptRenderer::new(),
            MockReceiptDelivery::new(),
        )
        .pay(payment)
        .await
        .unwrap_err();

        assert!(matches!(err, PaymentError::InvalidExpirationFormat));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn empty_card_details_are_rejected_before_any_write() {
        let mut payment = valid_payment();
        payment.payment_form.cvv = String::new();

        let err = usecase(
            MockPaymentRepository::new(),
            MockReceiptRenderer::new(),
            MockReceiptDelivery::new(),
        )
        .pay(payment)
        .await
        .unwrap_err();

        assert!(matches!(err, PaymentError::InvalidDetails));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_plan_is_rejected_before_any_write() {
        let mut repository = MockPaymentRepository::new();
        repository
            .expect_find_plan()
            .with(eq(5))
            .times(1)
            .returning(|_| Ok(None));
        repository.expect_create_user_subscription().never();
        repository.expect_create_transaction().never();

        let err = usecase(
            repository,
            MockReceiptRenderer::new(),
            MockReceiptDelivery::new(),
        )
        .pay(valid_payment())
        .await
        .unwrap_err();

        assert!(matches!(err, PaymentError::PlanNotFound));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn missing_user_fails_after_the_commit_point() {
        let mut repository = MockPaymentRepository::new();
        repository
            .expect_find_plan()
            .returning(|_| Ok(Some(sample_plan())));
        repository
            .expect_create_user_subscription()
            .times(1)
            .returning(|insert| Ok(sample_user_subscription(insert.starts_at)));
        repository
            .expect_create_transaction()
            .times(1)
            .returning(|_| Ok(sample_transaction(TransactionStatus::Paid)));
        repository.expect_find_user().returning(|_| Ok(None));
        repository.expect_complete_transaction().never();

        let err = usecase(
            repository,
            MockReceiptRenderer::new(),
            MockReceiptDelivery::new(),
        )
        .pay(valid_payment())
        .await
        .unwrap_err();

        assert!(matches!(err, PaymentError::UserNotFound));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn rendering_failure_leaves_the_transaction_paid() {
        let mut repository = MockPaymentRepository::new();
        let mut renderer = MockReceiptRenderer::new();

        repository
            .expect_find_plan()
            .returning(|_| Ok(Some(sample_plan())));
        repository
            .expect_create_user_subscription()
            .returning(|insert| Ok(sample_user_subscription(insert.starts_at)));
        repository
            .expect_create_transaction()
            .returning(|_| Ok(sample_transaction(TransactionStatus::Paid)));
        repository
            .expect_find_user()
            .returning(|_| Ok(Some(sample_user())));
        repository.expect_complete_transaction().never();
        renderer
            .expect_render()
            .returning(|_| Err(anyhow::anyhow!("document buffer failed")));

        let err = usecase(repository, renderer, MockReceiptDelivery::new())
            .pay(valid_payment())
            .await
            .unwrap_err();

        assert!(matches!(err, PaymentError::ReceiptRendering(_)));
        assert_eq!(err.to_string(), "Error generating PDF receipt");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn rejected_delivery_leaves_the_transaction_paid() {
        let mut repository = MockPaymentRepository::new();
        let mut renderer = MockReceiptRenderer::new();
        let mut delivery = MockReceiptDelivery::new();

        repository
            .expect_find_plan()
            .returning(|_| Ok(Some(sample_plan())));
        repository
            .expect_create_user_subscription()
            .times(1)
            .returning(|insert| Ok(sample_user_subscription(insert.starts_at)));
        repository
            .expect_create_transaction()
            .times(1)
            .returning(|_| Ok(sample_transaction(TransactionStatus::Paid)));
        repository
            .expect_find_user()
            .returning(|_| Ok(Some(sample_user())));
        renderer
            .expect_render()
            .returning(|_| Ok(b"%PDF-1.3 receipt".to_vec()));
        delivery
            .expect_deliver()
            .returning(|_, _, _, _| Err(DeliveryError::Rejected(503)));
        // The completion update must never be issued.
        repository.expect_complete_transaction().never();

        let err = usecase(repository, renderer, delivery)
            .pay(valid_payment())
            .await
            .unwrap_err();

        assert!(matches!(err, PaymentError::DeliveryRejected(503)));
        assert_eq!(err.to_string(), "Error sending email receipt");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn transport_failure_maps_to_the_delivery_message() {
        let mut repository = MockPaymentRepository::new();
        let mut renderer = MockReceiptRenderer::new();
        let mut delivery = MockReceiptDelivery::new();

        repository
            .expect_find_plan()
            .returning(|_| Ok(Some(sample_plan())));
        repository
            .expect_create_user_subscription()
            .returning(|insert| Ok(sample_user_subscription(insert.starts_at)));
        repository
            .expect_create_transaction()
            .returning(|_| Ok(sample_transaction(TransactionStatus::Paid)));
        repository
            .expect_find_user()
            .returning(|_| Ok(Some(sample_user())));
        renderer
            .expect_render()
            .returning(|_| Ok(b"%PDF-1.3 receipt".to_vec()));
        delivery.expect_deliver().returning(|_, _, _, _| {
            Err(DeliveryError::Transport(anyhow::anyhow!("timed out")))
        });
        repository.expect_complete_transaction().never();

        let err = usecase(repository, renderer, delivery)
            .pay(valid_payment())
            .await
            .unwrap_err();

        assert!(matches!(err, PaymentError::DeliveryTransport(_)));
        assert_eq!(err.to_string(), "Error sending email receipt");
    }
}
