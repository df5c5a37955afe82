use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("failed to build the delivery payload")]
    Payload(#[source] anyhow::Error),
    #[error("delivery endpoint unreachable")]
    Transport(#[source] anyhow::Error),
    #[error("delivery endpoint rejected the receipt (status {0})")]
    Rejected(u16),
}

/// Narrow seam to the external notification service. One shot, no retries;
/// any error is terminal for the current payment attempt.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReceiptDelivery: Send + Sync {
    async fn deliver(
        &self,
        recipient: &str,
        subject: &str,
        body: &str,
        receipt: Vec<u8>,
    ) -> Result<(), DeliveryError>;
}
