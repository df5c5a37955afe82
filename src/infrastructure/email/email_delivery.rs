use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};

use crate::domain::repositories::receipt_delivery::{DeliveryError, ReceiptDelivery};

const REQUEST_TIMEOUT_SECS: u64 = 10;

pub struct EmailHttpDelivery {
    http: reqwest::Client,
    endpoint: String,
}

impl EmailHttpDelivery {
    pub fn new(endpoint: String) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to build email delivery client")?;

        Ok(Self { http, endpoint })
    }
}

#[async_trait]
impl ReceiptDelivery for EmailHttpDelivery {
    async fn deliver(
        &self,
        recipient: &str,
        subject: &str,
        body: &str,
        receipt: Vec<u8>,
    ) -> Result<(), DeliveryError> {
        let payload = serde_json::json!({
            "to": recipient,
            "subject": subject,
            "body": body,
        });

        let payload = serde_json::to_string(&payload)
            .map_err(|err| DeliveryError::Payload(anyhow::Error::from(err)))?;

        let attachment = Part::bytes(receipt)
            .file_name("receipt.pdf")
            .mime_str("application/pdf")
            .map_err(|err| DeliveryError::Payload(anyhow::Error::from(err)))?;

        let form = Form::new().text("json", payload).part("file", attachment);

        let response = self
            .http
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|err| DeliveryError::Transport(anyhow::Error::from(err)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DeliveryError::Rejected(status.as_u16()));
        }

        Ok(())
    }
}
