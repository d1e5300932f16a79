//! Data acquisition callback client.
//!
//! One method, one attempt: the completion message is POSTed to the data
//! acquisition service with the caller's token. A failed callback fails the
//! whole request; there is no retry here.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use uploader_core::{AppError, UploadCompleted};

/// Callback path on the data acquisition service.
pub const DAS_CALLBACK_PATH: &str = "/rest/das/callbacks/uploader";

/// Outbound notification contract. `token` is the full `Authorization` header
/// value (scheme included).
#[async_trait]
pub trait DataAcquisitionClient: Send + Sync {
    async fn upload_completed(
        &self,
        message: &UploadCompleted,
        token: &str,
    ) -> Result<(), AppError>;
}

pub struct HttpDataAcquisitionClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDataAcquisitionClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, anyhow::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client for data acquisition callbacks")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl DataAcquisitionClient for HttpDataAcquisitionClient {
    async fn upload_completed(
        &self,
        message: &UploadCompleted,
        token: &str,
    ) -> Result<(), AppError> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, DAS_CALLBACK_PATH))
            .header(AUTHORIZATION, token)
            .json(message)
            .send()
            .await
            .map_err(|e| AppError::Notification(format!("Callback request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Notification(format!(
                "Data acquisition service returned {}",
                status
            )));
        }

        tracing::debug!(source = ?message.source, "Upload callback delivered");
        Ok(())
    }
}
