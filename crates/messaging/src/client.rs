use async_trait::async_trait;
use eyre::{Result, WrapErr};
use parkeasy_core::{
    errors::{ParkError, ParkResult},
    phone::normalize_destination,
    repository::MessagingChannel,
};
use reqwest::StatusCode;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::config::MessagingConfig;

#[derive(Error, Debug)]
pub enum MessagingError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider answered {0}")]
    Status(StatusCode),
}

/// HTTP client for the Textflow SMS API.
#[derive(Debug, Clone)]
pub struct TextflowClient {
    http: reqwest::Client,
    config: MessagingConfig,
}

impl TextflowClient {
    pub fn new(config: MessagingConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .wrap_err("Failed to build SMS HTTP client")?;

        Ok(Self { http, config })
    }

    async fn post_once(&self, path: &str, body: &Value) -> Result<StatusCode, MessagingError> {
        let response = self
            .http
            .post(self.config.endpoint(path))
            .header("x-rapidapi-host", &self.config.api_host)
            .header("x-rapidapi-key", &self.config.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MessagingError::Status(status));
        }
        Ok(status)
    }

    async fn post(&self, path: &str, body: &Value) -> Result<StatusCode, MessagingError> {
        self.config
            .retry
            .run(path, || self.post_once(path, body))
            .await
    }

    /// Upstream health probe. Any failure after retries reads as unhealthy.
    pub async fn check_service(&self) -> bool {
        match self.post("service/check", &json!({ "testing": true })).await {
            Ok(status) => status == StatusCode::OK,
            Err(err) => {
                error!("SMS service check failed: {}", err);
                false
            }
        }
    }

    async fn deliver(&self, path: &str, data: Value, what: &str) -> ParkResult<bool> {
        if !self.check_service().await {
            return Err(ParkError::ServiceUnavailable(format!(
                "SMS service is currently unavailable, cannot {}",
                what
            )));
        }

        match self.post(path, &json!({ "data": data })).await {
            Ok(status) => {
                debug!("{} answered {}", path, status);
                Ok(status == StatusCode::OK)
            }
            Err(err) => {
                error!("Failed to {}: {}", what, err);
                Err(ParkError::ServiceUnavailable(format!(
                    "Failed to {}. Please try again later.",
                    what
                )))
            }
        }
    }
}

#[async_trait]
impl MessagingChannel for TextflowClient {
    async fn send_message(&self, destination: &str, body: &str) -> ParkResult<bool> {
        let phone_number = normalize_destination(destination);
        info!("Sending SMS to {}", phone_number);
        self.deliver(
            "send-sms",
            json!({
                "phone_number": phone_number,
                "text": body,
                "api_key": self.config.api_key,
            }),
            "send SMS",
        )
        .await
    }

    async fn request_verification_code(&self, destination: &str) -> ParkResult<bool> {
        let phone_number = normalize_destination(destination);
        info!("Requesting verification code for {}", phone_number);
        self.deliver(
            "send-code",
            json!({
                "phone_number": phone_number,
                "service_name": self.config.service_name,
                "expiration_time": self.config.code_expiration_seconds.to_string(),
                "api_key": self.config.api_key,
            }),
            "send verification code",
        )
        .await
    }

    async fn confirm_verification_code(&self, destination: &str, code: &str) -> ParkResult<bool> {
        let phone_number = normalize_destination(destination);
        self.deliver(
            "verify-code",
            json!({
                "phone_number": phone_number,
                "code": code,
                "api_key": self.config.api_key,
            }),
            "verify code",
        )
        .await
    }
}
