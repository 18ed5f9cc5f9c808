use std::env;
use std::time::Duration;

use eyre::{Result, WrapErr};
use parkeasy_core::retry::RetryPolicy;

pub const DEFAULT_API_URL: &str = "https://textflow-sms-api.p.rapidapi.com";
pub const DEFAULT_API_HOST: &str = "textflow-sms-api.p.rapidapi.com";

/// Settings for the SMS provider.
///
/// `SMS_API_KEY` is required; everything else has a default.
#[derive(Debug, Clone)]
pub struct MessagingConfig {
    pub base_url: String,
    pub api_key: String,
    /// Value of the `x-rapidapi-host` header
    pub api_host: String,
    /// Name shown in verification texts
    pub service_name: String,
    pub code_expiration_seconds: u32,
    pub retry: RetryPolicy,
    pub request_timeout: Duration,
}

impl MessagingConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            api_host: DEFAULT_API_HOST.to_string(),
            service_name: "ParkEasy".to_string(),
            code_expiration_seconds: 600,
            retry: RetryPolicy::default(),
            request_timeout: Duration::from_secs(10),
        }
    }

    pub fn from_env() -> Result<Self> {
        let base_url = env::var("SMS_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let api_key =
            env::var("SMS_API_KEY").wrap_err("SMS_API_KEY environment variable must be set")?;
        let mut config = Self::new(base_url, api_key);

        if let Ok(host) = env::var("SMS_API_HOST") {
            config.api_host = host;
        }
        if let Ok(name) = env::var("SMS_SERVICE_NAME") {
            config.service_name = name;
        }
        if let Ok(value) = env::var("SMS_CODE_EXPIRATION_SECONDS") {
            config.code_expiration_seconds = value
                .parse()
                .wrap_err("Invalid SMS_CODE_EXPIRATION_SECONDS value")?;
        }

        // Retry settings
        if let Ok(value) = env::var("SMS_RETRY_MAX") {
            config.retry.max_retries = value.parse().wrap_err("Invalid SMS_RETRY_MAX value")?;
        }
        if let Ok(value) = env::var("SMS_RETRY_BASE_DELAY_MS") {
            let millis: u64 = value.parse().wrap_err("Invalid SMS_RETRY_BASE_DELAY_MS value")?;
            config.retry.base_delay = Duration::from_millis(millis);
        }
        if let Ok(value) = env::var("SMS_RETRY_MULTIPLIER") {
            config.retry.multiplier = value.parse().wrap_err("Invalid SMS_RETRY_MULTIPLIER value")?;
        }

        Ok(config)
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}
