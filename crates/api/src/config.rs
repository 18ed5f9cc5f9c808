//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the ParkEasy API server.
//! It retrieves configuration values from environment variables and provides defaults
//! where appropriate.
//!
//! ## Environment Variables
//!
//! The following environment variables are used:
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Per-request timeout (default: 30)
//! - `API_NOTIFICATION_TIMEOUT_SECONDS`: How long a request waits for an SMS (default: 5)
//! - `SESSION_TTL_MINUTES`: Lifetime of a login session (default: 1440)
//! - `SEED_DEMO_INVENTORY`: Insert the demo locations on startup when the database is empty
//! - `PREDICTION_CONFIDENCE`: Confidence reported with every estimate (default: 0.7)
//! - `PREDICTION_HIGH_OCCUPANCY_THRESHOLD`: Occupancy ratio above which a later time is suggested (default: 0.8)
//! - `PREDICTION_RECOMMENDATION_OFFSET_MINUTES`: How much later the suggestion is (default: 120)
//! - `PREDICTION_HISTORY_LIMIT`: Number of recent observations considered (default: 100)
//!
//! SMS provider settings live in `parkeasy_messaging::MessagingConfig`.

use std::env;
use std::str::FromStr;

use chrono::Duration;
use eyre::{eyre, Result, WrapErr};
use parkeasy_core::estimator::EstimatorConfig;
use tracing::Level;

/// Configuration for the ParkEasy API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use parkeasy_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}:{}", config.host, config.port);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL database connection string
    pub database_url: String,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Seconds a request waits on an SMS; must stay below `request_timeout`
    pub notification_timeout: u64,

    pub session_ttl: Duration,

    pub seed_demo_inventory: bool,

    pub estimator: EstimatorConfig,
}

fn env_or<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .wrap_err_with(|| format!("Invalid {} value", name)),
        Err(_) => Ok(default),
    }
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The DATABASE_URL environment variable is not set
    /// - A numeric variable cannot be parsed
    /// - A prediction ratio falls outside `0.0..=1.0`
    pub fn from_env() -> Result<Self> {
        // Network settings
        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env_or("API_PORT", 3000u16)?;

        // Database settings
        let database_url = env::var("DATABASE_URL")
            .wrap_err("DATABASE_URL environment variable must be set")?;

        // Logging settings
        let log_level = match env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()).as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        // CORS settings
        let cors_origins = env::var("API_CORS_ORIGINS").ok().map(|origins| {
            origins.split(',').map(|s| s.trim().to_string()).collect()
        });

        // Performance settings
        let request_timeout = env_or("API_REQUEST_TIMEOUT_SECONDS", 30u64)?;
        let notification_timeout = env_or("API_NOTIFICATION_TIMEOUT_SECONDS", 5u64)?;
        validate_timeouts(request_timeout, notification_timeout)?;

        // Session settings
        let session_ttl = Duration::minutes(env_or("SESSION_TTL_MINUTES", 24 * 60i64)?);
        if session_ttl <= Duration::zero() {
            return Err(eyre!("SESSION_TTL_MINUTES must be positive"));
        }

        let seed_demo_inventory = env_or("SEED_DEMO_INVENTORY", false)?;

        // Prediction settings
        let defaults = EstimatorConfig::default();
        let estimator = EstimatorConfig {
            confidence: env_or("PREDICTION_CONFIDENCE", defaults.confidence)?,
            high_occupancy_threshold: env_or(
                "PREDICTION_HIGH_OCCUPANCY_THRESHOLD",
                defaults.high_occupancy_threshold,
            )?,
            recommendation_offset: Duration::minutes(env_or(
                "PREDICTION_RECOMMENDATION_OFFSET_MINUTES",
                defaults.recommendation_offset.num_minutes(),
            )?),
            history_limit: env_or("PREDICTION_HISTORY_LIMIT", defaults.history_limit)?,
            ..defaults
        };
        validate_estimator(&estimator)?;

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            request_timeout,
            notification_timeout,
            session_ttl,
            seed_demo_inventory,
            estimator,
        })
    }

    /// Returns the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub fn validate_timeouts(request_timeout: u64, notification_timeout: u64) -> Result<()> {
    if notification_timeout >= request_timeout {
        return Err(eyre!(
            "API_NOTIFICATION_TIMEOUT_SECONDS ({}) must be below API_REQUEST_TIMEOUT_SECONDS ({})",
            notification_timeout,
            request_timeout
        ));
    }
    Ok(())
}

pub fn validate_estimator(config: &EstimatorConfig) -> Result<()> {
    for (name, value) in [
        ("PREDICTION_CONFIDENCE", config.confidence),
        ("PREDICTION_HIGH_OCCUPANCY_THRESHOLD", config.high_occupancy_threshold),
    ] {
        if !(0.0..=1.0).contains(&value) {
            return Err(eyre!("{} must be between 0 and 1, got {}", name, value));
        }
    }
    if config.history_limit <= 0 {
        return Err(eyre!("PREDICTION_HISTORY_LIMIT must be positive"));
    }
    Ok(())
}
