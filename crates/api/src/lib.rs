//! # ParkEasy API
//!
//! The API crate provides the web server for the ParkEasy parking service.
//! It exposes the location and slot inventory, the booking workflow, phone
//! login, and availability estimates over JSON.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Implement request processing logic
//! - **Middleware**: Session extraction and error mapping
//! - **Session**: In-memory sessions opened by phone login
//! - **Config**: Handle environment and application configuration
//!
//! Storage and SMS delivery are reached only through the traits in
//! [`parkeasy_core::repository`], so the server can be assembled against
//! Postgres in production and against mocks in tests.

/// Configuration module for API settings
pub mod config;
/// Request handlers that implement business logic
pub mod handlers;
/// Middleware for authentication and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;
/// Login sessions and their notification lists
pub mod session;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    error_handling::HandleErrorLayer,
    http::{header, HeaderValue, Method, StatusCode},
    BoxError, Json, Router,
};
use eyre::{Result, WrapErr};
use parkeasy_core::{
    estimator::EstimatorConfig,
    repository::{BookingRepository, InventoryRepository, MessagingChannel, OccupancyRepository},
};
use tokio::net::TcpListener;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use crate::session::SessionStore;

/// Shared application state that is accessible to all request handlers
///
/// # Example
///
/// ```ignore
/// let state = Arc::new(ApiState::new(store.clone(), store.clone(), store, sms, estimator));
/// let app = build_router(state);
/// ```
pub struct ApiState {
    pub inventory: Arc<dyn InventoryRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub occupancy: Arc<dyn OccupancyRepository>,
    /// Outbound SMS and verification codes
    pub messaging: Arc<dyn MessagingChannel>,
    pub sessions: SessionStore,
    pub estimator: EstimatorConfig,
    /// Upper bound on waiting for a confirmation SMS inside a request
    pub notification_timeout: Duration,
}

/// Stays well under the default request timeout.
pub const DEFAULT_NOTIFICATION_TIMEOUT: Duration = Duration::from_secs(5);

impl ApiState {
    pub fn new(
        inventory: Arc<dyn InventoryRepository>,
        bookings: Arc<dyn BookingRepository>,
        occupancy: Arc<dyn OccupancyRepository>,
        messaging: Arc<dyn MessagingChannel>,
        estimator: EstimatorConfig,
    ) -> Self {
        Self {
            inventory,
            bookings,
            occupancy,
            messaging,
            sessions: SessionStore::new(),
            estimator,
            notification_timeout: DEFAULT_NOTIFICATION_TIMEOUT,
        }
    }

    pub fn with_sessions(mut self, sessions: SessionStore) -> Self {
        self.sessions = sessions;
        self
    }

    pub fn with_notification_timeout(mut self, timeout: Duration) -> Self {
        self.notification_timeout = timeout;
        self
    }
}

/// Builds the application router with all routes attached to `state`.
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Locations, slots and time slots
        .merge(routes::inventory::routes())
        // Booking workflow
        .merge(routes::booking::routes())
        // Phone login and session notifications
        .merge(routes::auth::routes())
        // Availability estimates
        .merge(routes::prediction::routes())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .wrap_err_with(|| format!("Invalid CORS origin {:?}", origin))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_origin(origins)
        .allow_credentials(true))
}

async fn handle_timeout(err: BoxError) -> (StatusCode, Json<Value>) {
    if err.is::<tower::timeout::error::Elapsed>() {
        warn!("Request timed out");
        (StatusCode::REQUEST_TIMEOUT, Json(json!({ "error": "Request timed out" })))
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": format!("Unhandled internal error: {}", err) })),
        )
    }
}

/// Bounds every request; a request that runs out of time answers 408.
pub fn with_request_timeout(app: Router, timeout: Duration) -> Router {
    app.layer(
        tower::ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_timeout))
            .timeout(timeout),
    )
}

/// Installs the global log subscriber. Call once, before anything logs.
pub fn init_tracing(level: Level) -> Result<()> {
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Starts the API server with the provided configuration and state
///
/// This function configures routes and middleware, and serves until the
/// listener fails.
///
/// # Arguments
///
/// * `config` - API configuration including host, port, and other settings
/// * `state` - Repositories, messaging channel and estimator settings
///
/// # Example
///
/// ```ignore
/// let config = ApiConfig::from_env()?;
/// start_server(config, state).await?;
/// ```
pub async fn start_server(config: config::ApiConfig, state: Arc<ApiState>) -> Result<()> {
    let app = build_router(state);

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)?),
        None => app,
    };

    // Add request timeout middleware
    let app = with_request_timeout(app, Duration::from_secs(config.request_timeout));

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
