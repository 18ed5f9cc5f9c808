use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::Result;
use dotenv::dotenv;
use parkeasy_api::{config::ApiConfig, session::SessionStore, ApiState};
use parkeasy_db::{create_pool, schema::initialize_database, seed::seed_demo_inventory, PgStore};
use parkeasy_messaging::{MessagingConfig, TextflowClient};
use rand::{rngs::StdRng, SeedableRng};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;
    parkeasy_api::init_tracing(config.log_level)?;
    let messaging_config = MessagingConfig::from_env()?;

    // Create database connection pool
    let db_pool = create_pool(&config.database_url).await?;

    // Initialize database schema
    initialize_database(&db_pool).await?;

    if config.seed_demo_inventory {
        let mut rng = StdRng::from_entropy();
        let written = seed_demo_inventory(&db_pool, &mut rng).await?;
        info!("Demo inventory seeded with {} slots", written);
    }

    let store = Arc::new(PgStore::new(db_pool));
    let sms = Arc::new(TextflowClient::new(messaging_config)?);
    let state = Arc::new(
        ApiState::new(store.clone(), store.clone(), store, sms, config.estimator.clone())
            .with_sessions(SessionStore::with_ttl(config.session_ttl))
            .with_notification_timeout(Duration::from_secs(config.notification_timeout)),
    );

    // Start API server
    parkeasy_api::start_server(config, state).await?;

    Ok(())
}
