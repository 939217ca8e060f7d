//! Meridian Capital API Server
//!
//! Main entry point for the Meridian backend service.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use meridian_api::{AppState, create_router};
use meridian_db::connect;
use meridian_shared::{AppConfig, EmailService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "meridian=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;

    // Connect to database
    let db = connect(&config.database.url).await?;
    info!("Connected to database");

    // Create email service
    let email_service = EmailService::new(config.email.clone());
    info!(
        enabled = config.email.enabled,
        smtp_host = %config.email.smtp_host,
        smtp_port = %config.email.smtp_port,
        "Email service configured"
    );

    // Create application state
    #[allow(clippy::cast_possible_wrap)]
    let session_ttl = chrono::Duration::seconds(config.session.ttl_secs as i64);
    let state = AppState {
        db: Arc::new(db),
        email: Arc::new(email_service),
        session_ttl,
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
