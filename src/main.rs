//! Golden Fork reservation bot
//!
//! A Telegram webhook bot that walks users through a linear reservation
//! wizard and persists completed bookings to SQLite.

mod api;
mod config;
mod db;
mod runtime;
mod session;
mod telegram;
mod wizard;

use api::{create_router, AppState};
use config::Config;
use db::Database;
use std::net::SocketAddr;
use std::path::PathBuf;
use telegram::BotApi;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "goldfork=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration: missing credential or public URL refuses to start.
    let config = Config::from_env()?;

    // Ensure database directory exists
    if let Some(parent) = PathBuf::from(&config.db_path).parent() {
        std::fs::create_dir_all(parent)?;
    }

    tracing::info!(path = %config.db_path, "Opening database");
    let db = Database::open(&config.db_path)?;

    // Register the webhook, dropping anything queued while we were down.
    let bot = BotApi::new(&config.bot_token);
    bot.delete_webhook().await?;
    bot.set_webhook(&config.webhook_url()).await?;
    tracing::info!(url = %config.public_url, "Webhook registered");

    let state = AppState::new(&config, db, bot);
    let app = create_router(state).layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Goldfork webhook server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
