//! # Diary Inline Bot Main Entry Point
//!
//! Initializes logging, loads configuration, builds the callback registry
//! and inline manager, starts the expiry sweeper and health server, and runs
//! the Telegram dispatcher.

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use diary_inline_bot::bot::commands::actions;
use diary_inline_bot::bot::handlers::BotHandler;
use diary_inline_bot::config::Config;
use diary_inline_bot::inline::{CallbackRegistry, InlineManager, Messenger};
use diary_inline_bot::services::health::HealthService;
use diary_inline_bot::services::sweeper::ExpirySweeper;
use diary_inline_bot::utils::logging::log_system_event;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "diary_inline_bot=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    info!("Starting Diary Inline Bot v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration loaded - HTTP Port: {}, callback TTL: {}m, sweep every {}s",
        config.http_port, config.callback_ttl_minutes, config.sweep_interval_seconds
    );

    let registry = Arc::new(CallbackRegistry::new(config.callback_ttl()));

    // Initialize bot
    info!("Initializing Telegram bot...");
    let bot = Bot::new(&config.telegram_bot_token);
    let messenger: Arc<dyn Messenger> = Arc::new(bot.clone());
    let manager = InlineManager::new(registry.clone(), messenger, actions());
    let handler = BotHandler::new(manager);
    info!("Telegram bot initialized successfully");

    // Initialize and start expiry sweeper
    let mut sweeper = match ExpirySweeper::new(registry.clone(), config.sweep_interval()).await {
        Ok(sweeper) => sweeper,
        Err(e) => {
            tracing::error!("Failed to create expiry sweeper: {}", e);
            return Err(anyhow::anyhow!("Failed to create expiry sweeper: {}", e));
        }
    };

    if let Err(e) = sweeper.start().await {
        tracing::error!("Failed to start expiry sweeper: {}", e);
    } else {
        log_system_event("sweeper started", None);
    }

    // Initialize health service
    let health_service = HealthService::new(registry.clone());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.http_port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to port {}: {}", config.http_port, e))?;

    info!("Health check server starting on port {}", config.http_port);

    // Run both the bot and health server concurrently
    let bot_task = tokio::spawn(async move {
        Dispatcher::builder(bot, handler.schema())
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    });

    let health_task = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, health_service.router).await {
            tracing::error!("Health server error: {}", e);
        }
    });

    // Wait for either task to complete (which would indicate shutdown)
    tokio::select! {
        result1 = bot_task => {
            if let Err(e) = result1 {
                tracing::error!("Bot task error: {}", e);
            }
        }
        result2 = health_task => {
            if let Err(e) = result2 {
                tracing::error!("Health task error: {}", e);
            }
        }
    }

    if let Err(e) = sweeper.stop().await {
        tracing::warn!("Error stopping expiry sweeper: {}", e);
    }

    log_system_event("shutdown", Some(&format!("{} callbacks pending", registry.len())));
    Ok(())
}
