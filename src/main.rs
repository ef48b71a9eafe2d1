//! # Reminder Bot Main Entry Point
//!
//! Initializes logging, loads configuration, sets up the database and runs
//! the Telegram dispatcher next to the health check server.

use anyhow::Result;
use reminder_bot::bot::commands::{Command, CommandTable};
use reminder_bot::bot::handlers::BotHandler;
use reminder_bot::config::Config;
use reminder_bot::database::connection::DatabaseManager;
use reminder_bot::services::health::HealthService;
use reminder_bot::services::media::MediaPipeline;
use reminder_bot::utils::logging::log_system_event;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reminder_bot=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    info!("Starting Reminder Bot v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration loaded - Database: {}, HTTP Port: {}, downloader: {}, transcoder: {}",
        config.database_url, config.http_port, config.downloader_bin, config.transcoder_bin);

    info!("Initializing database connection...");
    let db_manager = DatabaseManager::new(&config.database_url).await?;
    db_manager.run_migrations().await?;
    let db_arc = Arc::new(db_manager);
    info!("Database initialized successfully");

    let bot = Bot::new(&config.telegram_bot_token);
    let commands = CommandTable::from_commands::<Command>();
    if let Err(e) = bot.set_my_commands(commands.to_bot_commands()).await {
        tracing::warn!("Failed to publish command list: {}", e);
    }

    let pipeline = MediaPipeline::from_config(&config);
    let handler = BotHandler::new(db_arc.as_ref().clone(), commands, pipeline);
    log_system_event("bot initialized", Some(&format!("media work dir {}", config.media_work_dir.display())));

    let health_service = HealthService::new(db_arc.clone());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.http_port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to port {}: {}", config.http_port, e))?;

    info!("Health check server starting on port {}", config.http_port);

    let bot_task = tokio::spawn(async move {
        Dispatcher::builder(bot, handler.schema())
            .default_handler(|upd| async move {
                tracing::debug!("Ignoring update {:?}", upd.id);
            })
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

    // Whichever task ends first ends the process
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

    log_system_event("application stopped", None);
    Ok(())
}
