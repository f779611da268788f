mod config;
mod db;
mod errors;
mod models;
mod routes;
mod service;

use anyhow::Context;
use tracing::info;

use crate::config::AppConfig;
use crate::db::conversation_repository::ConversationRepository;
use crate::db::message_repository::MessageRepository;
use crate::service::chat_service::ChatService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (development convenience)
    dotenvy::dotenv().ok();

    // Initialise tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ai_chat_backend=debug,tower_http=debug".into()),
        )
        .init();

    let config = AppConfig::from_env().context("Failed to load configuration")?;

    // ── Database ──────────────────────────────────────────────────────────────
    let pool = db::connect(&config.database_url, config.max_connections)
        .await
        .with_context(|| format!("Failed to open database at {}", config.database_url))?;

    // ── Dependency wiring ─────────────────────────────────────────────────────
    let conversation_repo = ConversationRepository::new(pool.clone());
    let message_repo = MessageRepository::new(pool);
    let chat_service = ChatService::new(conversation_repo, message_repo);

    let app = routes::build_router(chat_service, &config);

    // ── Listen ────────────────────────────────────────────────────────────────
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Listening on http://{addr}/");

    axum::serve(listener, app).await?;
    Ok(())
}
