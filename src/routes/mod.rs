pub mod api_routes;

use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::AppConfig;
use crate::routes::api_routes::{
    add_chat_handler, add_conversation_handler, health_handler, list_chats_handler,
    list_conversations_handler,
};
use crate::service::chat_service::ChatService;

pub fn build_router(svc: ChatService, config: &AppConfig) -> Router {
    Router::new()
        .route("/conversations/add.json", post(add_conversation_handler))
        .route("/conversations/addChat.json", post(add_chat_handler))
        .route("/conversations/list.json", get(list_conversations_handler))
        .route("/conversations/chatList.json", get(list_chats_handler))
        .route("/health", get(health_handler))
        .layer(cors_layer(&config.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(svc)
}

/// Only listed origins get CORS headers; a `*` entry allows every origin.
/// Credentials are allowed, so wildcards are expressed by mirroring the
/// request rather than with `Any`.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request());

    if origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(AllowOrigin::mirror_request());
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin '{origin}'");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}
