use axum::extract::{Query, State};
use axum::Json;
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::models::{ChatCreate, ChatListQuery, ChatVo, CommonResp, ConversationCreate, ConversationVo};
use crate::service::chat_service::ChatService;

/// POST `/conversations/add.json`
pub async fn add_conversation_handler(
    State(svc): State<ChatService>,
    Json(payload): Json<ConversationCreate>,
) -> Result<Json<CommonResp<ConversationVo>>, AppError> {
    let conversation = svc.create_conversation(payload).await?;
    Ok(Json(CommonResp::data(conversation)))
}

/// POST `/conversations/addChat.json` — the new message comes back as a one-item list
pub async fn add_chat_handler(
    State(svc): State<ChatService>,
    Json(payload): Json<ChatCreate>,
) -> Result<Json<CommonResp<ChatVo>>, AppError> {
    let message = svc.add_chat(payload).await?;
    Ok(Json(CommonResp::values(vec![message])))
}

/// GET `/conversations/list.json`
pub async fn list_conversations_handler(
    State(svc): State<ChatService>,
) -> Result<Json<CommonResp<ConversationVo>>, AppError> {
    let conversations = svc.list_conversations().await?;
    Ok(Json(CommonResp::values(conversations)))
}

/// GET `/conversations/chatList.json?conversationId=…`
pub async fn list_chats_handler(
    State(svc): State<ChatService>,
    Query(query): Query<ChatListQuery>,
) -> Result<Json<CommonResp<ChatVo>>, AppError> {
    let messages = svc.list_chats(query.conversation_id).await?;
    Ok(Json(CommonResp::values(messages)))
}

/// GET `/health`
pub async fn health_handler() -> Json<Value> {
    Json(json!({ "ok": true }))
}
