use chrono::Utc;
use sqlx::types::Json;
use sqlx::SqlitePool;
use tracing::error;

use crate::errors::AppError;
use crate::models::{ChatMessage, NewChatMessage};

const COLUMNS: &str = "id, conversation_id, role, type, content, ext, gmt_create, gmt_modified";

#[derive(Clone)]
pub struct MessageRepository {
    pool: SqlitePool,
}

impl MessageRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Messages in creation order. Ids are the ordering key since timestamps
    /// can collide within the same instant.
    pub async fn find_by_conversation_id(
        &self,
        conversation_id: i64,
    ) -> Result<Vec<ChatMessage>, AppError> {
        sqlx::query_as::<_, ChatMessage>(&format!(
            "SELECT {COLUMNS}
             FROM chat_messages
             WHERE conversation_id = ?
             ORDER BY id ASC"
        ))
        .bind(conversation_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to fetch messages for conversation {conversation_id}: {e}");
            AppError::db_query(
                format!("Failed to fetch messages for conversation {conversation_id}"),
                e,
            )
        })
    }

    pub async fn save(&self, message: &NewChatMessage) -> Result<ChatMessage, AppError> {
        let now = Utc::now();
        sqlx::query_as::<_, ChatMessage>(&format!(
            "INSERT INTO chat_messages (conversation_id, role, type, content, ext, gmt_create, gmt_modified)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        ))
        .bind(message.conversation_id)
        .bind(&message.role)
        .bind(&message.kind)
        .bind(&message.content)
        .bind(Json(message.ext.clone()))
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to save message for conversation {}: {e}", message.conversation_id);
            AppError::db_query("Failed to save message", e)
        })
    }
}
