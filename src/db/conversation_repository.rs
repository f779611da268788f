use chrono::Utc;
use sqlx::types::Json;
use sqlx::SqlitePool;
use tracing::error;

use crate::errors::AppError;
use crate::models::{Conversation, ConversationPatch, NewConversation};

const COLUMNS: &str = "id, title, llm_model, ext, gmt_create, gmt_modified";

#[derive(Clone)]
pub struct ConversationRepository {
    pool: SqlitePool,
}

impl ConversationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Newest first, by id.
    pub async fn find_all(&self) -> Result<Vec<Conversation>, AppError> {
        sqlx::query_as::<_, Conversation>(&format!(
            "SELECT {COLUMNS} FROM conversations ORDER BY id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to fetch all conversations: {e}");
            AppError::db_query("Failed to fetch conversations", e)
        })
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Conversation>, AppError> {
        sqlx::query_as::<_, Conversation>(&format!(
            "SELECT {COLUMNS} FROM conversations WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to find conversation {id}: {e}");
            AppError::db_query(format!("Failed to find conversation {id}"), e)
        })
    }

    pub async fn save(&self, conversation: &NewConversation) -> Result<Conversation, AppError> {
        let now = Utc::now();
        sqlx::query_as::<_, Conversation>(&format!(
            "INSERT INTO conversations (title, llm_model, ext, gmt_create, gmt_modified)
             VALUES (?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        ))
        .bind(&conversation.title)
        .bind(&conversation.llm_model)
        .bind(Json(conversation.ext.clone()))
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to save conversation '{}': {e}", conversation.title);
            AppError::db_query("Failed to save conversation", e)
        })
    }

    /// Applies the set fields of `patch` and bumps `gmt_modified`.
    /// Returns `None` if no conversation has this id. No route edits metadata
    /// yet; this keeps the auto-updated `gmt_modified` contract in one place.
    #[allow(dead_code)]
    pub async fn update_metadata(
        &self,
        id: i64,
        patch: &ConversationPatch,
    ) -> Result<Option<Conversation>, AppError> {
        sqlx::query_as::<_, Conversation>(&format!(
            "UPDATE conversations
             SET title = COALESCE(?, title),
                 llm_model = COALESCE(?, llm_model),
                 ext = COALESCE(?, ext),
                 gmt_modified = ?
             WHERE id = ?
             RETURNING {COLUMNS}"
        ))
        .bind(patch.title.as_deref())
        .bind(patch.llm_model.as_deref())
        .bind(patch.ext.clone().map(Json))
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to update conversation {id}: {e}");
            AppError::db_query("Failed to update conversation", e)
        })
    }

    /// Deletes the conversation; its messages go with it through the
    /// foreign key cascade. Returns whether a row was removed. Backs the
    /// cascade contract of the schema; there is no delete route.
    #[allow(dead_code)]
    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM conversations WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to delete conversation {id}: {e}");
                AppError::db_query("Failed to delete conversation", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
