use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;

pub const DEFAULT_LLM_MODEL: &str = "defaultModel";
pub const DEFAULT_ROLE: &str = "user";
pub const DEFAULT_MESSAGE_TYPE: &str = "TEXT";

/// Free-form extension data attached to conversations and messages.
pub type ExtData = serde_json::Map<String, serde_json::Value>;

// ── Storage rows ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Conversation {
    pub id: i64,
    pub title: String,
    pub llm_model: String,
    pub ext: Json<ExtData>,
    pub gmt_create: DateTime<Utc>,
    pub gmt_modified: DateTime<Utc>,
}

/// Insert payload for a conversation; id and timestamps are assigned on save.
#[derive(Debug, Clone)]
pub struct NewConversation {
    pub title: String,
    pub llm_model: String,
    pub ext: ExtData,
}

impl NewConversation {
    pub fn new(title: String, llm_model: String) -> Self {
        Self { title, llm_model, ext: ExtData::new() }
    }
}

/// Partial update for conversation metadata. `None` fields are left as-is.
/// Input to `ConversationRepository::update_metadata`, which no route calls yet.
#[allow(dead_code)]
#[derive(Debug, Clone, Default)]
pub struct ConversationPatch {
    pub title: Option<String>,
    pub llm_model: Option<String>,
    pub ext: Option<ExtData>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ChatMessage {
    pub id: i64,
    pub conversation_id: i64,
    pub role: String,
    #[sqlx(rename = "type")]
    pub kind: String,
    pub content: String,
    pub ext: Json<ExtData>,
    pub gmt_create: DateTime<Utc>,
    pub gmt_modified: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewChatMessage {
    pub conversation_id: i64,
    pub role: String,
    pub kind: String,
    pub content: String,
    pub ext: ExtData,
}

impl NewChatMessage {
    pub fn new(conversation_id: i64, role: String, kind: String, content: String) -> Self {
        Self { conversation_id, role, kind, content, ext: ExtData::new() }
    }
}

// ── Request payloads ──────────────────────────────────────────────────────────

fn default_llm_model() -> String {
    DEFAULT_LLM_MODEL.to_string()
}

fn default_role() -> String {
    DEFAULT_ROLE.to_string()
}

fn default_message_type() -> String {
    DEFAULT_MESSAGE_TYPE.to_string()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationCreate {
    pub title: String,
    #[serde(default = "default_llm_model")]
    pub llm_model: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatCreate {
    pub conversation_id: i64,
    pub content: String,
    #[serde(rename = "type", default = "default_message_type")]
    pub kind: String,
    #[serde(default = "default_role")]
    pub role: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatListQuery {
    pub conversation_id: i64,
}

// ── Value objects ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationVo {
    pub id: i64,
    pub title: String,
    pub llm_model: String,
    pub ext: ExtData,
    /// Never populated by the listing endpoints.
    pub chat_list: Vec<ChatVo>,
    pub gmt_create: DateTime<Utc>,
    pub gmt_modified: DateTime<Utc>,
}

impl From<Conversation> for ConversationVo {
    fn from(c: Conversation) -> Self {
        Self {
            id: c.id,
            title: c.title,
            llm_model: c.llm_model,
            ext: c.ext.0,
            chat_list: Vec::new(),
            gmt_create: c.gmt_create,
            gmt_modified: c.gmt_modified,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatVo {
    pub id: i64,
    pub conversation_id: i64,
    pub role: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
    pub ext: ExtData,
    pub gmt_create: DateTime<Utc>,
    pub gmt_modified: DateTime<Utc>,
}

impl From<ChatMessage> for ChatVo {
    fn from(m: ChatMessage) -> Self {
        Self {
            id: m.id,
            conversation_id: m.conversation_id,
            role: m.role,
            kind: m.kind,
            content: m.content,
            ext: m.ext.0,
            gmt_create: m.gmt_create,
            gmt_modified: m.gmt_modified,
        }
    }
}

// ── Response envelope ─────────────────────────────────────────────────────────

pub const RESULT_SUCCESS: &str = "SUCCESS";

/// Uniform response wrapper. Exactly one of `data` / `values` is set on success.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonResp<T> {
    pub success: bool,
    pub result_code: String,
    pub data: Option<T>,
    pub values: Option<Vec<T>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> CommonResp<T> {
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            result_code: RESULT_SUCCESS.to_string(),
            data: Some(data),
            values: None,
            message: None,
        }
    }

    pub fn values(values: Vec<T>) -> Self {
        Self {
            success: true,
            result_code: RESULT_SUCCESS.to_string(),
            data: None,
            values: Some(values),
            message: None,
        }
    }

    pub fn failure(result_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            result_code: result_code.into(),
            data: None,
            values: None,
            message: Some(message.into()),
        }
    }
}
