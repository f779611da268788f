use tracing::{info, warn};

use crate::db::conversation_repository::ConversationRepository;
use crate::db::message_repository::MessageRepository;
use crate::errors::AppError;
use crate::models::{ChatCreate, ChatVo, ConversationCreate, ConversationVo, NewChatMessage, NewConversation};

const MAX_TITLE_LENGTH: usize = 255;
const MAX_LLM_MODEL_LENGTH: usize = 64;
const MAX_ROLE_LENGTH: usize = 16;
const MAX_TYPE_LENGTH: usize = 16;

#[derive(Clone)]
pub struct ChatService {
    conversation_repo: ConversationRepository,
    message_repo: MessageRepository,
}

impl ChatService {
    pub fn new(conversation_repo: ConversationRepository, message_repo: MessageRepository) -> Self {
        Self { conversation_repo, message_repo }
    }

    pub async fn create_conversation(
        &self,
        request: ConversationCreate,
    ) -> Result<ConversationVo, AppError> {
        require_non_empty("title", &request.title)?;
        require_max_length("title", &request.title, MAX_TITLE_LENGTH)?;
        require_max_length("llmModel", &request.llm_model, MAX_LLM_MODEL_LENGTH)?;

        let conversation = self
            .conversation_repo
            .save(&NewConversation::new(request.title, request.llm_model))
            .await?;
        info!(conversation_id = conversation.id, "Created conversation");
        Ok(conversation.into())
    }

    pub async fn add_chat(&self, request: ChatCreate) -> Result<ChatVo, AppError> {
        require_max_length("role", &request.role, MAX_ROLE_LENGTH)?;
        require_max_length("type", &request.kind, MAX_TYPE_LENGTH)?;

        if self.conversation_repo.find_by_id(request.conversation_id).await?.is_none() {
            warn!(conversation_id = request.conversation_id, "Message for unknown conversation");
            return Err(AppError::ConversationNotFound { id: request.conversation_id });
        }

        let message = self
            .message_repo
            .save(&NewChatMessage::new(
                request.conversation_id,
                request.role,
                request.kind,
                request.content,
            ))
            .await?;
        Ok(message.into())
    }

    pub async fn list_conversations(&self) -> Result<Vec<ConversationVo>, AppError> {
        let conversations = self.conversation_repo.find_all().await?;
        Ok(conversations.into_iter().map(ConversationVo::from).collect())
    }

    /// No existence check here: an unknown conversation yields an empty list.
    pub async fn list_chats(&self, conversation_id: i64) -> Result<Vec<ChatVo>, AppError> {
        let messages = self.message_repo.find_by_conversation_id(conversation_id).await?;
        Ok(messages.into_iter().map(ChatVo::from).collect())
    }
}

fn require_non_empty(field_name: &str, value: &str) -> Result<(), AppError> {
    if value.is_empty() {
        return Err(AppError::EmptyField { field_name: field_name.to_string() });
    }
    Ok(())
}

fn require_max_length(field_name: &str, value: &str, max_length: usize) -> Result<(), AppError> {
    let actual_length = value.chars().count();
    if actual_length > max_length {
        return Err(AppError::FieldTooLong {
            field_name: field_name.to_string(),
            max_length,
            actual_length,
        });
    }
    Ok(())
}
