// src/models/chat.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::{markup, validation::validate_not_blank};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

// Mensagem do histórico do assistente. O log só cresce.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: ChatRole,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

// Mensagem pronta para exibição: o texto bruto e o HTML seguro
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageView {
    #[serde(flatten)]
    pub message: ChatMessage,
    pub html: String,
}

impl From<ChatMessage> for ChatMessageView {
    fn from(message: ChatMessage) -> Self {
        let html = markup::render(&message.text);
        Self { message, html }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SendMessagePayload {
    #[validate(custom(function = "validate_not_blank", message = "A mensagem não pode ficar em branco."))]
    #[serde(default)]
    #[schema(example = "Qual o horário permitido para carga e descarga?")]
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatExchange {
    pub user_message: ChatMessageView,
    pub reply: ChatMessageView,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeScopePayload {
    #[validate(custom(function = "validate_not_blank", message = "Descreva o escopo da obra para a análise."))]
    #[serde(default)]
    #[schema(example = "Troca de piso e nova iluminação em LED no salão de vendas.")]
    pub description: String,

    #[serde(default)]
    #[schema(example = "Vestuário")]
    pub store_type: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScopeAnalysis {
    // Markdown devolvido pelo assistente (ou o texto de fallback)
    pub analysis: String,
    pub html: String,
}

impl ScopeAnalysis {
    pub fn new(analysis: String) -> Self {
        let html = markup::render(&analysis);
        Self { analysis, html }
    }
}
