// src/services/text_generator.rs

use async_trait::async_trait;
use thiserror::Error;

use crate::models::chat::ChatMessage;

// Falhas do colaborador de IA. Nunca chegam ao cliente HTTP:
// o AssistantService troca qualquer uma delas por um texto de fallback.
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("assistente de IA não configurado (GEMINI_API_KEY ausente)")]
    NotConfigured,

    #[error("chave de API inválida para cabeçalho HTTP")]
    InvalidApiKey,

    #[error("falha na requisição ao serviço de IA: {0}")]
    Http(#[from] reqwest::Error),

    #[error("serviço de IA respondeu {status}: {body}")]
    BadResponse { status: u16, body: String },

    #[error("serviço de IA não respondeu a tempo")]
    Timeout,
}

/// Colaborador externo de geração de texto.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Geração de uma única resposta. `context` é a instrução de sistema, se houver.
    async fn generate(&self, prompt: &str, context: Option<&str>) -> Result<String, AssistantError>;

    /// Conversa multi-turno: o histórico completo mais a nova mensagem do usuário.
    async fn converse(
        &self,
        history: &[ChatMessage],
        new_message: &str,
        system_instruction: Option<&str>,
    ) -> Result<String, AssistantError>;
}

/// Usado quando não há chave de API: toda chamada falha e o usuário vê o fallback.
pub struct UnconfiguredGenerator;

#[async_trait]
impl TextGenerator for UnconfiguredGenerator {
    async fn generate(&self, _prompt: &str, _context: Option<&str>) -> Result<String, AssistantError> {
        Err(AssistantError::NotConfigured)
    }

    async fn converse(
        &self,
        _history: &[ChatMessage],
        _new_message: &str,
        _system_instruction: Option<&str>,
    ) -> Result<String, AssistantError> {
        Err(AssistantError::NotConfigured)
    }
}
