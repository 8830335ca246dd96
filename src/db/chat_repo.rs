// src/db/chat_repo.rs

use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{db::seed, models::chat::ChatMessage};

// Um histórico de conversa por usuário, cada um começando pela mensagem de boas-vindas
#[derive(Clone, Default)]
pub struct ChatRepository {
    conversations: Arc<RwLock<HashMap<Uuid, Vec<ChatMessage>>>>,
}

impl ChatRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn history(&self, user_id: Uuid) -> Vec<ChatMessage> {
        if let Some(messages) = self.conversations.read().await.get(&user_id) {
            return messages.clone();
        }

        self.conversations
            .write()
            .await
            .entry(user_id)
            .or_insert_with(|| vec![seed::welcome_message()])
            .clone()
    }

    // Grava pergunta e resposta sob o mesmo lock, sempre em par
    pub async fn append_exchange(&self, user_id: Uuid, question: ChatMessage, reply: ChatMessage) {
        self.conversations
            .write()
            .await
            .entry(user_id)
            .or_insert_with(|| vec![seed::welcome_message()])
            .extend([question, reply]);
    }
}
