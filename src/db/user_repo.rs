// src/db/user_repo.rs

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{common::error::AppError, models::auth::User};

// O repositório de usuários gerenciados na tela de Configurações
#[derive(Clone, Default)]
pub struct UserRepository {
    users: Arc<RwLock<Vec<User>>>,
}

impl UserRepository {
    pub fn new(users: Vec<User>) -> Self {
        Self { users: Arc::new(RwLock::new(users)) }
    }

    pub async fn list_all(&self) -> Vec<User> {
        self.users.read().await.clone()
    }

    // Busca um usuário pelo seu e-mail (sem diferenciar maiúsculas)
    pub async fn find_by_email(&self, email: &str) -> Option<User> {
        self.users
            .read()
            .await
            .iter()
            .find(|user| user.email.eq_ignore_ascii_case(email))
            .cloned()
    }

    // Adiciona ao fim da lista; o e-mail funciona como chave única
    pub async fn append(&self, user: User) -> Result<User, AppError> {
        let mut users = self.users.write().await;
        if users.iter().any(|existing| existing.email.eq_ignore_ascii_case(&user.email)) {
            return Err(AppError::EmailAlreadyExists);
        }
        users.push(user.clone());
        Ok(user)
    }
}
