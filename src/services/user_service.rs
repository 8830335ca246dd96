// src/services/user_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{NewUserPayload, User, UserRole, UserStatus},
};

// Valor exibido em "Último Acesso" para quem nunca entrou
pub const NEVER_ACCESSED: &str = "Nunca";

#[derive(Clone)]
pub struct UserService {
    repo: UserRepository,
}

impl UserService {
    pub fn new(repo: UserRepository) -> Self {
        Self { repo }
    }

    // Busca por nome ou e-mail, sem diferenciar maiúsculas; vazio lista todos
    pub async fn list_users(&self, search: Option<&str>) -> Vec<User> {
        let users = self.repo.list_all().await;
        let needle = search.map(str::trim).unwrap_or_default().to_lowercase();
        if needle.is_empty() {
            return users;
        }

        users
            .into_iter()
            .filter(|user| {
                user.name.to_lowercase().contains(&needle) || user.email.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub async fn create_user(&self, payload: NewUserPayload) -> Result<User, AppError> {
        let user = User {
            id: Uuid::new_v4(),
            name: payload.name.trim().to_string(),
            email: payload.email.trim().to_string(),
            role: payload.role.unwrap_or(UserRole::Tenant),
            status: UserStatus::Active,
            last_access: NEVER_ACCESSED.to_string(),
        };

        let created = self.repo.append(user).await?;
        tracing::info!("Usuário {} adicionado como {:?}", created.email, created.role);
        Ok(created)
    }
}
