// src/models/auth.rs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::validate_not_blank;

// --- Enums ---

// Ordem fixa das colunas da matriz de permissões.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    Engineer,
    Tenant,
    Auditor,
}

impl UserRole {
    pub const ALL: [UserRole; 4] = [
        UserRole::Admin,
        UserRole::Engineer,
        UserRole::Tenant,
        UserRole::Auditor,
    ];

    pub fn label(self, lang: &str) -> &'static str {
        match (self, lang) {
            (UserRole::Admin, _) => "Admin",
            (UserRole::Engineer, "en") => "Engineer",
            (UserRole::Tenant, "en") => "Tenant",
            (UserRole::Auditor, _) => "Auditor",
            (UserRole::Engineer, _) => "Engenheiro",
            (UserRole::Tenant, _) => "Lojista",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    Active,
    Inactive,
}

// Usuário da plataforma (tanto os de login quanto os gerenciados em Configurações)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,

    #[schema(example = "Maria Souza")]
    pub name: String,

    #[schema(example = "maria.admin@mall.com")]
    pub email: String,

    pub role: UserRole,
    pub status: UserStatus,

    // Texto de exibição ("Hoje, 09:30", "Nunca" ou um timestamp RFC 3339)
    #[schema(example = "Hoje, 09:30")]
    pub last_access: String,
}

// Dados para login
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginUserPayload {
    #[validate(custom(function = "validate_not_blank", message = "O e-mail é obrigatório."))]
    #[serde(default)]
    #[schema(example = "admin@mallworks.com")]
    pub email: String,

    #[validate(custom(function = "validate_not_blank", message = "A senha é obrigatória."))]
    #[serde(default)]
    #[schema(example = "admin123")]
    pub password: String,
}

// Resposta de autenticação com o token
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // Subject (ID do usuário)
    pub exp: usize, // Expiration time (quando o token expira)
    pub iat: usize, // Issued At (quando o token foi criado)
}

// Formulário "Adicionar Usuário"
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct NewUserPayload {
    #[validate(custom(function = "validate_not_blank", message = "O nome é obrigatório."))]
    #[serde(default)]
    #[schema(example = "Carlos Lima")]
    pub name: String,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    #[serde(default)]
    #[schema(example = "carlos@loja.com")]
    pub email: String,

    // Se não vier, o usuário entra como Lojista
    pub role: Option<UserRole>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserListQuery {
    /// Busca por nome ou e-mail (sem diferenciar maiúsculas)
    pub search: Option<String>,
}
