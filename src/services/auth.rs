// src/services/auth.rs

use std::{collections::HashMap, sync::Arc, time::Duration};

use async_trait::async_trait;
use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::auth::{AuthResponse, Claims, LoginUserPayload, User, UserRole, UserStatus},
    services::user_service::NEVER_ACCESSED,
};

/// Ponto de extensão da autenticação: qualquer provedor de identidade
/// entra aqui sem mudar handlers nem middleware.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, credentials: &LoginUserPayload) -> Result<User, AppError>;

    async fn find_user(&self, id: Uuid) -> Option<User>;
}

struct DemoAccount {
    user: User,
    password_hash: String,
}

// As duas contas de demonstração do portal
const DEMO_ACCOUNTS: [(u128, &str, &str, &str, UserRole); 2] = [
    (0x1, "Administrador Principal", "admin@mallworks.com", "admin123", UserRole::Admin),
    (0x2, "João Engenheiro", "eng@mallworks.com", "eng123", UserRole::Engineer),
];

/// Autenticador de demonstração: duas contas fixas, senhas guardadas como
/// hash bcrypt e um atraso artificial igual para toda tentativa.
pub struct DemoAuthenticator {
    accounts: Vec<DemoAccount>,
    // Último login bem-sucedido de cada conta (RFC 3339)
    last_access: RwLock<HashMap<Uuid, String>>,
    delay: Duration,
}

impl DemoAuthenticator {
    pub fn new(delay: Duration) -> Result<Self, AppError> {
        Self::with_cost(delay, bcrypt::DEFAULT_COST)
    }

    pub fn with_cost(delay: Duration, cost: u32) -> Result<Self, AppError> {
        let accounts = DEMO_ACCOUNTS
            .iter()
            .map(|(id, name, email, password, role)| {
                Ok(DemoAccount {
                    user: User {
                        id: Uuid::from_u128(*id),
                        name: name.to_string(),
                        email: email.to_string(),
                        role: *role,
                        status: UserStatus::Active,
                        last_access: NEVER_ACCESSED.to_string(),
                    },
                    password_hash: hash(password, cost)?,
                })
            })
            .collect::<Result<Vec<_>, AppError>>()?;

        Ok(Self { accounts, last_access: RwLock::new(HashMap::new()), delay })
    }
}

#[async_trait]
impl Authenticator for DemoAuthenticator {
    async fn authenticate(&self, credentials: &LoginUserPayload) -> Result<User, AppError> {
        // Simula a latência de uma API real, com ou sem sucesso
        tokio::time::sleep(self.delay).await;

        // E-mail desconhecido e senha errada dão o mesmo erro
        let account = self
            .accounts
            .iter()
            .find(|account| account.user.email == credentials.email)
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = credentials.password.clone();
        let password_hash_clone = account.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid = tokio::task::spawn_blocking(move || {
            verify(&password_clone, &password_hash_clone)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))?
        ?;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        let mut user = account.user.clone();
        user.last_access = Utc::now().to_rfc3339();
        self.last_access
            .write()
            .await
            .insert(user.id, user.last_access.clone());
        Ok(user)
    }

    async fn find_user(&self, id: Uuid) -> Option<User> {
        let mut user = self
            .accounts
            .iter()
            .find(|account| account.user.id == id)
            .map(|account| account.user.clone())?;

        if let Some(last_access) = self.last_access.read().await.get(&id) {
            user.last_access = last_access.clone();
        }
        Some(user)
    }
}

#[derive(Clone)]
pub struct AuthService {
    authenticator: Arc<dyn Authenticator>,
    jwt_secret: String,
    token_ttl: chrono::Duration,
}

impl AuthService {
    pub fn new(authenticator: Arc<dyn Authenticator>, jwt_secret: String, token_ttl: chrono::Duration) -> Self {
        Self { authenticator, jwt_secret, token_ttl }
    }

    pub async fn login_user(&self, credentials: &LoginUserPayload) -> Result<AuthResponse, AppError> {
        let user = match self.authenticator.authenticate(credentials).await {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!("Tentativa de login recusada para {}", credentials.email);
                return Err(e);
            }
        };

        tracing::info!("Login de {} ({:?})", user.email, user.role);

        let token = self.create_token(user.id)?;
        Ok(AuthResponse { token, user })
    }

    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        self.authenticator
            .find_user(token_data.claims.sub)
            .await
            .ok_or(AppError::UserNotFound)
    }

    fn create_token(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + self.token_ttl;

        let claims = Claims {
            sub: user_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials(email: &str, password: &str) -> LoginUserPayload {
        LoginUserPayload { email: email.to_string(), password: password.to_string() }
    }

    fn service() -> AuthService {
        let authenticator = DemoAuthenticator::with_cost(Duration::ZERO, 4).unwrap();
        AuthService::new(Arc::new(authenticator), "segredo-de-teste".into(), chrono::Duration::hours(1))
    }

    #[tokio::test]
    async fn only_the_two_demo_accounts_log_in() {
        let service = service();

        let admin = service.login_user(&credentials("admin@mallworks.com", "admin123")).await.unwrap();
        assert_eq!(admin.user.role, UserRole::Admin);
        assert_eq!(admin.user.name, "Administrador Principal");

        let eng = service.login_user(&credentials("eng@mallworks.com", "eng123")).await.unwrap();
        assert_eq!(eng.user.role, UserRole::Engineer);

        for (email, password) in [
            ("admin@mallworks.com", "eng123"),
            ("eng@mallworks.com", "admin123"),
            ("ADMIN@mallworks.com", "admin123"),
            ("ghost@mallworks.com", "admin123"),
            ("", ""),
        ] {
            let result = service.login_user(&credentials(email, password)).await;
            assert!(matches!(result, Err(AppError::InvalidCredentials)), "{email}/{password}");
        }
    }

    #[tokio::test]
    async fn issued_token_resolves_back_to_the_user() {
        let service = service();
        let response = service.login_user(&credentials("eng@mallworks.com", "eng123")).await.unwrap();

        let user = service.validate_token(&response.token).await.unwrap();
        assert_eq!(user.email, "eng@mallworks.com");
        assert_eq!(user.last_access, response.user.last_access);
        assert!(chrono::DateTime::parse_from_rfc3339(&user.last_access).is_ok());

        assert!(matches!(service.validate_token("lixo").await, Err(AppError::InvalidToken)));
    }

    #[tokio::test]
    async fn waits_the_configured_delay_even_on_failure() {
        let authenticator = DemoAuthenticator::with_cost(Duration::from_millis(50), 4).unwrap();
        let started = std::time::Instant::now();

        let result = authenticator.authenticate(&credentials("x@y.com", "nope")).await;

        assert!(result.is_err());
        assert!(started.elapsed() >= Duration::from_millis(50));
    }
}
