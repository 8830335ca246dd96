// src/config.rs

use std::{env, path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context;

use crate::{
    common::i18n::I18nStore,
    db::{seed, ChatRepository, ProjectRepository, RbacRepository, UserRepository},
    services::{
        assistant_service::AssistantService,
        auth::{AuthService, Authenticator, DemoAuthenticator},
        dashboard_service::DashboardService,
        document_service::DocumentService,
        gemini::{GeminiClient, DEFAULT_BASE_URL, DEFAULT_MODEL},
        project_service::ProjectService,
        rbac_service::RbacService,
        report_service::ReportService,
        text_generator::{TextGenerator, UnconfiguredGenerator},
        user_service::UserService,
    },
};

// Configuração lida do ambiente (e do .env, se existir)
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub jwt_secret: String,
    pub token_ttl: chrono::Duration,
    pub login_delay: Duration,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub ai_timeout: Duration,
    pub fonts_dir: PathBuf,
}

impl Config {
    // Valores padrão para tudo, exceto o segredo do JWT
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            jwt_secret: jwt_secret.into(),
            token_ttl: chrono::Duration::hours(8),
            login_delay: Duration::from_millis(800),
            gemini_api_key: None,
            gemini_model: DEFAULT_MODEL.to_string(),
            gemini_base_url: DEFAULT_BASE_URL.to_string(),
            ai_timeout: Duration::from_secs(60),
            fonts_dir: PathBuf::from("./fonts"),
        }
    }

    pub fn from_env() -> anyhow::Result<Self> {
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;
        let mut config = Self::new(jwt_secret);

        if let Some(addr) = optional_var("BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Some(hours) = parsed_var::<i64>("TOKEN_TTL_HOURS")? {
            config.token_ttl = token_ttl(hours)?;
        }
        if let Some(ms) = parsed_var::<u64>("LOGIN_DELAY_MS")? {
            config.login_delay = Duration::from_millis(ms);
        }
        config.gemini_api_key = optional_var("GEMINI_API_KEY");
        if let Some(model) = optional_var("GEMINI_MODEL") {
            config.gemini_model = model;
        }
        if let Some(url) = optional_var("GEMINI_BASE_URL") {
            config.gemini_base_url = url;
        }
        if let Some(secs) = parsed_var::<u64>("AI_TIMEOUT_SECS")? {
            config.ai_timeout = Duration::from_secs(secs);
        }
        if let Some(dir) = optional_var("FONTS_DIR") {
            config.fonts_dir = PathBuf::from(dir);
        }

        Ok(config)
    }
}

// Variável ausente ou vazia conta como não definida
fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

// Validade do token: precisa ser positiva e caber em `chrono::Duration`
fn token_ttl(hours: i64) -> anyhow::Result<chrono::Duration> {
    chrono::TimeDelta::try_hours(hours)
        .filter(|ttl| *ttl > chrono::TimeDelta::zero())
        .ok_or_else(|| anyhow::anyhow!("TOKEN_TTL_HOURS inválido: {}", hours))
}

fn parsed_var<T>(name: &str) -> anyhow::Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    optional_var(name)
        .map(|value| value.trim().parse::<T>().with_context(|| format!("{} inválido: '{}'", name, value)))
        .transpose()
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub i18n_store: I18nStore,
    pub auth_service: AuthService,
    pub project_service: ProjectService,
    pub dashboard_service: DashboardService,
    pub report_service: ReportService,
    pub document_service: DocumentService,
    pub user_service: UserService,
    pub rbac_service: RbacService,
    pub assistant_service: AssistantService,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let authenticator = DemoAuthenticator::new(config.login_delay)?;

        let generator: Arc<dyn TextGenerator> = match &config.gemini_api_key {
            Some(api_key) => {
                tracing::info!("Assistente de IA usando o modelo {}", config.gemini_model);
                Arc::new(GeminiClient::new(
                    api_key,
                    &config.gemini_base_url,
                    &config.gemini_model,
                    config.ai_timeout,
                )?)
            }
            None => {
                tracing::warn!("GEMINI_API_KEY não definida; o assistente responderá com as mensagens de fallback");
                Arc::new(UnconfiguredGenerator)
            }
        };

        Self::with_components(config, Arc::new(authenticator), generator).await
    }

    // --- Monta o gráfico de dependências ---
    pub async fn with_components(
        config: Config,
        authenticator: Arc<dyn Authenticator>,
        generator: Arc<dyn TextGenerator>,
    ) -> anyhow::Result<Self> {
        let project_repo = ProjectRepository::with_projects(seed::demo_projects()).await?;
        let user_repo = UserRepository::new(seed::demo_users());
        let rbac_repo = RbacRepository::new(seed::demo_permission_matrix());
        let chat_repo = ChatRepository::new();

        let auth_service = AuthService::new(authenticator, config.jwt_secret.clone(), config.token_ttl);

        Ok(Self {
            i18n_store: I18nStore::new(),
            auth_service,
            project_service: ProjectService::new(project_repo.clone()),
            dashboard_service: DashboardService::new(project_repo.clone()),
            report_service: ReportService::new(project_repo),
            document_service: DocumentService::new(config.fonts_dir.clone()),
            user_service: UserService::new(user_repo),
            rbac_service: RbacService::new(rbac_repo),
            assistant_service: AssistantService::new(generator, chat_repo, config.ai_timeout),
            config: Arc::new(config),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_portal() {
        let config = Config::new("segredo");

        assert_eq!(config.bind_addr, "0.0.0.0:3000");
        assert_eq!(config.login_delay, Duration::from_millis(800));
        assert_eq!(config.gemini_model, DEFAULT_MODEL);
        assert!(config.gemini_api_key.is_none());
    }

    #[test]
    fn token_ttl_must_be_positive_and_representable() {
        assert_eq!(token_ttl(8).unwrap(), chrono::Duration::hours(8));
        assert!(token_ttl(0).is_err());
        assert!(token_ttl(-1).is_err());
        assert!(token_ttl(i64::MAX).is_err());
    }
}
