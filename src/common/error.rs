// src/common/error.rs

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::{common::i18n::I18nStore, middleware::i18n::Locale};

// Erros de domínio. Cada variante vira um `ApiError` localizado na borda HTTP.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Recurso não encontrado: {0}")]
    ResourceNotFound(String),

    #[error("Violação de unicidade: {0}")]
    UniqueConstraintViolation(String),

    #[error("Dados inconsistentes: {0}")]
    InvariantViolation(String),

    // Guarda o id da permissão que faltou
    #[error("Permissão negada: {0}")]
    Forbidden(String),

    #[error("Requisição já em andamento")]
    RequestInFlight,

    #[error("Erro ao gerar PDF: {0}")]
    PdfError(String),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

// O erro que efetivamente sai pela API, já traduzido.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self { status, error: error.into(), details: None }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}

impl AppError {
    pub fn to_api_error(&self, locale: &Locale, i18n: &I18nStore) -> ApiError {
        let lang = locale.0.as_str();
        let message = |key: &str| i18n.get(lang, key);

        match self {
            AppError::ValidationError(errors) => {
                // BTreeMap para que a ordem dos campos seja estável na resposta
                let mut details = BTreeMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            i18n.lookup(lang, &format!("validation.{}", e.code))
                                .map(str::to_string)
                                .or_else(|| e.message.as_ref().map(|m| m.to_string()))
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                ApiError {
                    status: StatusCode::BAD_REQUEST,
                    error: message("validation_failed"),
                    details: Some(json!(details)),
                }
            }
            AppError::InvalidCredentials => {
                ApiError::new(StatusCode::UNAUTHORIZED, message("invalid_credentials"))
            }
            AppError::InvalidToken => {
                ApiError::new(StatusCode::UNAUTHORIZED, message("invalid_token"))
            }
            AppError::UserNotFound => {
                ApiError::new(StatusCode::NOT_FOUND, message("user_not_found"))
            }
            AppError::EmailAlreadyExists => {
                ApiError::new(StatusCode::CONFLICT, message("email_already_exists"))
            }
            AppError::ResourceNotFound(what) => ApiError::new(
                StatusCode::NOT_FOUND,
                format!("{}: {}", message("resource_not_found"), what),
            ),
            AppError::UniqueConstraintViolation(what) => ApiError::new(
                StatusCode::CONFLICT,
                format!("{}: {}", message("unique_violation"), what),
            ),
            AppError::InvariantViolation(what) => ApiError::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("{}: {}", message("invariant_violation"), what),
            ),
            AppError::Forbidden(permission) => ApiError::new(
                StatusCode::FORBIDDEN,
                format!("{} '{}'.", message("forbidden"), permission),
            ),
            AppError::RequestInFlight => {
                ApiError::new(StatusCode::CONFLICT, message("request_in_flight"))
            }
            AppError::PdfError(detail) => {
                tracing::error!("Falha ao gerar PDF: {}", detail);
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, message("pdf_error"))
            }

            // Todos os outros erros viram 500; o detalhe só vai para o log.
            e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, message("internal_error"))
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_api_error(&Locale::default(), &I18nStore::default())
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::{ValidationError, ValidationErrors};

    fn locale(lang: &str) -> Locale {
        Locale(lang.to_string())
    }

    #[test]
    fn maps_statuses() {
        let i18n = I18nStore::new();
        let pt = locale("pt");

        assert_eq!(AppError::InvalidCredentials.to_api_error(&pt, &i18n).status, StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::EmailAlreadyExists.to_api_error(&pt, &i18n).status, StatusCode::CONFLICT);
        assert_eq!(AppError::RequestInFlight.to_api_error(&pt, &i18n).status, StatusCode::CONFLICT);
        assert_eq!(
            AppError::Forbidden("manage_users".into()).to_api_error(&pt, &i18n).status,
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::InternalServerError(anyhow::anyhow!("boom")).to_api_error(&pt, &i18n).status,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn validation_details_are_localized() {
        let i18n = I18nStore::new();

        let mut errors = ValidationErrors::new();
        let mut err = ValidationError::new("email");
        err.message = Some("O e-mail fornecido é inválido.".into());
        errors.add("email", err);
        let error = AppError::ValidationError(errors);

        let pt = error.to_api_error(&locale("pt"), &i18n);
        assert_eq!(pt.status, StatusCode::BAD_REQUEST);
        assert_eq!(pt.details.unwrap()["email"][0], "O e-mail fornecido é inválido.");

        let en = error.to_api_error(&locale("en"), &i18n);
        assert_eq!(en.error, "One or more fields are invalid.");
        assert_eq!(en.details.unwrap()["email"][0], "The e-mail provided is invalid.");
    }
}
