// src/handlers/assistant.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::chat::{AnalyzeScopePayload, ChatExchange, ChatMessageView, ScopeAnalysis, SendMessagePayload},
};

// POST /api/assistant/analyze
#[utoipa::path(
    post,
    path = "/api/assistant/analyze",
    tag = "Assistant",
    request_body = AnalyzeScopePayload,
    responses(
        (status = 200, description = "Análise de documentos, riscos e cronograma (ou texto de fallback)", body = ScopeAnalysis),
        (status = 400, description = "Descrição em branco"),
        (status = 409, description = "Já existe uma análise em andamento")
    ),
    security(("api_jwt" = []))
)]
pub async fn analyze_scope(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<AnalyzeScopePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let analysis = app_state
        .assistant_service
        .analyze_scope(user.id, &payload.description, &payload.store_type)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(analysis)))
}

// GET /api/assistant/chat
#[utoipa::path(
    get,
    path = "/api/assistant/chat",
    tag = "Assistant",
    responses(
        (status = 200, description = "Histórico da conversa, começando pela boas-vindas", body = Vec<ChatMessageView>)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_chat_history(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Json<Vec<ChatMessageView>> {
    let history = app_state.assistant_service.history(user.id).await;
    Json(history.into_iter().map(ChatMessageView::from).collect())
}

// POST /api/assistant/chat
#[utoipa::path(
    post,
    path = "/api/assistant/chat",
    tag = "Assistant",
    request_body = SendMessagePayload,
    responses(
        (status = 200, description = "Pergunta e resposta gravadas no histórico", body = ChatExchange),
        (status = 400, description = "Mensagem em branco"),
        (status = 409, description = "Já existe uma mensagem aguardando resposta")
    ),
    security(("api_jwt" = []))
)]
pub async fn send_chat_message(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<SendMessagePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let exchange = app_state
        .assistant_service
        .send_message(user.id, payload.message.trim())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(exchange)))
}
