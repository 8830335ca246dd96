// src/handlers/settings.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        i18n::Locale,
        rbac::{PermEditSettings, PermManageUsers, RequirePermission},
    },
    models::{
        auth::{NewUserPayload, User, UserListQuery},
        rbac::{PermissionMatrixView, TogglePermissionPayload},
    },
};

// GET /api/settings/users
#[utoipa::path(
    get,
    path = "/api/settings/users",
    tag = "Settings",
    params(UserListQuery),
    responses(
        (status = 200, description = "Usuários cadastrados", body = Vec<User>),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_users(
    State(app_state): State<AppState>,
    Query(query): Query<UserListQuery>,
) -> Json<Vec<User>> {
    Json(app_state.user_service.list_users(query.search.as_deref()).await)
}

// POST /api/settings/users
#[utoipa::path(
    post,
    path = "/api/settings/users",
    tag = "Settings",
    request_body = NewUserPayload,
    responses(
        (status = 201, description = "Usuário adicionado ao fim da lista", body = User),
        (status = 400, description = "Nome ou e-mail inválido"),
        (status = 403, description = "Sem a permissão 'manage_users'"),
        (status = 409, description = "E-mail já cadastrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_user(
    State(app_state): State<AppState>,
    locale: Locale,
    _perm: RequirePermission<PermManageUsers>,
    Json(payload): Json<NewUserPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let user = app_state
        .user_service
        .create_user(payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(user)))
}

// GET /api/settings/permissions
#[utoipa::path(
    get,
    path = "/api/settings/permissions",
    tag = "Settings",
    responses(
        (status = 200, description = "Matriz de permissões por cargo", body = PermissionMatrixView)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_permissions(State(app_state): State<AppState>, locale: Locale) -> Json<PermissionMatrixView> {
    let matrix = app_state.rbac_service.matrix().await;
    Json(PermissionMatrixView::new(matrix, locale.as_str()))
}

// POST /api/settings/permissions/toggle
#[utoipa::path(
    post,
    path = "/api/settings/permissions/toggle",
    tag = "Settings",
    request_body = TogglePermissionPayload,
    responses(
        (status = 200, description = "Matriz após inverter a célula", body = PermissionMatrixView),
        (status = 403, description = "Sem a permissão 'edit_settings'"),
        (status = 404, description = "Permissão desconhecida")
    ),
    security(("api_jwt" = []))
)]
pub async fn toggle_permission(
    State(app_state): State<AppState>,
    locale: Locale,
    _perm: RequirePermission<PermEditSettings>,
    Json(payload): Json<TogglePermissionPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let matrix = app_state
        .rbac_service
        .toggle(&payload.permission_id, payload.role)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(PermissionMatrixView::new(matrix, locale.as_str()))))
}

// POST /api/settings/permissions/undo
#[utoipa::path(
    post,
    path = "/api/settings/permissions/undo",
    tag = "Settings",
    responses(
        (status = 200, description = "Matriz anterior restaurada", body = PermissionMatrixView),
        (status = 403, description = "Sem a permissão 'edit_settings'"),
        (status = 404, description = "Nada para desfazer")
    ),
    security(("api_jwt" = []))
)]
pub async fn undo_permissions(
    State(app_state): State<AppState>,
    locale: Locale,
    _perm: RequirePermission<PermEditSettings>,
) -> Result<impl IntoResponse, ApiError> {
    let matrix = app_state
        .rbac_service
        .undo()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(PermissionMatrixView::new(matrix, locale.as_str()))))
}

// POST /api/settings/permissions/save
#[utoipa::path(
    post,
    path = "/api/settings/permissions/save",
    tag = "Settings",
    responses(
        (status = 200, description = "Matriz confirmada", body = PermissionMatrixView),
        (status = 403, description = "Sem a permissão 'edit_settings'")
    ),
    security(("api_jwt" = []))
)]
pub async fn save_permissions(
    State(app_state): State<AppState>,
    locale: Locale,
    _perm: RequirePermission<PermEditSettings>,
) -> Json<PermissionMatrixView> {
    let matrix = app_state.rbac_service.save().await;
    Json(PermissionMatrixView::new(matrix, locale.as_str()))
}
