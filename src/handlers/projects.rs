// src/handlers/projects.rs

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::{
        navigation::Tab,
        project::{CreatedProjectResponse, NewProjectPayload, Project, ProjectListQuery},
    },
    services::project_service::ProjectFilter,
};

// GET /api/projects
#[utoipa::path(
    get,
    path = "/api/projects",
    tag = "Projects",
    params(ProjectListQuery),
    responses(
        (status = 200, description = "Obras que passam no filtro, na ordem da coleção", body = Vec<Project>),
        (status = 400, description = "Status desconhecido"),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_projects(
    State(app_state): State<AppState>,
    locale: Locale,
    query: Result<Query<ProjectListQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) = query.map_err(|rejection| {
        tracing::debug!("Filtro de obras rejeitado: {}", rejection.body_text());
        let mut errors = ValidationErrors::new();
        errors.add(
            "status",
            ValidationError::new("unknown_status").with_message("Status desconhecido.".into()),
        );
        AppError::ValidationError(errors).to_api_error(&locale, &app_state.i18n_store)
    })?;
    let filter = ProjectFilter::new(query.search, query.status);
    let projects = app_state.project_service.list_projects(&filter).await;

    Ok((StatusCode::OK, Json(projects)))
}

// GET /api/projects/{id}
#[utoipa::path(
    get,
    path = "/api/projects/{id}",
    tag = "Projects",
    params(("id" = Uuid, Path, description = "ID da obra")),
    responses(
        (status = 200, description = "Detalhe da obra", body = Project),
        (status = 404, description = "Obra não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_project(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let project = app_state
        .project_service
        .get_project(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(project)))
}

// POST /api/projects
#[utoipa::path(
    post,
    path = "/api/projects",
    tag = "Projects",
    request_body = NewProjectPayload,
    responses(
        (status = 201, description = "Solicitação criada no topo da lista", body = CreatedProjectResponse),
        (status = 400, description = "Campos obrigatórios ausentes"),
        (status = 422, description = "Dados inconsistentes")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_project(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<NewProjectPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let project = app_state
        .project_service
        .create_project(payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedProjectResponse { project, redirect_to: Tab::Projects }),
    ))
}
