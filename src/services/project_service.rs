// src/services/project_service.rs

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ProjectRepository,
    models::project::{
        NewProjectPayload, Progress, Project, ProjectStatus, StatusFilter, DEFAULT_STORE_TYPE,
    },
};

/// Filtro da tela "Minhas Obras".
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    pub search: String,
    pub status: StatusFilter,
}

impl ProjectFilter {
    pub fn new(search: Option<String>, status: Option<StatusFilter>) -> Self {
        Self {
            search: search.unwrap_or_default(),
            status: status.unwrap_or_default(),
        }
    }
}

// Mantém a ordem da coleção de origem
pub fn filter_projects(projects: &[Project], filter: &ProjectFilter) -> Vec<Project> {
    let needle = filter.search.to_lowercase();
    projects
        .iter()
        .filter(|project| project.matches_text(&needle) && filter.status.matches(project.status))
        .cloned()
        .collect()
}

// Monta a obra a partir do formulário: sempre "Em Análise", progresso 0 e orçamento 0
pub fn project_from_request(payload: NewProjectPayload) -> Project {
    let store_type = payload
        .store_type
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_STORE_TYPE.to_string());

    Project {
        id: Uuid::new_v4(),
        store_name: payload.store_name.trim().to_string(),
        store_number: payload.store_number.trim().to_string(),
        title: payload.title.trim().to_string(),
        description: payload.description.trim().to_string(),
        status: ProjectStatus::Analysis,
        store_type,
        start_date: payload.start_date.unwrap_or_else(|| Utc::now().date_naive()),
        completion_date: None,
        budget: Some(Decimal::ZERO),
        progress: Progress::ZERO,
        manager: payload.manager.trim().to_string(),
        documents: Vec::new(),
    }
}

#[derive(Clone)]
pub struct ProjectService {
    repo: ProjectRepository,
}

impl ProjectService {
    pub fn new(repo: ProjectRepository) -> Self {
        Self { repo }
    }

    pub async fn list_projects(&self, filter: &ProjectFilter) -> Vec<Project> {
        filter_projects(&self.repo.list_all().await, filter)
    }

    pub async fn get_project(&self, id: Uuid) -> Result<Project, AppError> {
        self.repo
            .find_by_id(id)
            .await
            .ok_or_else(|| AppError::ResourceNotFound(format!("obra {}", id)))
    }

    pub async fn create_project(&self, payload: NewProjectPayload) -> Result<Project, AppError> {
        let project = self.repo.prepend(project_from_request(payload)).await?;

        tracing::info!(
            "Nova solicitação de obra {} para a loja {} ({})",
            project.id,
            project.store_name,
            project.store_number
        );

        Ok(project)
    }
}
