// src/db/project_repo.rs

use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{common::error::AppError, models::project::Project};

// Repositório das obras. Guarda em memória, a mais nova primeiro.
// Trocar por um banco significa reimplementar apenas estes métodos.
#[derive(Clone, Default)]
pub struct ProjectRepository {
    projects: Arc<RwLock<Vec<Project>>>,
}

impl ProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }

    // Carrega uma coleção inicial (já na ordem de exibição), validando cada registro
    pub async fn with_projects(projects: Vec<Project>) -> Result<Self, AppError> {
        let repo = Self::new();
        for project in projects {
            repo.push_back(project).await?;
        }
        Ok(repo)
    }

    pub async fn list_all(&self) -> Vec<Project> {
        self.projects.read().await.clone()
    }

    pub async fn count(&self) -> usize {
        self.projects.read().await.len()
    }

    pub async fn find_by_id(&self, id: Uuid) -> Option<Project> {
        self.projects
            .read()
            .await
            .iter()
            .find(|project| project.id == id)
            .cloned()
    }

    // Insere no topo da lista (índice 0)
    pub async fn prepend(&self, project: Project) -> Result<Project, AppError> {
        project.check_invariants()?;

        let mut projects = self.projects.write().await;
        ensure_unique(&projects, project.id)?;
        projects.insert(0, project.clone());

        Ok(project)
    }

    async fn push_back(&self, project: Project) -> Result<(), AppError> {
        project.check_invariants()?;

        let mut projects = self.projects.write().await;
        ensure_unique(&projects, project.id)?;
        projects.push(project);

        Ok(())
    }
}

fn ensure_unique(projects: &[Project], id: Uuid) -> Result<(), AppError> {
    if projects.iter().any(|existing| existing.id == id) {
        return Err(AppError::UniqueConstraintViolation(format!("obra {}", id)));
    }
    Ok(())
}
