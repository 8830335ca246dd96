// src/models/dashboard.rs

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::project::{Project, ProjectStatus};

// Uma barra do gráfico "obras por status"
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusChartEntry {
    pub status: ProjectStatus,
    #[schema(example = "Em Obras")]
    pub label: String,
    #[schema(example = 3)]
    pub count: usize,
    #[schema(example = "#3b82f6")]
    pub color: String,
}

// Os cards do topo, o gráfico e o feed de atividades recentes
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    pub total_projects: usize,
    pub in_progress: usize,
    pub in_analysis: usize,
    pub blocked: usize,
    // Só status com contagem > 0, na ordem de declaração
    pub status_chart: Vec<StatusChartEntry>,
    pub recent_activity: Vec<Project>,
}
