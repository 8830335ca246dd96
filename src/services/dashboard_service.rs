// src/services/dashboard_service.rs

use crate::{
    db::ProjectRepository,
    models::{
        dashboard::{DashboardOverview, StatusChartEntry},
        project::{Project, ProjectStatus},
    },
};

pub const RECENT_ACTIVITY_LIMIT: usize = 5;

pub fn build_overview(projects: &[Project], lang: &str) -> DashboardOverview {
    let count = |status: ProjectStatus| projects.iter().filter(|p| p.status == status).count();

    let status_chart = ProjectStatus::ALL
        .into_iter()
        .map(|status| StatusChartEntry {
            status,
            label: status.label(lang).to_string(),
            count: count(status),
            color: status.chart_color().to_string(),
        })
        .filter(|entry| entry.count > 0)
        .collect();

    DashboardOverview {
        total_projects: projects.len(),
        in_progress: count(ProjectStatus::InProgress),
        in_analysis: count(ProjectStatus::Analysis),
        blocked: count(ProjectStatus::Blocked),
        status_chart,
        // A coleção já está da mais nova para a mais antiga
        recent_activity: projects.iter().take(RECENT_ACTIVITY_LIMIT).cloned().collect(),
    }
}

#[derive(Clone)]
pub struct DashboardService {
    repo: ProjectRepository,
}

impl DashboardService {
    pub fn new(repo: ProjectRepository) -> Self {
        Self { repo }
    }

    pub async fn get_overview(&self, lang: &str) -> DashboardOverview {
        build_overview(&self.repo.list_all().await, lang)
    }
}
