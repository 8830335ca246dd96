// src/services/report_service.rs

use rust_decimal::Decimal;

use crate::{
    common::money::{budget_display, format_brl},
    db::ProjectRepository,
    models::{
        project::{Project, ProjectStatus, DEFAULT_STORE_TYPE},
        reports::{BudgetByStatusEntry, ReportRow, ReportSummary, ReportTotals, StoreTypeSlice},
    },
};

// Paleta do gráfico de pizza, reaproveitada em ciclo
pub const PIE_COLORS: [&str; 6] = ["#3b82f6", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6", "#64748b"];

// Média arredondada para o inteiro mais próximo (meio para cima); 0 se não houver obras
pub fn average_progress(projects: &[Project]) -> u8 {
    if projects.is_empty() {
        return 0;
    }
    let n = projects.len() as u64;
    let sum: u64 = projects.iter().map(|p| u64::from(p.progress.value())).sum();
    // floor(sum / n + 1/2)
    ((2 * sum + n) / (2 * n)) as u8
}

pub fn total_budget(projects: &[Project]) -> Decimal {
    projects.iter().map(Project::budget_or_zero).sum()
}

// Só o tipo vazio cai em "Outros"; o valor gravado é usado como está
fn store_type_key(project: &Project) -> &str {
    if project.store_type.is_empty() { DEFAULT_STORE_TYPE } else { &project.store_type }
}

// Contagem por tipo de loja, na ordem em que cada tipo aparece
pub fn store_type_distribution(projects: &[Project]) -> Vec<StoreTypeSlice> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for project in projects {
        let key = store_type_key(project);
        match counts.iter_mut().find(|(name, _)| name == key) {
            Some((_, count)) => *count += 1,
            None => counts.push((key.to_string(), 1)),
        }
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(index, (name, value))| StoreTypeSlice {
            name,
            value,
            color: PIE_COLORS[index % PIE_COLORS.len()].to_string(),
        })
        .collect()
}

// Soma de orçamento por status, na ordem em que cada status aparece
pub fn budget_by_status(projects: &[Project], lang: &str) -> Vec<BudgetByStatusEntry> {
    let mut sums: Vec<(ProjectStatus, Decimal)> = Vec::new();
    for project in projects {
        match sums.iter_mut().find(|(status, _)| *status == project.status) {
            Some((_, amount)) => *amount += project.budget_or_zero(),
            None => sums.push((project.status, project.budget_or_zero())),
        }
    }

    sums.into_iter()
        .map(|(status, amount)| BudgetByStatusEntry {
            status,
            label: status.label(lang).to_string(),
            amount,
        })
        .collect()
}

pub fn build_report(projects: &[Project], lang: &str) -> ReportSummary {
    let total_budget = total_budget(projects);
    let distribution = store_type_distribution(projects);

    let rows = projects
        .iter()
        .map(|project| ReportRow {
            id: project.id,
            store_name: project.store_name.clone(),
            store_type: project.store_type.clone(),
            status: project.status,
            status_label: project.status.label(lang).to_string(),
            budget: project.budget,
            budget_display: budget_display(project.budget),
            progress: project.progress.value(),
        })
        .collect();

    ReportSummary {
        total_budget,
        average_progress: average_progress(projects),
        store_type_count: distribution.len(),
        store_type_distribution: distribution,
        budget_by_status: budget_by_status(projects, lang),
        rows,
        totals: ReportTotals {
            project_count: projects.len(),
            total_budget,
            total_budget_display: format_brl(total_budget),
        },
    }
}

#[derive(Clone)]
pub struct ReportService {
    repo: ProjectRepository,
}

impl ReportService {
    pub fn new(repo: ProjectRepository) -> Self {
        Self { repo }
    }

    pub async fn get_summary(&self, lang: &str) -> ReportSummary {
        build_report(&self.repo.list_all().await, lang)
    }
}
