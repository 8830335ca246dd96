// src/models/reports.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::project::ProjectStatus;

// Fatia do gráfico de pizza "obras por tipo de loja"
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreTypeSlice {
    #[schema(example = "Alimentação")]
    pub name: String,
    #[schema(example = 2)]
    pub value: usize,
    #[schema(example = "#3b82f6")]
    pub color: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BudgetByStatusEntry {
    pub status: ProjectStatus,
    #[schema(example = "Em Obras")]
    pub label: String,
    #[schema(example = 450000.0)]
    pub amount: Decimal,
}

// Linha da tabela "Detalhamento Financeiro"
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    pub id: Uuid,
    pub store_name: String,
    pub store_type: String,
    pub status: ProjectStatus,
    pub status_label: String,
    pub budget: Option<Decimal>,
    #[schema(example = "R$ 450.000,00")]
    pub budget_display: String,
    #[schema(example = 65)]
    pub progress: u8,
}

// Rodapé TOTAL da tabela
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportTotals {
    pub project_count: usize,
    pub total_budget: Decimal,
    #[schema(example = "R$ 740.000,00")]
    pub total_budget_display: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_budget: Decimal,
    #[schema(example = 41)]
    pub average_progress: u8,
    // Quantidade de categorias distintas de loja
    pub store_type_count: usize,
    pub store_type_distribution: Vec<StoreTypeSlice>,
    pub budget_by_status: Vec<BudgetByStatusEntry>,
    pub rows: Vec<ReportRow>,
    pub totals: ReportTotals,
}
