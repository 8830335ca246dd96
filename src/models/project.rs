// src/models/project.rs

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, validation::validate_not_blank},
    models::navigation::Tab,
};

pub const DEFAULT_STORE_TYPE: &str = "Outros";

// --- Enums ---

// A ordem de declaração é a ordem do gráfico do dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    Draft,
    Analysis,
    Approved,
    InProgress,
    Completed,
    Blocked,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 6] = [
        ProjectStatus::Draft,
        ProjectStatus::Analysis,
        ProjectStatus::Approved,
        ProjectStatus::InProgress,
        ProjectStatus::Completed,
        ProjectStatus::Blocked,
    ];

    pub fn code(self) -> &'static str {
        match self {
            ProjectStatus::Draft => "DRAFT",
            ProjectStatus::Analysis => "ANALYSIS",
            ProjectStatus::Approved => "APPROVED",
            ProjectStatus::InProgress => "IN_PROGRESS",
            ProjectStatus::Completed => "COMPLETED",
            ProjectStatus::Blocked => "BLOCKED",
        }
    }

    pub fn label(self, lang: &str) -> &'static str {
        match (self, lang) {
            (ProjectStatus::Draft, "en") => "Draft",
            (ProjectStatus::Analysis, "en") => "Under Review",
            (ProjectStatus::Approved, "en") => "Approved",
            (ProjectStatus::InProgress, "en") => "In Progress",
            (ProjectStatus::Completed, "en") => "Completed",
            (ProjectStatus::Blocked, "en") => "Blocked",
            (ProjectStatus::Draft, _) => "Rascunho",
            (ProjectStatus::Analysis, _) => "Em Análise",
            (ProjectStatus::Approved, _) => "Aprovado",
            (ProjectStatus::InProgress, _) => "Em Obras",
            (ProjectStatus::Completed, _) => "Concluído",
            (ProjectStatus::Blocked, _) => "Pendência",
        }
    }

    pub fn chart_color(self) -> &'static str {
        match self {
            ProjectStatus::Draft => "#94a3b8",
            ProjectStatus::Analysis => "#f59e0b",
            ProjectStatus::Approved => "#10b981",
            ProjectStatus::InProgress => "#3b82f6",
            ProjectStatus::Completed => "#64748b",
            ProjectStatus::Blocked => "#ef4444",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProjectStatus::ALL
            .into_iter()
            .find(|status| status.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("status desconhecido: {}", s))
    }
}

/// Filtro de status da listagem: `ALL` ou um status exato.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum StatusFilter {
    #[default]
    All,
    Only(ProjectStatus),
}

impl StatusFilter {
    pub fn matches(self, status: ProjectStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(expected) => expected == status,
        }
    }
}

impl TryFrom<String> for StatusFilter {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.trim().eq_ignore_ascii_case("ALL") {
            return Ok(StatusFilter::All);
        }
        value.parse().map(StatusFilter::Only)
    }
}

// --- Progresso ---

/// Percentual de execução da obra, sempre entre 0 e 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Progress(u8);

impl Progress {
    pub const ZERO: Progress = Progress(0);
    pub const COMPLETE: Progress = Progress(100);

    pub fn new(value: u8) -> Result<Self, AppError> {
        Progress::try_from(value).map_err(AppError::InvariantViolation)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Progress {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value > 100 {
            return Err(format!("progresso fora do intervalo 0-100: {}", value));
        }
        Ok(Progress(value))
    }
}

impl From<Progress> for u8 {
    fn from(progress: Progress) -> Self {
        progress.0
    }
}

// --- Documentos (módulo ainda sem upload) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum DocumentKind {
    Pdf,
    Dwg,
    Img,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDocument {
    pub id: Uuid,
    #[schema(example = "planta-baixa.dwg")]
    pub name: String,
    pub kind: DocumentKind,
    pub upload_date: NaiveDate,
    pub status: DocumentStatus,
}

// --- Projeto (obra) ---

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,

    #[schema(example = "Zara")]
    pub store_name: String,

    #[schema(example = "102")]
    pub store_number: String,

    #[schema(example = "Expansão do Mezanino")]
    pub title: String,

    #[schema(example = "Reforma completa do segundo piso com nova iluminação e piso.")]
    pub description: String,

    pub status: ProjectStatus,

    #[schema(example = "Vestuário")]
    pub store_type: String,

    pub start_date: NaiveDate,
    pub completion_date: Option<NaiveDate>,

    #[schema(example = 450000.0)]
    pub budget: Option<Decimal>,

    #[schema(value_type = u8, minimum = 0, maximum = 100, example = 65)]
    pub progress: Progress,

    #[schema(example = "Ana Costa")]
    pub manager: String,

    pub documents: Vec<ProjectDocument>,
}

impl Project {
    // Regras que o repositório verifica antes de aceitar um registro.
    // O intervalo do progresso já é garantido pelo tipo `Progress`.
    pub fn check_invariants(&self) -> Result<(), AppError> {
        if let Some(budget) = self.budget {
            if budget.is_sign_negative() && !budget.is_zero() {
                return Err(AppError::InvariantViolation(format!(
                    "orçamento negativo na obra {}",
                    self.id
                )));
            }
        }

        if let Some(completion) = self.completion_date {
            if completion < self.start_date {
                return Err(AppError::InvariantViolation(format!(
                    "conclusão anterior ao início na obra {}",
                    self.id
                )));
            }
        }

        Ok(())
    }

    pub fn budget_or_zero(&self) -> Decimal {
        self.budget.unwrap_or(Decimal::ZERO)
    }

    pub fn matches_text(&self, needle_lowercase: &str) -> bool {
        needle_lowercase.is_empty()
            || self.store_name.to_lowercase().contains(needle_lowercase)
            || self.title.to_lowercase().contains(needle_lowercase)
    }
}

// ---
// Payload: NewProject (formulário "Nova Solicitação")
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewProjectPayload {
    #[validate(custom(function = "validate_not_blank", message = "O nome da loja é obrigatório."))]
    #[serde(default)]
    #[schema(example = "Zara Shopping")]
    pub store_name: String,

    #[validate(custom(function = "validate_not_blank", message = "O número da loja (LUC) é obrigatório."))]
    #[serde(default)]
    #[schema(example = "104-B")]
    pub store_number: String,

    #[validate(custom(function = "validate_not_blank", message = "O título da obra é obrigatório."))]
    #[serde(default)]
    #[schema(example = "Reforma de fachada")]
    pub title: String,

    #[validate(custom(function = "validate_not_blank", message = "A descrição do escopo é obrigatória."))]
    #[serde(default)]
    pub description: String,

    #[validate(custom(function = "validate_not_blank", message = "O responsável técnico é obrigatório."))]
    #[serde(default)]
    #[schema(example = "Ana Costa")]
    pub manager: String,

    #[validate(required(message = "A data de início é obrigatória."))]
    pub start_date: Option<NaiveDate>,

    // Se vier vazio assume "Outros"
    #[schema(example = "Vestuário")]
    pub store_type: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatedProjectResponse {
    pub project: Project,
    // Aba que o cliente deve abrir após a criação
    pub redirect_to: Tab,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ProjectListQuery {
    /// Busca por nome da loja ou título (sem diferenciar maiúsculas)
    pub search: Option<String>,
    /// `ALL` ou um status (`IN_PROGRESS`, `BLOCKED`, ...)
    #[param(value_type = Option<String>)]
    pub status: Option<StatusFilter>,
}
