// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(title = "MallWorks - Portal de Obras", description = "API do painel de gestão de obras de lojistas do shopping"),
    paths(
        // --- Auth ---
        handlers::auth::login,

        // --- Users ---
        handlers::auth::get_me,

        // --- Navigation ---
        handlers::navigation::get_navigation,

        // --- Projects ---
        handlers::projects::list_projects,
        handlers::projects::get_project,
        handlers::projects::create_project,

        // --- Dashboard ---
        handlers::dashboard::get_overview,

        // --- Reports ---
        handlers::reports::get_report,
        handlers::reports::download_report_pdf,

        // --- Settings ---
        handlers::settings::list_users,
        handlers::settings::create_user,
        handlers::settings::get_permissions,
        handlers::settings::toggle_permission,
        handlers::settings::undo_permissions,
        handlers::settings::save_permissions,

        // --- Assistant ---
        handlers::assistant::analyze_scope,
        handlers::assistant::get_chat_history,
        handlers::assistant::send_chat_message,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::UserRole,
            models::auth::UserStatus,
            models::auth::User,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,
            models::auth::NewUserPayload,

            // --- Navigation ---
            models::navigation::Tab,
            models::navigation::NavigationEntry,

            // --- Projects ---
            models::project::ProjectStatus,
            models::project::DocumentKind,
            models::project::DocumentStatus,
            models::project::ProjectDocument,
            models::project::Project,
            models::project::NewProjectPayload,
            models::project::CreatedProjectResponse,

            // --- Dashboard ---
            models::dashboard::StatusChartEntry,
            models::dashboard::DashboardOverview,

            // --- Reports ---
            models::reports::StoreTypeSlice,
            models::reports::BudgetByStatusEntry,
            models::reports::ReportRow,
            models::reports::ReportTotals,
            models::reports::ReportSummary,

            // --- RBAC ---
            models::rbac::Permission,
            models::rbac::PermissionGroup,
            models::rbac::PermissionMatrix,
            models::rbac::RoleColumn,
            models::rbac::PermissionMatrixView,
            models::rbac::TogglePermissionPayload,

            // --- Assistant ---
            models::chat::ChatRole,
            models::chat::ChatMessage,
            models::chat::ChatMessageView,
            models::chat::SendMessagePayload,
            models::chat::ChatExchange,
            models::chat::AnalyzeScopePayload,
            models::chat::ScopeAnalysis,
        )
    ),
    tags(
        (name = "Auth", description = "Login com as contas de demonstração"),
        (name = "Users", description = "Dados do usuário da sessão"),
        (name = "Navigation", description = "Abas da barra lateral"),
        (name = "Projects", description = "Solicitações e acompanhamento de obras"),
        (name = "Dashboard", description = "Indicadores da Visão Geral"),
        (name = "Reports", description = "Relatórios Gerenciais"),
        (name = "Settings", description = "Usuários e Permissões de Acesso"),
        (name = "Assistant", description = "Assistente de IA (análise de escopo e chat)")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
