// src/handlers/dashboard.rs

use axum::{extract::State, Json};

use crate::{config::AppState, middleware::i18n::Locale, models::dashboard::DashboardOverview};

// GET /api/dashboard
#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Cards, gráfico por status e atividades recentes", body = DashboardOverview),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_overview(State(app_state): State<AppState>, locale: Locale) -> Json<DashboardOverview> {
    Json(app_state.dashboard_service.get_overview(locale.as_str()).await)
}
