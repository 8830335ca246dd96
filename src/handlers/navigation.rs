// src/handlers/navigation.rs

use axum::Json;

use crate::{
    middleware::i18n::Locale,
    models::navigation::{navigation, NavigationEntry},
};

// GET /api/navigation
#[utoipa::path(
    get,
    path = "/api/navigation",
    tag = "Navigation",
    responses(
        (status = 200, description = "Abas da barra lateral, na ordem de exibição", body = Vec<NavigationEntry>)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_navigation(locale: Locale) -> Json<Vec<NavigationEntry>> {
    Json(navigation(locale.as_str()))
}
