// src/handlers/reports.rs

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::i18n::Locale,
    models::reports::ReportSummary,
};

// GET /api/reports
#[utoipa::path(
    get,
    path = "/api/reports",
    tag = "Reports",
    responses(
        (status = 200, description = "Indicadores financeiros e de progresso", body = ReportSummary),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_report(State(app_state): State<AppState>, locale: Locale) -> Json<ReportSummary> {
    Json(app_state.report_service.get_summary(locale.as_str()).await)
}

// GET /api/reports/pdf
#[utoipa::path(
    get,
    path = "/api/reports/pdf",
    tag = "Reports",
    responses(
        (status = 200, description = "Relatório gerencial em PDF", body = Vec<u8>, content_type = "application/pdf"),
        (status = 500, description = "Falha ao gerar o PDF")
    ),
    security(("api_jwt" = []))
)]
pub async fn download_report_pdf(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let summary = app_state.report_service.get_summary(locale.as_str()).await;

    let pdf_bytes = app_state
        .document_service
        .render_report_pdf(summary, locale.as_str())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"relatorio-obras.pdf\""),
        ],
        pdf_bytes,
    ))
}
