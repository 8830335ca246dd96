// src/app.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers, middleware::auth::auth_guard};

pub fn build_router(app_state: AppState) -> Router {
    // Define as rotas de autenticação (públicas)
    let auth_routes = Router::new().route("/login", post(handlers::auth::login));

    let user_routes = Router::new().route("/me", get(handlers::auth::get_me));

    let project_routes = Router::new()
        .route(
            "/",
            get(handlers::projects::list_projects).post(handlers::projects::create_project),
        )
        .route("/{id}", get(handlers::projects::get_project));

    let report_routes = Router::new()
        .route("/", get(handlers::reports::get_report))
        .route("/pdf", get(handlers::reports::download_report_pdf));

    let settings_routes = Router::new()
        .route(
            "/users",
            get(handlers::settings::list_users).post(handlers::settings::create_user),
        )
        .route("/permissions", get(handlers::settings::get_permissions))
        .route("/permissions/toggle", post(handlers::settings::toggle_permission))
        .route("/permissions/undo", post(handlers::settings::undo_permissions))
        .route("/permissions/save", post(handlers::settings::save_permissions));

    let assistant_routes = Router::new()
        .route("/analyze", post(handlers::assistant::analyze_scope))
        .route(
            "/chat",
            get(handlers::assistant::get_chat_history).post(handlers::assistant::send_chat_message),
        );

    // Tudo abaixo exige um token válido
    let protected = Router::new()
        .nest("/api/users", user_routes)
        .route("/api/navigation", get(handlers::navigation::get_navigation))
        .nest("/api/projects", project_routes)
        .route("/api/dashboard", get(handlers::dashboard::get_overview))
        .nest("/api/reports", report_routes)
        .nest("/api/settings", settings_routes)
        .nest("/api/assistant", assistant_routes)
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .merge(protected)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state)
}
