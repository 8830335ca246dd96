// tests/api.rs

use std::{sync::Arc, time::Duration};

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use mallworks::{
    app::build_router,
    config::{AppState, Config},
    services::{
        assistant_service::CHAT_FALLBACK,
        auth::DemoAuthenticator,
        text_generator::{TextGenerator, UnconfiguredGenerator},
    },
};

async fn app_with(config: Config, generator: Arc<dyn TextGenerator>) -> Router {
    let authenticator = DemoAuthenticator::with_cost(Duration::ZERO, 4).unwrap();
    let state = AppState::with_components(config, Arc::new(authenticator), generator)
        .await
        .unwrap();
    build_router(state)
}

async fn app() -> Router {
    let mut config = Config::new("segredo-de-teste");
    config.fonts_dir = "/caminho/que/nao/existe".into();
    config.ai_timeout = Duration::from_secs(1);
    app_with(config, Arc::new(UnconfiguredGenerator)).await
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn login(app: &Router, email: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["token"].as_str().unwrap().to_string()
}

async fn admin_token(app: &Router) -> String {
    login(app, "admin@mallworks.com", "admin123").await
}

async fn engineer_token(app: &Router) -> String {
    login(app, "eng@mallworks.com", "eng123").await
}

#[tokio::test]
async fn health_is_public() {
    let app = app().await;
    let response = app
        .clone()
        .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn login_returns_token_and_session_user() {
    let app = app().await;
    let token = admin_token(&app).await;

    let (status, me) = send(&app, Method::GET, "/api/users/me", Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], "admin@mallworks.com");
    assert_eq!(me["role"], "ADMIN");
    let last_access = me["lastAccess"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(last_access).is_ok(), "{last_access}");
}

#[tokio::test]
async fn login_rejects_wrong_password_and_blank_fields() {
    let app = app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "admin@mallworks.com", "password": "eng123" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Credenciais inválidas. Tente novamente.");

    let (status, body) = send(&app, Method::POST, "/api/auth/login", None, Some(json!({ "email": "" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["email"].is_array());
    assert!(body["details"]["password"].is_array());
}

#[tokio::test]
async fn errors_follow_accept_language() {
    let app = app().await;
    let request = Request::post("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
        .body(Body::from(json!({ "email": "x@y.com", "password": "nope" }).to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "Invalid credentials. Please try again.");
}

#[tokio::test]
async fn protected_routes_require_a_valid_token() {
    let app = app().await;

    let (status, _) = send(&app, Method::GET, "/api/projects", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::GET, "/api/dashboard", Some("lixo"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn navigation_lists_tabs_in_order() {
    let app = app().await;
    let token = engineer_token(&app).await;

    let (status, tabs) = send(&app, Method::GET, "/api/navigation", Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = tabs.as_array().unwrap().iter().map(|t| t["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["dashboard", "projects", "reports", "documents", "guidelines", "settings"]);
    assert_eq!(tabs[3]["available"], false);
}

#[tokio::test]
async fn project_list_filters_by_text_and_status() {
    let app = app().await;
    let token = engineer_token(&app).await;

    let (_, all) = send(&app, Method::GET, "/api/projects", Some(&token), None).await;
    assert_eq!(all.as_array().unwrap().len(), 5);

    let (_, blocked) = send(&app, Method::GET, "/api/projects?status=BLOCKED", Some(&token), None).await;
    assert_eq!(blocked.as_array().unwrap().len(), 1);
    assert_eq!(blocked[0]["storeName"], "Cinema Multiplex");

    let (_, found) = send(&app, Method::GET, "/api/projects?search=VITRINE&status=ALL", Some(&token), None).await;
    assert_eq!(found.as_array().unwrap().len(), 1);
    assert_eq!(found[0]["storeName"], "Livraria Cultura");

    let (_, none) = send(&app, Method::GET, "/api/projects?search=zara&status=COMPLETED", Some(&token), None).await;
    assert!(none.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_status_filter_is_a_localized_validation_error() {
    let app = app().await;
    let token = engineer_token(&app).await;

    let (status, body) = send(&app, Method::GET, "/api/projects?status=FOO", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Um ou mais campos são inválidos.");
    assert_eq!(body["details"]["status"][0], "Status desconhecido.");

    let request = Request::builder()
        .uri("/api/projects?status=FOO")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::ACCEPT_LANGUAGE, "en")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "One or more fields are invalid.");
    assert_eq!(body["details"]["status"][0], "Unknown status.");
}

#[tokio::test]
async fn project_detail_and_unknown_id() {
    let app = app().await;
    let token = engineer_token(&app).await;

    let (status, project) = send(
        &app,
        Method::GET,
        "/api/projects/00000000-0000-0000-0000-000000000001",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(project["storeName"], "Zara");

    let (status, _) = send(
        &app,
        Method::GET,
        "/api/projects/00000000-0000-0000-0000-0000000000ff",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn created_project_goes_to_the_top_and_updates_dashboard() {
    let app = app().await;
    let token = engineer_token(&app).await;

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/projects",
        Some(&token),
        Some(json!({
            "storeName": "Kopenhagen",
            "storeNumber": "KIOSK-07",
            "title": "Novo balcão refrigerado",
            "description": "Troca do balcão e adequação elétrica.",
            "manager": "Ana Costa",
            "startDate": "2024-02-01",
            "storeType": ""
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["redirectTo"], "projects");
    assert_eq!(created["project"]["status"], "ANALYSIS");
    assert_eq!(created["project"]["progress"], 0);
    assert_eq!(created["project"]["storeType"], "Outros");

    let (_, list) = send(&app, Method::GET, "/api/projects", Some(&token), None).await;
    assert_eq!(list.as_array().unwrap().len(), 6);
    assert_eq!(list[0]["storeName"], "Kopenhagen");

    let (_, overview) = send(&app, Method::GET, "/api/dashboard", Some(&token), None).await;
    assert_eq!(overview["totalProjects"], 6);
    assert_eq!(overview["inAnalysis"], 2);
    assert_eq!(overview["recentActivity"][0]["storeName"], "Kopenhagen");
}

#[tokio::test]
async fn create_project_requires_fields() {
    let app = app().await;
    let token = engineer_token(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/projects",
        Some(&token),
        Some(json!({ "storeName": "  ", "title": "Pintura" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    // Nome, número, descrição, responsável e data de início
    assert_eq!(body["details"].as_object().unwrap().len(), 5);

    let (_, list) = send(&app, Method::GET, "/api/projects", Some(&token), None).await;
    assert_eq!(list.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn reports_summarize_budget_and_progress() {
    let app = app().await;
    let token = admin_token(&app).await;

    let (status, report) = send(&app, Method::GET, "/api/reports", Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["totalBudget"].as_f64(), Some(740_000.0));
    assert_eq!(report["averageProgress"], 41);
    assert_eq!(report["storeTypeCount"], 4);
    assert_eq!(report["totals"]["totalBudgetDisplay"], "R$ 740.000,00");
    assert_eq!(report["rows"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn report_pdf_without_fonts_is_a_server_error() {
    let app = app().await;
    let token = admin_token(&app).await;

    let (status, body) = send(&app, Method::GET, "/api/reports/pdf", Some(&token), None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Não foi possível gerar o relatório em PDF.");
}

#[tokio::test]
async fn only_permitted_roles_edit_the_matrix() {
    let app = app().await;
    let admin = admin_token(&app).await;
    let engineer = engineer_token(&app).await;
    let toggle = json!({ "permissionId": "create_project", "role": "ENGINEER" });

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/settings/permissions/toggle",
        Some(&engineer),
        Some(toggle.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["error"].as_str().unwrap().contains("edit_settings"));

    let (status, matrix) = send(
        &app,
        Method::POST,
        "/api/settings/permissions/toggle",
        Some(&admin),
        Some(toggle),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(matrix["roles"].as_array().unwrap().len(), 4);
    assert_eq!(
        matrix["groups"][0]["permissions"][1]["roles"],
        json!(["ADMIN", "ENGINEER", "TENANT"])
    );

    let (status, restored) = send(&app, Method::POST, "/api/settings/permissions/undo", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(restored["groups"][0]["permissions"][1]["roles"], json!(["ADMIN", "TENANT"]));

    let (status, _) = send(&app, Method::POST, "/api/settings/permissions/undo", Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::POST, "/api/settings/permissions/save", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn granting_edit_settings_lets_the_engineer_in() {
    let app = app().await;
    let admin = admin_token(&app).await;
    let engineer = engineer_token(&app).await;

    send(
        &app,
        Method::POST,
        "/api/settings/permissions/toggle",
        Some(&admin),
        Some(json!({ "permissionId": "edit_settings", "role": "ENGINEER" })),
    )
    .await;

    let (status, _) = send(&app, Method::POST, "/api/settings/permissions/save", Some(&engineer), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn managing_users() {
    let app = app().await;
    let admin = admin_token(&app).await;
    let engineer = engineer_token(&app).await;
    let new_user = json!({ "name": "Carlos Lima", "email": "carlos@loja.com" });

    let (status, _) = send(&app, Method::POST, "/api/settings/users", Some(&engineer), Some(new_user.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, created) = send(&app, Method::POST, "/api/settings/users", Some(&admin), Some(new_user.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["role"], "TENANT");
    assert_eq!(created["lastAccess"], "Nunca");

    let (status, _) = send(&app, Method::POST, "/api/settings/users", Some(&admin), Some(new_user)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/settings/users",
        Some(&admin),
        Some(json!({ "name": "Sem Email", "email": "nao-e-email" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["email"].is_array());

    let (_, users) = send(&app, Method::GET, "/api/settings/users", Some(&engineer), None).await;
    assert_eq!(users.as_array().unwrap().len(), 5);
    assert_eq!(users[4]["email"], "carlos@loja.com");

    let (_, found) = send(&app, Method::GET, "/api/settings/users?search=carlos", Some(&engineer), None).await;
    assert_eq!(found.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn assistant_falls_back_when_unavailable() {
    let app = app().await;
    let token = engineer_token(&app).await;

    let (status, history) = send(&app, Method::GET, "/api/assistant/chat", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(history.as_array().unwrap().len(), 1);
    assert_eq!(history[0]["role"], "model");

    let (status, exchange) = send(
        &app,
        Method::POST,
        "/api/assistant/chat",
        Some(&token),
        Some(json!({ "message": "Qual o horário de carga?" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(exchange["reply"]["text"], CHAT_FALLBACK);

    let (_, history) = send(&app, Method::GET, "/api/assistant/chat", Some(&token), None).await;
    assert_eq!(history.as_array().unwrap().len(), 3);

    let (status, analysis) = send(
        &app,
        Method::POST,
        "/api/assistant/analyze",
        Some(&token),
        Some(json!({ "description": "Troca de piso", "storeType": "Vestuário" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(analysis["analysis"], "Erro ao conectar com o serviço de IA. Verifique sua chave de API.");

    let (status, _) = send(&app, Method::POST, "/api/assistant/chat", Some(&token), Some(json!({ "message": " " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
