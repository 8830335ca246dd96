pub mod assistant_service;
pub mod auth;
pub mod dashboard_service;
pub mod document_service;
pub mod gemini;
pub mod project_service;
pub mod rbac_service;
pub mod report_service;
pub mod text_generator;
pub mod user_service;
