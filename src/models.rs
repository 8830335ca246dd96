pub mod auth;
pub mod chat;
pub mod dashboard;
pub mod navigation;
pub mod project;
pub mod rbac;
pub mod reports;
