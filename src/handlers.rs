pub mod assistant;
pub mod auth;
pub mod dashboard;
pub mod navigation;
pub mod projects;
pub mod reports;
pub mod settings;
