pub mod seed;

pub mod project_repo;
pub use project_repo::ProjectRepository;
pub mod user_repo;
pub use user_repo::UserRepository;
pub mod rbac_repo;
pub use rbac_repo::RbacRepository;
pub mod chat_repo;
pub use chat_repo::ChatRepository;
