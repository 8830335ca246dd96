// src/services/rbac_service.rs

use crate::{
    common::error::AppError,
    db::RbacRepository,
    models::{auth::UserRole, rbac::PermissionMatrix},
};

#[derive(Clone)]
pub struct RbacService {
    repo: RbacRepository,
}

impl RbacService {
    pub fn new(repo: RbacRepository) -> Self {
        Self { repo }
    }

    pub async fn matrix(&self) -> PermissionMatrix {
        self.repo.current().await
    }

    // Admin nunca perde acesso, qualquer que seja o estado da matriz
    pub async fn role_has_permission(&self, role: UserRole, permission_id: &str) -> bool {
        role == UserRole::Admin || self.repo.current().await.grants(permission_id, role)
    }

    pub async fn toggle(&self, permission_id: &str, role: UserRole) -> Result<PermissionMatrix, AppError> {
        let matrix = self
            .repo
            .replace_with(|current| current.toggled(permission_id, role))
            .await?;

        tracing::info!(
            "Permissão '{}' do cargo {:?}: {}",
            permission_id,
            role,
            if matrix.grants(permission_id, role) { "concedida" } else { "revogada" }
        );
        Ok(matrix)
    }

    pub async fn undo(&self) -> Result<PermissionMatrix, AppError> {
        self.repo
            .restore_previous()
            .await
            .ok_or_else(|| AppError::ResourceNotFound("alteração para desfazer".to_string()))
    }

    // Confirma o estado atual: as alterações salvas deixam de poder ser desfeitas
    pub async fn save(&self) -> PermissionMatrix {
        let matrix = self.repo.current().await;
        let confirmed = self.repo.clear_history().await;
        tracing::info!("Matriz de permissões salva ({} alterações confirmadas)", confirmed);
        matrix
    }
}
