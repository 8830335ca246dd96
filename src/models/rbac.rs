// src/models/rbac.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{common::error::AppError, models::auth::UserRole};

// Uma linha da matriz: a permissão e os cargos que a possuem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    #[schema(example = "create_project")]
    pub id: String,

    #[schema(example = "Criar Solicitação")]
    pub label: String,

    // Sempre na ordem canônica de `UserRole::ALL`
    pub roles: Vec<UserRole>,
}

impl Permission {
    pub fn new(id: &str, label: &str, roles: &[UserRole]) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            roles: canonical_roles(roles.iter().copied()),
        }
    }

    pub fn grants(&self, role: UserRole) -> bool {
        self.roles.contains(&role)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PermissionGroup {
    #[schema(example = "Projetos e Obras")]
    pub category: String,
    pub permissions: Vec<Permission>,
}

/// Matriz cargo × permissão, agrupada por categoria na ordem de declaração.
///
/// É um valor imutável: `toggled` devolve uma matriz nova e deixa a original
/// intacta, o que permite desfazer alterações guardando as versões anteriores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PermissionMatrix {
    pub groups: Vec<PermissionGroup>,
}

impl PermissionMatrix {
    pub fn new(groups: Vec<PermissionGroup>) -> Self {
        Self { groups }
    }

    pub fn find(&self, permission_id: &str) -> Option<&Permission> {
        self.groups
            .iter()
            .flat_map(|group| group.permissions.iter())
            .find(|permission| permission.id == permission_id)
    }

    pub fn grants(&self, permission_id: &str, role: UserRole) -> bool {
        self.find(permission_id)
            .is_some_and(|permission| permission.grants(role))
    }

    pub fn toggled(&self, permission_id: &str, role: UserRole) -> Result<PermissionMatrix, AppError> {
        if self.find(permission_id).is_none() {
            return Err(AppError::ResourceNotFound(format!("permissão '{}'", permission_id)));
        }

        let groups = self
            .groups
            .iter()
            .map(|group| PermissionGroup {
                category: group.category.clone(),
                permissions: group
                    .permissions
                    .iter()
                    .map(|permission| {
                        if permission.id != permission_id {
                            return permission.clone();
                        }
                        let roles = if permission.grants(role) {
                            permission.roles.iter().copied().filter(|r| *r != role).collect()
                        } else {
                            canonical_roles(permission.roles.iter().copied().chain([role]))
                        };
                        Permission { roles, ..permission.clone() }
                    })
                    .collect(),
            })
            .collect();

        Ok(PermissionMatrix { groups })
    }
}

fn canonical_roles(roles: impl IntoIterator<Item = UserRole>) -> Vec<UserRole> {
    let mut roles: Vec<UserRole> = roles.into_iter().collect();
    roles.sort();
    roles.dedup();
    roles
}

// --- Payloads / respostas ---

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TogglePermissionPayload {
    #[schema(example = "create_project")]
    pub permission_id: String,
    pub role: UserRole,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleColumn {
    pub role: UserRole,
    #[schema(example = "Engenheiro")]
    pub label: String,
}

// O que a tela de "Permissões de Acesso" recebe
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PermissionMatrixView {
    pub roles: Vec<RoleColumn>,
    pub groups: Vec<PermissionGroup>,
}

impl PermissionMatrixView {
    pub fn new(matrix: PermissionMatrix, lang: &str) -> Self {
        Self {
            roles: UserRole::ALL
                .into_iter()
                .map(|role| RoleColumn { role, label: role.label(lang).to_string() })
                .collect(),
            groups: matrix.groups,
        }
    }
}
