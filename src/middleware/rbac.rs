// src/middleware/rbac.rs

use std::marker::PhantomData;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
};

/// Uma permissão da matriz, identificada pelo seu id.
pub trait PermissionDef: Send + Sync + 'static {
    fn id() -> &'static str;
}

/// Extrator que barra a requisição se o cargo do usuário não tiver a permissão `T`
/// na matriz atual. Deve rodar depois do `auth_guard`.
pub struct RequirePermission<T>(pub PhantomData<T>);

impl<T, S> FromRequestParts<S> for RequirePermission<T>
where
    T: PermissionDef,
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let locale = Locale::from_request_parts(parts, state).await.unwrap_or_default();

        let AuthenticatedUser(user) = AuthenticatedUser::from_request_parts(parts, state)
            .await
            .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

        let required = T::id();
        if !app_state.rbac_service.role_has_permission(user.role, required).await {
            tracing::warn!("{} ({:?}) sem a permissão '{}'", user.email, user.role, required);
            return Err(AppError::Forbidden(required.to_string()).to_api_error(&locale, &app_state.i18n_store));
        }

        Ok(RequirePermission(PhantomData))
    }
}

// ---
// PERMISSÕES VERIFICADAS PELA API
// ---

pub struct PermManageUsers;
impl PermissionDef for PermManageUsers {
    fn id() -> &'static str { "manage_users" }
}

pub struct PermEditSettings;
impl PermissionDef for PermEditSettings {
    fn id() -> &'static str { "edit_settings" }
}
