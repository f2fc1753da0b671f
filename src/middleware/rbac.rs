// src/middleware/rbac.rs

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use std::marker::PhantomData;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::funcionario::{Funcionario, FuncionarioRole},
};

/// 1. O Trait que define quem pode passar
pub trait RoleDef: Send + Sync + 'static {
    fn allows(role: FuncionarioRole) -> bool;
}

/// 2. O Extractor (Guardião). Entrega o funcionário autenticado.
pub struct RequireRole<T>(pub Funcionario, pub PhantomData<T>);

// 3. Implementação do FromRequestParts
impl<T, S> FromRequestParts<S> for RequireRole<T>
where
    T: RoleDef,
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let Ok(locale) = Locale::from_request_parts(parts, state).await;

        // A. Extrai Usuário (colocado pelo auth_guard)
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| AppError::InvalidToken.to_api_error(&locale, &app_state.i18n_store))?;

        // B. Verifica o cargo
        if !T::allows(user.0.role) {
            tracing::warn!(
                "Funcionário {} ({:?}) tentou acessar rota restrita",
                user.0.id,
                user.0.role
            );
            return Err(AppError::Forbidden.to_api_error(&locale, &app_state.i18n_store));
        }

        Ok(RequireRole(user.0, PhantomData))
    }
}

// ---
// DEFINIÇÃO DOS PAPÉIS (TIPOS)
// ---

pub struct Admin;
impl RoleDef for Admin {
    fn allows(role: FuncionarioRole) -> bool {
        role == FuncionarioRole::Admin
    }
}

pub type RequireAdmin = RequireRole<Admin>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_admins_pass_the_admin_guard() {
        assert!(Admin::allows(FuncionarioRole::Admin));
        assert!(!Admin::allows(FuncionarioRole::Funcionario));
    }
}
