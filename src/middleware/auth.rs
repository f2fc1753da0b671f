// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::funcionario::Funcionario,
};

// O funcionário dono do token, disponível para os handlers protegidos
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Funcionario);

/// Valida o Bearer token e injeta o `AuthenticatedUser` nos extensions.
pub async fn auth_guard(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let locale = Locale::from_header(
        request
            .headers()
            .get(axum::http::header::ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok()),
    );

    let bearer = request
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .ok_or_else(|| AppError::InvalidToken.to_api_error(&locale, &app_state.i18n_store))?;

    let funcionario = app_state
        .auth_service
        .validate_token(bearer.token())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    exigir_conta_ativa(&funcionario)
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    request
        .extensions_mut()
        .insert(AuthenticatedUser(funcionario));

    Ok(next.run(request).await)
}

// Token válido de conta desativada continua barrado
fn exigir_conta_ativa(funcionario: &Funcionario) -> Result<(), AppError> {
    if !funcionario.ativo {
        tracing::warn!("Acesso negado: funcionário {} está inativo", funcionario.id);
        return Err(AppError::InactiveAccount);
    }
    Ok(())
}

// Extrator para obter o usuário autenticado diretamente nos handlers
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| ApiError {
                status: axum::http::StatusCode::UNAUTHORIZED,
                error: "Usuário não autenticado".into(),
                details: None,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{common::i18n::I18nStore, models::funcionario::FuncionarioRole};
    use axum::http::StatusCode;
    use chrono::Utc;
    use uuid::Uuid;

    fn funcionario(ativo: bool) -> Funcionario {
        Funcionario {
            id: Uuid::new_v4(),
            nome: "Bruno".into(),
            email: "bruno@lavajato.com".into(),
            password_hash: String::new(),
            telefone: None,
            cargo: Some("Lavador".into()),
            role: FuncionarioRole::Funcionario,
            ativo,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn active_account_passes() {
        assert!(exigir_conta_ativa(&funcionario(true)).is_ok());
    }

    #[test]
    fn inactive_account_is_forbidden_with_translated_message() {
        let store = I18nStore::load().unwrap();
        let err = exigir_conta_ativa(&funcionario(false)).unwrap_err();
        assert!(matches!(err, AppError::InactiveAccount));

        let api = err.to_api_error(&Locale("pt".into()), &store);
        assert_eq!(api.status, StatusCode::FORBIDDEN);
        assert_eq!(api.error, "Esta conta está desativada.");
    }

    #[tokio::test]
    async fn missing_user_in_extensions_is_unauthorized() {
        let (mut parts, _) = axum::http::Request::builder().body(()).unwrap().into_parts();
        let rejeicao = AuthenticatedUser::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert_eq!(rejeicao.status, StatusCode::UNAUTHORIZED);
    }
}
