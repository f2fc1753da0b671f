// src/middleware/extract.rs
//
// Versões de Json, Path e Query cujas rejeições saem no mesmo formato
// `{"error", "details"}` dos demais erros da API, traduzidas.

use axum::{
    extract::{FromRef, FromRequest, FromRequestParts, Path, Query, Request},
    http::{header, request::Parts, StatusCode},
    Json,
};
use serde::de::DeserializeOwned;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
};

pub struct AppJson<T>(pub T);

pub struct AppPath<T>(pub T);

pub struct AppQuery<T>(pub T);

fn rejeitar(app_state: &AppState, locale: &Locale, status: StatusCode, motivo: String) -> ApiError {
    tracing::debug!("Requisição rejeitada ({}): {}", status, motivo);
    AppError::MalformedRequest { status, motivo }.to_api_error(locale, &app_state.i18n_store)
}

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // O corpo é consumido pelo Json; o idioma sai antes
        let locale = Locale::from_header(
            req.headers()
                .get(header::ACCEPT_LANGUAGE)
                .and_then(|v| v.to_str().ok()),
        );

        match Json::<T>::from_request(req, state).await {
            Ok(Json(valor)) => Ok(AppJson(valor)),
            Err(rejeicao) => Err(rejeitar(
                &AppState::from_ref(state),
                &locale,
                rejeicao.status(),
                rejeicao.body_text(),
            )),
        }
    }
}

impl<T, S> FromRequestParts<S> for AppPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(valor)) => Ok(AppPath(valor)),
            Err(rejeicao) => {
                let Ok(locale) = Locale::from_request_parts(parts, state).await;
                Err(rejeitar(
                    &AppState::from_ref(state),
                    &locale,
                    rejeicao.status(),
                    rejeicao.body_text(),
                ))
            }
        }
    }
}

impl<T, S> FromRequestParts<S> for AppQuery<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(valor)) => Ok(AppQuery(valor)),
            Err(rejeicao) => {
                let Ok(locale) = Locale::from_request_parts(parts, state).await;
                Err(rejeitar(
                    &AppState::from_ref(state),
                    &locale,
                    rejeicao.status(),
                    rejeicao.body_text(),
                ))
            }
        }
    }
}
