// src/handlers/categorias.rs

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{extract::{AppJson, AppPath}, i18n::Locale},
    models::categoria::{Categoria, CategoriaPayload},
};

// GET /api/categorias (pública)
#[utoipa::path(
    get,
    path = "/api/categorias",
    tag = "Catalogo",
    responses(
        (status = 200, description = "Categorias de serviço", body = Vec<Categoria>)
    )
)]
pub async fn list_categorias(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let categorias = app_state
        .categoria_repo
        .list()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(categorias)))
}

// GET /api/categorias/{id} (pública)
#[utoipa::path(
    get,
    path = "/api/categorias/{id}",
    tag = "Catalogo",
    params(("id" = Uuid, Path, description = "ID da categoria")),
    responses(
        (status = 200, description = "Categoria", body = Categoria),
        (status = 404, description = "Categoria não encontrada")
    )
)]
pub async fn get_categoria(
    State(app_state): State<AppState>,
    locale: Locale,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let categoria = app_state
        .categoria_repo
        .find_by_id(id)
        .await
        .and_then(|c| c.ok_or(AppError::NotFound("categoria")))
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(categoria)))
}

#[utoipa::path(
    post,
    path = "/api/categorias",
    tag = "Catalogo",
    request_body = CategoriaPayload,
    responses(
        (status = 201, description = "Categoria criada", body = Categoria),
        (status = 409, description = "Nome já existe")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_categoria(
    State(app_state): State<AppState>,
    locale: Locale,
    AppJson(payload): AppJson<CategoriaPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let categoria = app_state
        .categoria_repo
        .create(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(categoria)))
}

#[utoipa::path(
    put,
    path = "/api/categorias/{id}",
    tag = "Catalogo",
    request_body = CategoriaPayload,
    params(("id" = Uuid, Path, description = "ID da categoria")),
    responses(
        (status = 200, description = "Categoria atualizada", body = Categoria),
        (status = 404, description = "Categoria não encontrada"),
        (status = 409, description = "Nome já existe")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_categoria(
    State(app_state): State<AppState>,
    locale: Locale,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<CategoriaPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let categoria = app_state
        .categoria_repo
        .update(id, &payload)
        .await
        .and_then(|c| c.ok_or(AppError::NotFound("categoria")))
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(categoria)))
}

#[utoipa::path(
    delete,
    path = "/api/categorias/{id}",
    tag = "Catalogo",
    params(("id" = Uuid, Path, description = "ID da categoria")),
    responses(
        (status = 204, description = "Categoria removida"),
        (status = 404, description = "Categoria não encontrada"),
        (status = 409, description = "Categoria possui serviços")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_categoria(
    State(app_state): State<AppState>,
    locale: Locale,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let removed = app_state
        .categoria_repo
        .delete(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    if !removed {
        return Err(AppError::NotFound("categoria").to_api_error(&locale, &app_state.i18n_store));
    }

    Ok(StatusCode::NO_CONTENT)
}
