// src/handlers/servicos.rs

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
    middleware::{extract::{AppJson, AppPath, AppQuery}, i18n::Locale},
    models::servico::{FiltroServicos, Servico, ServicoPayload},
};

// GET /api/servicos (pública, alimenta a vitrine do site)
#[utoipa::path(
    get,
    path = "/api/servicos",
    tag = "Catalogo",
    params(FiltroServicos),
    responses(
        (status = 200, description = "Serviços", body = Vec<Servico>)
    )
)]
pub async fn list_servicos(
    State(app_state): State<AppState>,
    locale: Locale,
    AppQuery(filtro): AppQuery<FiltroServicos>,
) -> Result<impl IntoResponse, ApiError> {
    let servicos = app_state
        .servico_repo
        .list(&filtro)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(servicos)))
}

// GET /api/servicos/{id} (pública)
#[utoipa::path(
    get,
    path = "/api/servicos/{id}",
    tag = "Catalogo",
    params(("id" = Uuid, Path, description = "ID do serviço")),
    responses(
        (status = 200, description = "Serviço", body = Servico),
        (status = 404, description = "Serviço não encontrado")
    )
)]
pub async fn get_servico(
    State(app_state): State<AppState>,
    locale: Locale,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let servico = app_state
        .servico_repo
        .find_by_id(&app_state.db_pool, id)
        .await
        .and_then(|s| s.ok_or(AppError::NotFound("servico")))
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(servico)))
}

#[utoipa::path(
    post,
    path = "/api/servicos",
    tag = "Catalogo",
    request_body = ServicoPayload,
    responses(
        (status = 201, description = "Serviço criado", body = Servico),
        (status = 400, description = "Dados inválidos ou categoria inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_servico(
    State(app_state): State<AppState>,
    locale: Locale,
    AppJson(payload): AppJson<ServicoPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let servico = app_state
        .servico_repo
        .create(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(servico)))
}

#[utoipa::path(
    put,
    path = "/api/servicos/{id}",
    tag = "Catalogo",
    request_body = ServicoPayload,
    params(("id" = Uuid, Path, description = "ID do serviço")),
    responses(
        (status = 200, description = "Serviço atualizado", body = Servico),
        (status = 404, description = "Serviço não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_servico(
    State(app_state): State<AppState>,
    locale: Locale,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<ServicoPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let servico = app_state
        .servico_repo
        .update(id, &payload)
        .await
        .and_then(|s| s.ok_or(AppError::NotFound("servico")))
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(servico)))
}

#[utoipa::path(
    delete,
    path = "/api/servicos/{id}",
    tag = "Catalogo",
    params(("id" = Uuid, Path, description = "ID do serviço")),
    responses(
        (status = 204, description = "Serviço removido"),
        (status = 404, description = "Serviço não encontrado"),
        (status = 409, description = "Serviço possui agendamentos; desative-o")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_servico(
    State(app_state): State<AppState>,
    locale: Locale,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let removed = app_state
        .servico_repo
        .delete(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    if !removed {
        return Err(AppError::NotFound("servico").to_api_error(&locale, &app_state.i18n_store));
    }

    Ok(StatusCode::NO_CONTENT)
}
