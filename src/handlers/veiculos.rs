// src/handlers/veiculos.rs

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
    models::veiculo::{FiltroVeiculos, Veiculo, VeiculoPayload},
};

// GET /api/veiculos
#[utoipa::path(
    get,
    path = "/api/veiculos",
    tag = "Veiculos",
    params(FiltroVeiculos),
    responses(
        (status = 200, description = "Veículos (opcionalmente de um cliente)", body = Vec<Veiculo>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_veiculos(
    State(app_state): State<AppState>,
    locale: Locale,
    AppQuery(filtro): AppQuery<FiltroVeiculos>,
) -> Result<impl IntoResponse, ApiError> {
    let veiculos = app_state
        .veiculo_repo
        .list(filtro.cliente_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(veiculos)))
}

// GET /api/veiculos/{id}
#[utoipa::path(
    get,
    path = "/api/veiculos/{id}",
    tag = "Veiculos",
    params(("id" = Uuid, Path, description = "ID do veículo")),
    responses(
        (status = 200, description = "Veículo", body = Veiculo),
        (status = 404, description = "Veículo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_veiculo(
    State(app_state): State<AppState>,
    locale: Locale,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let veiculo = app_state
        .veiculo_repo
        .find_by_id(&app_state.db_pool, id)
        .await
        .and_then(|v| v.ok_or(AppError::NotFound("veiculo")))
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(veiculo)))
}

// POST /api/veiculos
#[utoipa::path(
    post,
    path = "/api/veiculos",
    tag = "Veiculos",
    request_body = VeiculoPayload,
    responses(
        (status = 201, description = "Veículo criado", body = Veiculo),
        (status = 400, description = "Dados inválidos ou cliente inexistente"),
        (status = 409, description = "Placa já cadastrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_veiculo(
    State(app_state): State<AppState>,
    locale: Locale,
    AppJson(payload): AppJson<VeiculoPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let veiculo = app_state
        .veiculo_repo
        .create(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    tracing::info!("Veículo {} ({}) cadastrado", veiculo.placa, veiculo.descricao());

    Ok((StatusCode::CREATED, Json(veiculo)))
}

// PUT /api/veiculos/{id}
#[utoipa::path(
    put,
    path = "/api/veiculos/{id}",
    tag = "Veiculos",
    request_body = VeiculoPayload,
    params(("id" = Uuid, Path, description = "ID do veículo")),
    responses(
        (status = 200, description = "Veículo atualizado", body = Veiculo),
        (status = 404, description = "Veículo não encontrado"),
        (status = 409, description = "Placa já cadastrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_veiculo(
    State(app_state): State<AppState>,
    locale: Locale,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<VeiculoPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let veiculo = app_state
        .veiculo_repo
        .update(id, &payload)
        .await
        .and_then(|v| v.ok_or(AppError::NotFound("veiculo")))
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(veiculo)))
}

// DELETE /api/veiculos/{id}
#[utoipa::path(
    delete,
    path = "/api/veiculos/{id}",
    tag = "Veiculos",
    params(("id" = Uuid, Path, description = "ID do veículo")),
    responses(
        (status = 204, description = "Veículo removido"),
        (status = 404, description = "Veículo não encontrado"),
        (status = 409, description = "Veículo possui agendamentos")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_veiculo(
    State(app_state): State<AppState>,
    locale: Locale,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let removed = app_state
        .veiculo_repo
        .delete(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    if !removed {
        return Err(AppError::NotFound("veiculo").to_api_error(&locale, &app_state.i18n_store));
    }

    Ok(StatusCode::NO_CONTENT)
}
