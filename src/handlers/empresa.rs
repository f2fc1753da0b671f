// src/handlers/empresa.rs

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Local;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{extract::{AppJson, AppPath}, i18n::Locale, rbac::RequireAdmin},
    models::empresa::{
        ContatoPayload, Empresa, EmpresaContato, EmpresaHorario, StatusFuncionamento,
        UpdateEmpresaRequest,
    },
};

// =============================================================================
//  PERFIL
// =============================================================================

// GET /api/empresa (pública)
#[utoipa::path(
    get,
    path = "/api/empresa",
    tag = "Empresa",
    responses(
        (status = 200, description = "Perfil da empresa (campos vazios se nunca salvo)", body = Empresa)
    )
)]
pub async fn get_empresa(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let empresa = app_state
        .empresa_repo
        .get_empresa(&app_state.db_pool)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(empresa)))
}

// PUT /api/empresa
#[utoipa::path(
    put,
    path = "/api/empresa",
    tag = "Empresa",
    request_body = UpdateEmpresaRequest,
    responses(
        (status = 200, description = "Perfil salvo", body = Empresa),
        (status = 403, description = "Apenas ADMIN")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_empresa(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: RequireAdmin,
    AppJson(payload): AppJson<UpdateEmpresaRequest>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let updated = app_state
        .empresa_repo
        .update_empresa(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(updated)))
}

// =============================================================================
//  HORÁRIOS
// =============================================================================

#[utoipa::path(
    get,
    path = "/api/empresa/horarios",
    tag = "Empresa",
    responses(
        (status = 200, description = "Horários da semana (domingo a sábado)", body = Vec<EmpresaHorario>)
    )
)]
pub async fn get_horarios(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let horarios = app_state
        .empresa_repo
        .list_horarios()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(horarios)))
}

#[utoipa::path(
    put,
    path = "/api/empresa/horarios",
    tag = "Empresa",
    request_body = Vec<EmpresaHorario>,
    responses(
        (status = 200, description = "Semana substituída", body = Vec<EmpresaHorario>),
        (status = 400, description = "Dia repetido ou abertura depois do fechamento")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_horarios(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: RequireAdmin,
    AppJson(payload): AppJson<Vec<EmpresaHorario>>,
) -> Result<impl IntoResponse, ApiError> {
    let horarios = app_state
        .empresa_service
        .replace_horarios(payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(horarios)))
}

// GET /api/empresa/status
#[utoipa::path(
    get,
    path = "/api/empresa/status",
    tag = "Empresa",
    responses(
        (status = 200, description = "Se está aberto agora (hora local do servidor)", body = StatusFuncionamento)
    )
)]
pub async fn get_status(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let status = app_state
        .empresa_service
        .status_funcionamento(Local::now().naive_local())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(status)))
}

// =============================================================================
//  CONTATOS
// =============================================================================

#[utoipa::path(
    get,
    path = "/api/empresa/contatos",
    tag = "Empresa",
    responses(
        (status = 200, description = "Canais de contato", body = Vec<EmpresaContato>)
    )
)]
pub async fn list_contatos(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let contatos = app_state
        .empresa_repo
        .list_contatos()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(contatos)))
}

#[utoipa::path(
    post,
    path = "/api/empresa/contatos",
    tag = "Empresa",
    request_body = ContatoPayload,
    responses(
        (status = 201, description = "Contato criado", body = EmpresaContato)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_contato(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: RequireAdmin,
    AppJson(payload): AppJson<ContatoPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let contato = app_state
        .empresa_repo
        .create_contato(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(contato)))
}

#[utoipa::path(
    put,
    path = "/api/empresa/contatos/{id}",
    tag = "Empresa",
    request_body = ContatoPayload,
    params(("id" = Uuid, Path, description = "ID do contato")),
    responses(
        (status = 200, description = "Contato atualizado", body = EmpresaContato),
        (status = 404, description = "Contato não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_contato(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: RequireAdmin,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<ContatoPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let contato = app_state
        .empresa_repo
        .update_contato(id, &payload)
        .await
        .and_then(|c| c.ok_or(AppError::NotFound("contato")))
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(contato)))
}

#[utoipa::path(
    delete,
    path = "/api/empresa/contatos/{id}",
    tag = "Empresa",
    params(("id" = Uuid, Path, description = "ID do contato")),
    responses(
        (status = 204, description = "Contato removido"),
        (status = 404, description = "Contato não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_contato(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: RequireAdmin,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let removed = app_state
        .empresa_repo
        .delete_contato(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    if !removed {
        return Err(AppError::NotFound("contato").to_api_error(&locale, &app_state.i18n_store));
    }

    Ok(StatusCode::NO_CONTENT)
}
