// src/handlers/agendamentos.rs

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{extract::{AppJson, AppPath, AppQuery}, i18n::Locale},
    models::agendamento::{
        Agendamento, AgendamentoDetalhe, CreateAgendamentoPayload, FiltroAgendamentos,
        UpdateAgendamentoPayload, UpdateStatusPayload,
    },
};

// GET /api/agendamentos
#[utoipa::path(
    get,
    path = "/api/agendamentos",
    tag = "Agendamentos",
    params(FiltroAgendamentos),
    responses(
        (status = 200, description = "Agendamentos em ordem cronológica", body = Vec<Agendamento>),
        (status = 400, description = "Filtro inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_agendamentos(
    State(app_state): State<AppState>,
    locale: Locale,
    AppQuery(filtro): AppQuery<FiltroAgendamentos>,
) -> Result<impl IntoResponse, ApiError> {
    let agendamentos = app_state
        .agendamento_repo
        .list(&filtro)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(agendamentos)))
}

// GET /api/agendamentos/todos
#[utoipa::path(
    get,
    path = "/api/agendamentos/todos",
    tag = "Agendamentos",
    params(FiltroAgendamentos),
    responses(
        (status = 200, description = "Agendamentos com nomes resolvidos, mais recentes primeiro", body = Vec<AgendamentoDetalhe>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_todos(
    State(app_state): State<AppState>,
    locale: Locale,
    AppQuery(filtro): AppQuery<FiltroAgendamentos>,
) -> Result<impl IntoResponse, ApiError> {
    let agendamentos = app_state
        .agendamento_repo
        .list_detalhes(&filtro)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(agendamentos)))
}

// GET /api/agendamentos/{id}
#[utoipa::path(
    get,
    path = "/api/agendamentos/{id}",
    tag = "Agendamentos",
    params(("id" = Uuid, Path, description = "ID do agendamento")),
    responses(
        (status = 200, description = "Agendamento", body = AgendamentoDetalhe),
        (status = 404, description = "Agendamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_agendamento(
    State(app_state): State<AppState>,
    locale: Locale,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let agendamento = app_state
        .agendamento_repo
        .find_detalhe(&app_state.db_pool, id)
        .await
        .and_then(|a| a.ok_or(AppError::NotFound("agendamento")))
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(agendamento)))
}

// POST /api/agendamentos
#[utoipa::path(
    post,
    path = "/api/agendamentos",
    tag = "Agendamentos",
    request_body = CreateAgendamentoPayload,
    responses(
        (status = 201, description = "Agendamento criado como AGENDADO", body = AgendamentoDetalhe),
        (status = 400, description = "Veículo de outro cliente, serviço inativo ou fora do expediente"),
        (status = 404, description = "Veículo ou serviço não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_agendamento(
    State(app_state): State<AppState>,
    locale: Locale,
    AppJson(payload): AppJson<CreateAgendamentoPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let agendamento = app_state
        .agendamento_service
        .create(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(agendamento)))
}

// PUT /api/agendamentos/{id}
#[utoipa::path(
    put,
    path = "/api/agendamentos/{id}",
    tag = "Agendamentos",
    request_body = UpdateAgendamentoPayload,
    params(("id" = Uuid, Path, description = "ID do agendamento")),
    responses(
        (status = 200, description = "Agendamento atualizado", body = AgendamentoDetalhe),
        (status = 404, description = "Agendamento não encontrado"),
        (status = 409, description = "Agendamento já concluído ou cancelado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_agendamento(
    State(app_state): State<AppState>,
    locale: Locale,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateAgendamentoPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let agendamento = app_state
        .agendamento_service
        .update(id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(agendamento)))
}

// PUT|PATCH /api/agendamentos/{id}/status
#[utoipa::path(
    patch,
    path = "/api/agendamentos/{id}/status",
    tag = "Agendamentos",
    request_body = UpdateStatusPayload,
    params(("id" = Uuid, Path, description = "ID do agendamento")),
    responses(
        (status = 200, description = "Status alterado (ou já estava nele)", body = AgendamentoDetalhe),
        (status = 404, description = "Agendamento não encontrado"),
        (status = 409, description = "Transição não permitida")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_status(
    State(app_state): State<AppState>,
    locale: Locale,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateStatusPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let agendamento = app_state
        .agendamento_service
        .update_status(id, payload.status)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(agendamento)))
}

// DELETE /api/agendamentos/{id}
#[utoipa::path(
    delete,
    path = "/api/agendamentos/{id}",
    tag = "Agendamentos",
    params(("id" = Uuid, Path, description = "ID do agendamento")),
    responses(
        (status = 204, description = "Agendamento removido"),
        (status = 404, description = "Agendamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_agendamento(
    State(app_state): State<AppState>,
    locale: Locale,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let removed = app_state
        .agendamento_repo
        .delete(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    if !removed {
        return Err(AppError::NotFound("agendamento").to_api_error(&locale, &app_state.i18n_store));
    }

    tracing::info!("Agendamento {} removido", id);
    Ok(StatusCode::NO_CONTENT)
}

// GET /api/agendamentos/{id}/comprovante
#[utoipa::path(
    get,
    path = "/api/agendamentos/{id}/comprovante",
    tag = "Agendamentos",
    params(("id" = Uuid, Path, description = "ID do agendamento")),
    responses(
        (status = 200, description = "Comprovante em PDF", content_type = "application/pdf", body = Vec<u8>),
        (status = 404, description = "Agendamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn generate_comprovante(
    State(app_state): State<AppState>,
    locale: Locale,
    AppPath(id): AppPath<Uuid>,
) -> Result<Response, ApiError> {
    let pdf_bytes = app_state
        .document_service
        .generate_comprovante(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    // Configura os Headers para o navegador baixar ou mostrar o PDF
    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"comprovante_{}.pdf\"", id),
        ),
    ];

    Ok((headers, pdf_bytes).into_response())
}
