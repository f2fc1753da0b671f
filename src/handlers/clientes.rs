// src/handlers/clientes.rs

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
    models::{
        agendamento::{Agendamento, FiltroAgendamentos},
        cliente::{BuscaClientes, Cliente, ClientePayload},
        veiculo::Veiculo,
    },
};

// GET /api/clientes
#[utoipa::path(
    get,
    path = "/api/clientes",
    tag = "Clientes",
    params(BuscaClientes),
    responses(
        (status = 200, description = "Clientes ordenados por nome", body = Vec<Cliente>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_clientes(
    State(app_state): State<AppState>,
    locale: Locale,
    AppQuery(query): AppQuery<BuscaClientes>,
) -> Result<impl IntoResponse, ApiError> {
    let clientes = app_state
        .cliente_repo
        .list(query.busca.as_deref())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(clientes)))
}

// GET /api/clientes/{id}
#[utoipa::path(
    get,
    path = "/api/clientes/{id}",
    tag = "Clientes",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Cliente", body = Cliente),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_cliente(
    State(app_state): State<AppState>,
    locale: Locale,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let cliente = app_state
        .cliente_repo
        .find_by_id(id)
        .await
        .and_then(|c| c.ok_or(AppError::NotFound("cliente")))
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(cliente)))
}

// POST /api/clientes
#[utoipa::path(
    post,
    path = "/api/clientes",
    tag = "Clientes",
    request_body = ClientePayload,
    responses(
        (status = 201, description = "Cliente criado", body = Cliente),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "E-mail ou CPF já cadastrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_cliente(
    State(app_state): State<AppState>,
    locale: Locale,
    AppJson(payload): AppJson<ClientePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let cliente = app_state
        .cliente_repo
        .create(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(cliente)))
}

// PUT /api/clientes/{id}
#[utoipa::path(
    put,
    path = "/api/clientes/{id}",
    tag = "Clientes",
    request_body = ClientePayload,
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Cliente atualizado", body = Cliente),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_cliente(
    State(app_state): State<AppState>,
    locale: Locale,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<ClientePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let cliente = app_state
        .cliente_repo
        .update(id, &payload)
        .await
        .and_then(|c| c.ok_or(AppError::NotFound("cliente")))
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(cliente)))
}

// DELETE /api/clientes/{id}
#[utoipa::path(
    delete,
    path = "/api/clientes/{id}",
    tag = "Clientes",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 204, description = "Cliente removido (com seus veículos)"),
        (status = 404, description = "Cliente não encontrado"),
        (status = 409, description = "Cliente possui agendamentos")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_cliente(
    State(app_state): State<AppState>,
    locale: Locale,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let removed = app_state
        .cliente_repo
        .delete(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    if !removed {
        return Err(AppError::NotFound("cliente").to_api_error(&locale, &app_state.i18n_store));
    }

    Ok(StatusCode::NO_CONTENT)
}

// GET /api/clientes/{id}/veiculos
#[utoipa::path(
    get,
    path = "/api/clientes/{id}/veiculos",
    tag = "Clientes",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Veículos do cliente", body = Vec<Veiculo>),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_veiculos_do_cliente(
    State(app_state): State<AppState>,
    locale: Locale,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    ensure_cliente(&app_state, &locale, id).await?;

    let veiculos = app_state
        .veiculo_repo
        .list(Some(id))
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(veiculos)))
}

// GET /api/clientes/{id}/agendamentos
#[utoipa::path(
    get,
    path = "/api/clientes/{id}/agendamentos",
    tag = "Clientes",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Histórico de agendamentos do cliente", body = Vec<Agendamento>),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_agendamentos_do_cliente(
    State(app_state): State<AppState>,
    locale: Locale,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    ensure_cliente(&app_state, &locale, id).await?;

    let filtro = FiltroAgendamentos {
        cliente_id: Some(id),
        ..Default::default()
    };
    let agendamentos = app_state
        .agendamento_repo
        .list(&filtro)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(agendamentos)))
}

// Sub-recursos de um cliente inexistente respondem 404, não lista vazia
async fn ensure_cliente(app_state: &AppState, locale: &Locale, id: Uuid) -> Result<(), ApiError> {
    app_state
        .cliente_repo
        .find_by_id(id)
        .await
        .and_then(|c| c.map(|_| ()).ok_or(AppError::NotFound("cliente")))
        .map_err(|e| e.to_api_error(locale, &app_state.i18n_store))
}
