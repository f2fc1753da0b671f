// src/handlers/funcionarios.rs

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
    middleware::{
        extract::{AppJson, AppPath},
        i18n::Locale,
        rbac::{RequireAdmin, RequireRole},
    },
    models::funcionario::{CreateFuncionarioPayload, Funcionario, UpdateFuncionarioPayload},
    services::auth::hash_password,
};

// GET /api/funcionarios
#[utoipa::path(
    get,
    path = "/api/funcionarios",
    tag = "Funcionarios",
    responses(
        (status = 200, description = "Funcionários", body = Vec<Funcionario>),
        (status = 403, description = "Apenas ADMIN")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_funcionarios(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: RequireAdmin,
) -> Result<impl IntoResponse, ApiError> {
    let funcionarios = app_state
        .funcionario_repo
        .list()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(funcionarios)))
}

#[utoipa::path(
    get,
    path = "/api/funcionarios/{id}",
    tag = "Funcionarios",
    params(("id" = Uuid, Path, description = "ID do funcionário")),
    responses(
        (status = 200, description = "Funcionário", body = Funcionario),
        (status = 404, description = "Funcionário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_funcionario(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: RequireAdmin,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let funcionario = app_state
        .funcionario_repo
        .find_by_id(id)
        .await
        .and_then(|f| f.ok_or(AppError::NotFound("funcionario")))
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(funcionario)))
}

#[utoipa::path(
    post,
    path = "/api/funcionarios",
    tag = "Funcionarios",
    request_body = CreateFuncionarioPayload,
    responses(
        (status = 201, description = "Funcionário criado", body = Funcionario),
        (status = 409, description = "E-mail já cadastrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_funcionario(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: RequireAdmin,
    AppJson(payload): AppJson<CreateFuncionarioPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let hashed_password = hash_password(&payload.senha)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let funcionario = app_state
        .funcionario_repo
        .create(
            payload.nome.trim(),
            payload.email.trim(),
            &hashed_password,
            payload.telefone.as_deref(),
            payload.cargo.as_deref(),
            payload.role,
            payload.ativo,
        )
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(funcionario)))
}

#[utoipa::path(
    put,
    path = "/api/funcionarios/{id}",
    tag = "Funcionarios",
    request_body = UpdateFuncionarioPayload,
    params(("id" = Uuid, Path, description = "ID do funcionário")),
    responses(
        (status = 200, description = "Funcionário atualizado", body = Funcionario),
        (status = 403, description = "Admin tentando se desativar ou perder o cargo"),
        (status = 404, description = "Funcionário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_funcionario(
    State(app_state): State<AppState>,
    locale: Locale,
    RequireRole(admin, _): RequireAdmin,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateFuncionarioPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    // O admin logado não pode se trancar para fora
    if admin.id == id && (!payload.ativo || payload.role != admin.role) {
        return Err(AppError::SelfModification.to_api_error(&locale, &app_state.i18n_store));
    }

    let hashed_password = match payload.nova_senha.as_deref() {
        Some(senha) => Some(
            hash_password(senha)
                .await
                .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?,
        ),
        None => None,
    };

    let funcionario = app_state
        .funcionario_repo
        .update(
            id,
            payload.nome.trim(),
            payload.email.trim(),
            hashed_password.as_deref(),
            payload.telefone.as_deref(),
            payload.cargo.as_deref(),
            payload.role,
            payload.ativo,
        )
        .await
        .and_then(|f| f.ok_or(AppError::NotFound("funcionario")))
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(funcionario)))
}

#[utoipa::path(
    delete,
    path = "/api/funcionarios/{id}",
    tag = "Funcionarios",
    params(("id" = Uuid, Path, description = "ID do funcionário")),
    responses(
        (status = 204, description = "Funcionário removido"),
        (status = 403, description = "Admin tentando remover a própria conta"),
        (status = 404, description = "Funcionário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_funcionario(
    State(app_state): State<AppState>,
    locale: Locale,
    RequireRole(admin, _): RequireAdmin,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    if admin.id == id {
        return Err(AppError::SelfModification.to_api_error(&locale, &app_state.i18n_store));
    }

    let removed = app_state
        .funcionario_repo
        .delete(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    if !removed {
        return Err(AppError::NotFound("funcionario").to_api_error(&locale, &app_state.i18n_store));
    }

    tracing::info!("Funcionário {} removido por {}", id, admin.id);
    Ok(StatusCode::NO_CONTENT)
}
