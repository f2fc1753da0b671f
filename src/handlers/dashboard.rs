// src/handlers/dashboard.rs

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Local;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{extract::AppQuery, i18n::Locale},
    models::dashboard::{
        EstatisticasAgendamentos, EstatisticasQuery, FaturamentoQuery, RelatorioFaturamento,
        ServicoPopular, ServicosPopularesQuery,
    },
};

// GET /api/dashboard/estatisticas
#[utoipa::path(
    get,
    path = "/api/dashboard/estatisticas",
    tag = "Dashboard",
    params(EstatisticasQuery),
    responses(
        (status = 200, description = "Hoje, semana e mês comparados ao período anterior", body = EstatisticasAgendamentos),
        (status = 400, description = "Data de referência no limite do calendário"),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_estatisticas(
    State(app_state): State<AppState>,
    locale: Locale,
    AppQuery(query): AppQuery<EstatisticasQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let referencia = query.data.unwrap_or_else(|| Local::now().date_naive());

    let stats = app_state
        .dashboard_service
        .estatisticas(referencia)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(stats)))
}

// GET /api/dashboard/faturamento
#[utoipa::path(
    get,
    path = "/api/dashboard/faturamento",
    tag = "Dashboard",
    params(FaturamentoQuery),
    responses(
        (status = 200, description = "Faturamento dia a dia (dias sem movimento zerados)", body = RelatorioFaturamento),
        (status = 400, description = "Intervalo inválido ou maior que 366 dias")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_faturamento(
    State(app_state): State<AppState>,
    locale: Locale,
    AppQuery(query): AppQuery<FaturamentoQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let relatorio = app_state
        .dashboard_service
        .faturamento(query.inicio, query.fim)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(relatorio)))
}

// GET /api/dashboard/servicos-populares
#[utoipa::path(
    get,
    path = "/api/dashboard/servicos-populares",
    tag = "Dashboard",
    params(ServicosPopularesQuery),
    responses(
        (status = 200, description = "Ranking dos serviços mais agendados", body = Vec<ServicoPopular>)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_servicos_populares(
    State(app_state): State<AppState>,
    locale: Locale,
    AppQuery(query): AppQuery<ServicosPopularesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    query
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let ranking = app_state
        .dashboard_service
        .servicos_populares(query.limite as usize)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(ranking)))
}
