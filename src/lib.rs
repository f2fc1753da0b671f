// src/lib.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use crate::config::{AppState, Config};
use crate::docs::ApiDoc;
use crate::middleware::auth::auth_guard;

/// Monta o router completo da API. Usado pelo `main` e pelos testes de integração.
pub fn app(app_state: AppState) -> Router {
    // Rotas protegidas recebem o guard via route_layer (404/405 não passam por ele)
    let guard = axum_middleware::from_fn_with_state(app_state.clone(), auth_guard);

    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .merge(
            Router::new()
                .route("/me", get(handlers::auth::get_me))
                .route_layer(guard.clone()),
        );

    let clientes_routes = Router::new()
        .route(
            "/",
            get(handlers::clientes::list_clientes).post(handlers::clientes::create_cliente),
        )
        .route(
            "/{id}",
            get(handlers::clientes::get_cliente)
                .put(handlers::clientes::update_cliente)
                .delete(handlers::clientes::delete_cliente),
        )
        .route("/{id}/veiculos", get(handlers::clientes::list_veiculos_do_cliente))
        .route("/{id}/agendamentos", get(handlers::clientes::list_agendamentos_do_cliente))
        .route_layer(guard.clone());

    let veiculos_routes = Router::new()
        .route(
            "/",
            get(handlers::veiculos::list_veiculos).post(handlers::veiculos::create_veiculo),
        )
        .route(
            "/{id}",
            get(handlers::veiculos::get_veiculo)
                .put(handlers::veiculos::update_veiculo)
                .delete(handlers::veiculos::delete_veiculo),
        )
        .route_layer(guard.clone());

    // Leitura do catálogo é pública (site institucional)
    let categorias_routes = Router::new()
        .route("/", get(handlers::categorias::list_categorias))
        .route("/{id}", get(handlers::categorias::get_categoria))
        .merge(
            Router::new()
                .route("/", post(handlers::categorias::create_categoria))
                .route(
                    "/{id}",
                    put(handlers::categorias::update_categoria)
                        .delete(handlers::categorias::delete_categoria),
                )
                .route_layer(guard.clone()),
        );

    let servicos_routes = Router::new()
        .route("/", get(handlers::servicos::list_servicos))
        .route("/{id}", get(handlers::servicos::get_servico))
        .merge(
            Router::new()
                .route("/", post(handlers::servicos::create_servico))
                .route(
                    "/{id}",
                    put(handlers::servicos::update_servico)
                        .delete(handlers::servicos::delete_servico),
                )
                .route_layer(guard.clone()),
        );

    let funcionarios_routes = Router::new()
        .route(
            "/",
            get(handlers::funcionarios::list_funcionarios)
                .post(handlers::funcionarios::create_funcionario),
        )
        .route(
            "/{id}",
            get(handlers::funcionarios::get_funcionario)
                .put(handlers::funcionarios::update_funcionario)
                .delete(handlers::funcionarios::delete_funcionario),
        )
        .route_layer(guard.clone());

    let agendamentos_routes = Router::new()
        .route(
            "/",
            get(handlers::agendamentos::list_agendamentos)
                .post(handlers::agendamentos::create_agendamento),
        )
        .route("/todos", get(handlers::agendamentos::list_todos))
        .route(
            "/{id}",
            get(handlers::agendamentos::get_agendamento)
                .put(handlers::agendamentos::update_agendamento)
                .delete(handlers::agendamentos::delete_agendamento),
        )
        .route(
            "/{id}/status",
            put(handlers::agendamentos::update_status)
                .patch(handlers::agendamentos::update_status),
        )
        .route("/{id}/comprovante", get(handlers::agendamentos::generate_comprovante))
        .route_layer(guard.clone());

    let empresa_routes = Router::new()
        .route("/", get(handlers::empresa::get_empresa))
        .route("/horarios", get(handlers::empresa::get_horarios))
        .route("/status", get(handlers::empresa::get_status))
        .route("/contatos", get(handlers::empresa::list_contatos))
        .merge(
            Router::new()
                .route("/", put(handlers::empresa::update_empresa))
                .route("/horarios", put(handlers::empresa::update_horarios))
                .route("/contatos", post(handlers::empresa::create_contato))
                .route(
                    "/contatos/{id}",
                    put(handlers::empresa::update_contato)
                        .delete(handlers::empresa::delete_contato),
                )
                .route_layer(guard.clone()),
        );

    let dashboard_routes = Router::new()
        .route("/estatisticas", get(handlers::dashboard::get_estatisticas))
        .route("/faturamento", get(handlers::dashboard::get_faturamento))
        .route("/servicos-populares", get(handlers::dashboard::get_servicos_populares))
        .route_layer(guard);

    let cors = cors_layer(&app_state.config);

    // Combina tudo no router principal
    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/clientes", clientes_routes)
        .nest("/api/veiculos", veiculos_routes)
        .nest("/api/categorias", categorias_routes)
        .nest("/api/servicos", servicos_routes)
        .nest("/api/funcionarios", funcionarios_routes)
        .nest("/api/agendamentos", agendamentos_routes)
        .nest("/api/empresa", empresa_routes)
        .nest("/api/dashboard", dashboard_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origin = match &config.cors_allowed_origin {
        Some(origin) => AllowOrigin::exact(origin.clone()),
        None => AllowOrigin::from(Any),
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
}
