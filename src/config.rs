// src/config.rs

use std::{env, net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Context;
use axum::http::HeaderValue;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    common::i18n::I18nStore,
    db::{
        AgendamentoRepository, CategoriaRepository, ClienteRepository, EmpresaRepository,
        FuncionarioRepository, ServicoRepository, VeiculoRepository,
    },
    services::{
        agendamento_service::AgendamentoService, auth::AuthService,
        dashboard_service::DashboardService, document_service::DocumentService,
        empresa_service::EmpresaService,
    },
};

// Configuração lida do ambiente (.env)
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub server_addr: SocketAddr,
    pub database_max_connections: u32,
    pub jwt_expiration_hours: i64,
    // Sem valor = qualquer origem
    pub cors_allowed_origin: Option<HeaderValue>,
    pub fonts_dir: String,
    pub pdf_font_family: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;

        let server_addr = env::var("SERVER_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .context("SERVER_ADDR inválido (esperado host:porta)")?;

        let database_max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .context("DATABASE_MAX_CONNECTIONS deve ser um número")?;

        let jwt_expiration_hours: i64 = env::var("JWT_EXPIRATION_HOURS")
            .unwrap_or_else(|_| "168".to_string())
            .parse()
            .context("JWT_EXPIRATION_HOURS deve ser um número")?;

        if jwt_expiration_hours <= 0 {
            anyhow::bail!("JWT_EXPIRATION_HOURS deve ser maior que zero");
        }

        let cors_allowed_origin = env::var("CORS_ALLOWED_ORIGIN")
            .ok()
            .filter(|origin| !origin.trim().is_empty())
            .map(|origin| origin.trim().parse::<HeaderValue>())
            .transpose()
            .context("CORS_ALLOWED_ORIGIN inválido")?;

        Ok(Self {
            database_url,
            jwt_secret,
            server_addr,
            database_max_connections,
            jwt_expiration_hours,
            cors_allowed_origin,
            fonts_dir: env::var("FONTS_DIR").unwrap_or_else(|_| "./fonts".to_string()),
            pdf_font_family: env::var("PDF_FONT_FAMILY").unwrap_or_else(|_| "Roboto".to_string()),
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub config: Arc<Config>,
    pub i18n_store: Arc<I18nStore>,

    // --- Repositórios ---
    pub funcionario_repo: FuncionarioRepository,
    pub cliente_repo: ClienteRepository,
    pub veiculo_repo: VeiculoRepository,
    pub categoria_repo: CategoriaRepository,
    pub servico_repo: ServicoRepository,
    pub agendamento_repo: AgendamentoRepository,
    pub empresa_repo: EmpresaRepository,

    // --- Serviços ---
    pub auth_service: AuthService,
    pub agendamento_service: AgendamentoService,
    pub dashboard_service: DashboardService,
    pub empresa_service: EmpresaService,
    pub document_service: DocumentService,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Self::from_pool(db_pool, config)
    }

    /// Monta o gráfico de dependências sobre um pool já criado.
    pub fn from_pool(db_pool: PgPool, config: Config) -> anyhow::Result<Self> {
        let i18n_store = Arc::new(I18nStore::load()?);

        let funcionario_repo = FuncionarioRepository::new(db_pool.clone());
        let cliente_repo = ClienteRepository::new(db_pool.clone());
        let veiculo_repo = VeiculoRepository::new(db_pool.clone());
        let categoria_repo = CategoriaRepository::new(db_pool.clone());
        let servico_repo = ServicoRepository::new(db_pool.clone());
        let agendamento_repo = AgendamentoRepository::new(db_pool.clone());
        let empresa_repo = EmpresaRepository::new(db_pool.clone());

        let auth_service = AuthService::new(
            funcionario_repo.clone(),
            config.jwt_secret.clone(),
            config.jwt_expiration_hours,
        );
        let empresa_service = EmpresaService::new(empresa_repo.clone());
        let agendamento_service = AgendamentoService::new(
            db_pool.clone(),
            agendamento_repo.clone(),
            veiculo_repo.clone(),
            servico_repo.clone(),
            empresa_repo.clone(),
        );
        let dashboard_service = DashboardService::new(agendamento_repo.clone(), servico_repo.clone());
        let document_service = DocumentService::new(
            db_pool.clone(),
            agendamento_repo.clone(),
            empresa_repo.clone(),
            config.fonts_dir.clone(),
            config.pdf_font_family.clone(),
        );

        Ok(Self {
            db_pool,
            config: Arc::new(config),
            i18n_store,
            funcionario_repo,
            cliente_repo,
            veiculo_repo,
            categoria_repo,
            servico_repo,
            agendamento_repo,
            empresa_repo,
            auth_service,
            agendamento_service,
            dashboard_service,
            empresa_service,
            document_service,
        })
    }
}
