//src/main.rs

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use lavajato::config::{AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Nível padrão quando RUST_LOG não está definido
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("lavajato=info,tower_http=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    // Se a configuração falhar, a aplicação não deve iniciar
    let config = Config::from_env()?;
    let addr = config.server_addr;

    let app_state = AppState::new(config).await?;

    // Faz o app rodar as migrações do SQLx na inicialização
    sqlx::migrate!().run(&app_state.db_pool).await?;
    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let app = lavajato::app(app_state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);
    tracing::info!("📚 Documentação em http://{}/swagger-ui", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
