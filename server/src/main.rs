//! Process entry point for the folio chat service.

use tracing_subscriber::EnvFilter;

use folio_server::{AppState, ServerConfig, build_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load a local .env if present; real deployments set the environment.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env();
    let state = AppState::from_config(&config);
    if state.engine.is_none() {
        tracing::warn!(
            "GOOGLE_API_KEY is not set — chat requests will fail until the credential is provided"
        );
    }

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!("chat service listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
