use anyhow::{Context, Result};
use icsr_api::config::ApiConfig;
use icsr_api::routes::app_router;
use icsr_api::AppState;
use icsr_service::{FsArtifactStore, IcsrService};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ApiConfig::from_env()?;
    let service = IcsrService::new(config.reference()?, FsArtifactStore::new(&config.artifact_dir));
    let app = app_router(AppState::new(service));

    let listener = TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
