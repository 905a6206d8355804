use std::sync::Arc;

use anyhow::Context;

use natours_api::app::{self, services::AppServices};
use natours_infra::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("invalid configuration")?;
    natours_observability::init(config.log_format);

    let services = AppServices::from_config(&config)
        .with_context(|| format!("failed to load tours from {}", config.tours_file.display()))?;
    let app = app::build_app(Arc::new(services));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    let addr = listener.local_addr()?;
    tracing::info!(id_check = ?config.id_check, "App running on {addr}...");

    axum::serve(listener, app).await?;
    Ok(())
}
