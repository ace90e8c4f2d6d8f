use anyhow::Context;

use itemhub_infra::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    itemhub_observability::init();

    let config = ServerConfig::from_env().context("invalid configuration")?;
    let app = itemhub_api::app::build_app(&config);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(homepage = ?config.homepage, "listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
