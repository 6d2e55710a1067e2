use sentiment_widget::{router, AnalysisClient, AppState, Config, JsonFileStore, ReqwestTransport};
use std::{net::SocketAddr, sync::Arc};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    let store = JsonFileStore::open(&config.data_path);
    info!("state file: {}", store.path().display());

    let transport = ReqwestTransport::new(config.request_timeout)?;
    let client = AnalysisClient::new(Arc::new(transport), config.analyze_url.clone());
    info!(
        "analysis endpoint: {} (timeout {:?})",
        client.endpoint(),
        config.request_timeout
    );

    let app = router(AppState::new(store, client));
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}
