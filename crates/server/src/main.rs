use std::sync::Arc;

use anyhow::Context;
use app_state::{InitOnce, RuntimeInfo};
use metadata_client::MetadataClient;
use server::{AppState, ServerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static RUNTIME: InitOnce<Arc<RuntimeInfo>> = InitOnce::new("runtime info");

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    let runtime = RUNTIME.install(Arc::new(RuntimeInfo::new(env!("CARGO_PKG_VERSION"))))?;

    let metadata =
        MetadataClient::new(config.metadata.clone()).context("failed to build metadata client")?;
    let state = AppState::new(Arc::new(metadata), Arc::clone(runtime));

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, version = runtime.version(), "showcase server listening");

    axum::serve(listener, server::router(state)).await?;
    Ok(())
}
