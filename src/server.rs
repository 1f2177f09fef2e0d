use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{Extension, Router, routing::get};
use tokio::sync::Mutex;
use tracing::info;

use crate::{
    api, config,
    error::{Result, StatsError},
    service::StatsService,
    source::ListeningSource,
    types::PkceToken,
};

fn parse_addr(addr: &str) -> Result<SocketAddr> {
    SocketAddr::from_str(addr)
        .map_err(|e| StatsError::config(format!("invalid server address {addr:?}: {e}")))
}

/// Serves the OAuth callback for `spotistats auth` on `SERVER_ADDRESS`.
pub async fn start_callback_server(state: Arc<Mutex<Option<PkceToken>>>) -> Result<()> {
    let app = Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback).layer(Extension(state)));

    let addr = parse_addr(&config::server_addr())?;
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Serves the statistics API until the process is stopped.
pub async fn start_stats_server<S>(addr: &str, service: Arc<StatsService<S>>) -> Result<()>
where
    S: ListeningSource + 'static,
{
    let addr = parse_addr(addr)?;
    let app = api::router(service, &config::cors_allowed_origins());

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Starting statistics API on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
