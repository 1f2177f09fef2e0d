use std::sync::Arc;

use crate::{config, error, info, server, service::StatsService, spotify::SpotifyClient};

/// Runs the statistics HTTP API. Requests authorize with their own bearer
/// token; the stored CLI token is not used.
pub async fn serve(address: Option<String>) {
    let addr = address.unwrap_or_else(config::stats_server_addr);
    let service = Arc::new(StatsService::new(SpotifyClient::from_env()));

    info!("Serving statistics on http://{}", addr);
    if let Err(e) = server::start_stats_server(&addr, service).await {
        error!("Statistics server stopped. Err: {}", e);
    }
}
