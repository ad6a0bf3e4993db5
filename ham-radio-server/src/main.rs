use std::process::ExitCode;
use std::sync::Arc;

use ham_radio_server::callook::{CachedCallook, CallookClient};
use ham_radio_server::config::ServerConfig;
use ham_radio_server::fetch::HttpClient;
use ham_radio_server::mcp::{McpServer, ToolContext};
use ham_radio_server::parks::{HttpDatasetSource, ReferenceCache};
use ham_radio_server::pota::PotaClient;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    // stdout carries the protocol, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let http = match HttpClient::new(&config.http_config()) {
        Ok(http) => http,
        Err(e) => {
            error!(error = %e, "failed to create HTTP client");
            return ExitCode::FAILURE;
        }
    };

    let dataset = HttpDatasetSource::new(http.clone(), &config.parks_csv_url);
    let callook = CallookClient::new(http.clone(), config.callook_config());
    let pota = Arc::new(PotaClient::new(http, config.pota_config()));

    let ctx = ToolContext {
        parks: Arc::new(ReferenceCache::new(Arc::new(dataset))),
        callsigns: Arc::new(CachedCallook::new(callook, &config.callook_cache_config())),
        park_details: pota.clone(),
        spots: pota,
    };

    info!(
        version = env!("CARGO_PKG_VERSION"),
        parks = %config.parks_csv_url,
        "ham radio MCP server listening on stdio"
    );

    match McpServer::new(ctx).run_stdio().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "server stopped");
            ExitCode::FAILURE
        }
    }
}
