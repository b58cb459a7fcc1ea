//! GeneFunc Server - Main entry point

use anyhow::Result;
use genefunc_common::logging::{init_logging, LogConfig};
use tracing::info;

use genefunc_server::{api, config::Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Make .env values visible to the logging configuration as well
    dotenvy::dotenv().ok();

    let log_config = LogConfig::builder()
        .log_file_prefix("genefunc-server")
        .filter_directives("genefunc_server=debug,tower_http=debug,reqwest=info")
        .build();

    // Environment variables take precedence
    let log_config = log_config.merge_env()?;

    let _log_guard = init_logging(&log_config)?;

    info!("Starting GeneFunc Server");

    let config = Config::load()?;
    info!(
        "Configuration loaded - server will bind to {}:{}",
        config.server.host, config.server.port
    );

    api::serve(config).await
}
