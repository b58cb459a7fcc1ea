pub mod response;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tokio::signal;
use tower_http::compression::CompressionLayer;
use tracing::info;

use crate::config::Config;
use crate::error::AppError;
use crate::features::{self, gene_functions::summarize_gene_functions, FeatureState};
use crate::idmapping::IdMappingClient;
use crate::middleware;

/// Every route lives under this prefix.
pub const API_PREFIX: &str = "/api/v1";

/// Plain-text body returned for any path outside [`API_PREFIX`].
pub const UNSUPPORTED_PATH_MESSAGE: &str = "Current only support /api/v1/*";

/// Build the UniProt client from `config` and serve until a shutdown signal
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let client = IdMappingClient::new(config.uniprot.clone())?;
    info!(base_url = %config.uniprot.base_url, "UniProt client initialized");

    let state = FeatureState::new(Arc::new(client), config.uniprot.poll.clone());
    let app = create_router(state, &config);

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(config.server.shutdown_timeout_secs))
        .await?;

    info!("Server shut down gracefully");

    Ok(())
}

/// Create the application router with all routes and middleware
pub fn create_router(state: FeatureState, config: &Config) -> Router {
    let api_v1 = features::router(state.clone()).route("/health", get(health));

    Router::new()
        .route(API_PREFIX, post(summarize_gene_functions).with_state(state))
        .nest(API_PREFIX, api_v1)
        .fallback(fallback)
        // Apply layers from innermost to outermost
        .layer(CompressionLayer::new())
        .layer(middleware::tracing_layer())
        .layer(middleware::cors_layer(&config.cors))
        .layer(middleware::catch_panic_layer())
}

/// True for `/api/v1` itself and anything below it
pub fn is_api_path(path: &str) -> bool {
    path.strip_prefix(API_PREFIX)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

async fn fallback(uri: Uri) -> Response {
    if is_api_path(uri.path()) {
        AppError::NotFound(format!("No route for {}", uri.path())).into_response()
    } else {
        (StatusCode::NOT_FOUND, UNSUPPORTED_PATH_MESSAGE).into_response()
    }
}

async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "name": "GeneFunc Server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn shutdown_signal(timeout_secs: u64) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown");
        },
    }

    // Give in-flight mappings time to finish polling
    info!("Waiting up to {} seconds for connections to close", timeout_secs);
    tokio::time::sleep(Duration::from_secs(timeout_secs.min(5))).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_api_path() {
        assert!(is_api_path("/api/v1"));
        assert!(is_api_path("/api/v1/"));
        assert!(is_api_path("/api/v1/gene-functions"));
        assert!(!is_api_path("/api/v10"));
        assert!(!is_api_path("/api"));
        assert!(!is_api_path("/"));
        assert!(!is_api_path("/health"));
    }
}
