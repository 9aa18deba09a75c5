// src/bin/api_server.rs

use album_resource_server::infra::logging;
use album_resource_server::transport;
use album_resource_server::{AlbumService, JsonFileStore, ServerConfig};
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env();
    logging::init(album_resource_server::config::log_json())?;

    // --- Storage ---
    let store = JsonFileStore::new(&config.data_file);
    if tokio::fs::metadata(store.path()).await.is_err() {
        warn!(
            path = %store.path().display(),
            "data file missing; requests will fail until it exists (see `preflight --init-if-missing`)"
        );
    }

    // --- Service ---
    let album_service = AlbumService::new(Arc::new(store), config.serialize_writes);
    info!(
        data_file = %config.data_file.display(),
        serialize_writes = config.serialize_writes,
        fatal_storage_errors = config.fatal_storage_errors,
        "album service initialized"
    );

    let app_state = transport::http::AppState {
        album_service: Arc::new(album_service),
        fatal_storage_errors: config.fatal_storage_errors,
    };

    // --- API Server ---
    let app = transport::http::build_app(app_state, config.swagger_ui);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("server is running on http://{}", listener.local_addr()?);
    if config.swagger_ui {
        info!("swagger UI available at /swagger-ui");
    }

    tokio::select! {
        result = axum::serve(listener, app) => {
            if let Err(e) = &result {
                error!(error = %e, "server stopped");
            }
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received");
        }
    }

    Ok(())
}
