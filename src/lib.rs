pub mod catalog;
pub mod config;
pub mod db;
pub mod favorites;
pub mod feed;
pub mod middleware;
pub mod model;
pub mod server;
pub mod views;

use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

use crate::db::LocalStorage;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Database error: {0}")]
    Database(#[from] db::DbError),
    #[error("Catalog client error: {0}")]
    Catalog(#[from] catalog::FetchError),
    #[error("Server error: {0}")]
    Server(String),
}

pub async fn run(config_path: &str, debug_logs: bool) -> Result<(), ServerError> {
    let mut config = config::Config::from_file(config_path)?;
    config.debug_logs = debug_logs;

    info!("Using config file: {}", config_path);
    if debug_logs {
        info!("Debug logging enabled");
    }

    let api_key = config.api_key()?;
    let catalog = Arc::new(catalog::TmdbClient::new(&config.catalog, &api_key)?);
    info!("Catalog at {}", config.catalog.base_url);

    let storage: Arc<dyn LocalStorage> = match config.get_database_path() {
        Some(db_path) => {
            info!("Opening database at {}", db_path);
            Arc::new(db::SqliteRepository::new(&db_path).await?)
        }
        None => {
            warn!("No database configured, favorites will not survive a restart");
            Arc::new(db::MemoryStorage::new())
        }
    };
    let favorites = Arc::new(favorites::FavoritesStore::new(
        storage,
        &config.favorites.storage_key,
    ));

    let address = config.listen.address.as_deref().unwrap_or("[::]");
    let port = &config.listen.port;
    let addr: SocketAddr = format!("{}:{}", address, port)
        .parse()
        .map_err(|e| ServerError::Server(format!("Invalid address: {}", e)))?;

    let tls = match (&config.listen.tlscert, &config.listen.tlskey) {
        (Some(cert), Some(key)) => Some((cert.clone(), key.clone())),
        _ => None,
    };

    let state = server::AppState::new(config, catalog, favorites);
    let app = server::build_router(state);

    if let Some((cert_path, key_path)) = tls {
        info!("Loading TLS certificate from {}", cert_path);
        info!("Loading TLS key from {}", key_path);

        let tls_config = axum_server::tls_rustls::RustlsConfig::from_pem_file(&cert_path, &key_path)
            .await
            .map_err(|e| ServerError::Server(format!("Failed to load TLS config: {}", e)))?;

        info!("Serving HTTPS on {}", addr);

        axum_server::bind_rustls(addr, tls_config)
            .serve(app.into_make_service())
            .await
            .map_err(|e| ServerError::Server(format!("Server error: {}", e)))?;
    } else {
        info!("Serving HTTP on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Server(format!("Failed to bind: {}", e)))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Server(format!("Server error: {}", e)))?;
    }

    Ok(())
}
