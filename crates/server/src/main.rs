use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cardshelf_core::{
    load_config, save_catalog, validate_config, CatalogSource, Config, FileCatalogSource,
    HttpCatalogSource,
};
use cardshelf_server::{create_router, AppState, CatalogSnapshot};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("CARDSHELF_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Catalog path: {:?}", config.catalog.path);

    // Create remote source if configured
    let source: Option<Arc<dyn CatalogSource>> = match &config.source {
        Some(source_config) => {
            let client = HttpCatalogSource::new(source_config.clone())
                .context("Failed to create catalog source")?;
            info!("Catalog source: {}", client.endpoint());
            Some(Arc::new(client))
        }
        None => {
            info!("No catalog source configured, refresh disabled");
            None
        }
    };

    let catalog = load_initial_catalog(&config, source.as_deref()).await?;
    info!(
        "Loaded {} records from {}",
        catalog.records.len(),
        catalog.origin
    );

    // Create app state
    let state = Arc::new(AppState::new(config.clone(), catalog, source));

    // Create router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

/// Read the catalog file, fetching it first when it is missing and the
/// source allows fetching at startup. Without either, start empty.
async fn load_initial_catalog(
    config: &Config,
    source: Option<&dyn CatalogSource>,
) -> Result<CatalogSnapshot> {
    let path = &config.catalog.path;

    if path.exists() {
        let file = FileCatalogSource::new(path.clone());
        let document = file
            .fetch(None)
            .await
            .with_context(|| format!("Failed to load catalog from {:?}", path))?;
        return Ok(CatalogSnapshot::new(document, path.display().to_string()));
    }

    let fetch_on_startup = config.source.as_ref().is_some_and(|s| s.fetch_on_startup);
    match source {
        Some(source) if fetch_on_startup => {
            info!("Catalog file {:?} missing, fetching from '{}'", path, source.name());
            let document = source
                .fetch(None)
                .await
                .context("Failed to fetch catalog at startup")?;
            save_catalog(path, &document)
                .with_context(|| format!("Failed to save catalog to {:?}", path))?;
            Ok(CatalogSnapshot::new(document, source.name()))
        }
        _ => {
            warn!("Catalog file {:?} missing, starting with an empty catalog", path);
            Ok(CatalogSnapshot::new(
                cardshelf_core::CatalogDocument::from_records(Vec::new()),
                "empty",
            ))
        }
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
