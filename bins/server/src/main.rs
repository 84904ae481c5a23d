//! Vitrine server
//!
//! Main entry point for the Vitrine front/back-office service.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vitrine_http::content_catalog::ContentCatalog;
use vitrine_http::session::SessionStore;
use vitrine_http::wallet_book::WalletBooks;
use vitrine_http::{create_router, AppState};
use vitrine_shared::AppConfig;
use vitrine_store::{FileCache, MemoryRedirectStore, TenantCatalog};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vitrine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Open the cache files and hydrate the in-memory stores
    let file_cache = FileCache::on_fs(
        &config.cache.dir,
        config.cache.domains_file.clone(),
        config.cache.redirections_file.clone(),
    )?;
    let snapshot = file_cache.load().await?;
    info!(
        tenants = snapshot.tenants.len(),
        redirects = snapshot.redirects.len(),
        "cache files loaded"
    );

    let catalog = TenantCatalog::new();
    catalog.rebuild(snapshot.tenants);
    let redirects = MemoryRedirectStore::new();
    redirects.rebuild(snapshot.redirects);

    // Create application state
    let state = AppState {
        config: Arc::new(config.clone()),
        catalog: Arc::new(catalog),
        redirects: Arc::new(redirects),
        file_cache: Arc::new(file_cache),
        sessions: Arc::new(SessionStore::new()),
        content: Arc::new(ContentCatalog::new()),
        wallets: Arc::new(WalletBooks::new()),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
