//! Cache warmer for Vitrine.
//!
//! Reads a source fixture (tenants + legacy-redirect mappings), validates
//! tenant invariants, and rewrites both cache files wholesale. The running
//! service picks the new content up on its next cache rebuild.
//!
//! Usage: cargo run --bin warmer [source.json]

use vitrine_shared::AppConfig;
use vitrine_store::{CacheSnapshot, FileCache};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let source_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "fixtures/source.json".to_string());

    let config = AppConfig::load().expect("Failed to load configuration");

    println!("Reading source fixture from {source_path}...");
    let raw = std::fs::read(&source_path).expect("Failed to read source fixture");
    let snapshot: CacheSnapshot =
        serde_json::from_slice(&raw).expect("Source fixture is not valid JSON");

    println!("Validating {} tenant(s)...", snapshot.tenants.len());
    for tenant in &snapshot.tenants {
        tenant.configuration.validate().unwrap_or_else(|e| {
            panic!(
                "Invalid configuration for website {}: {e}",
                tenant.website.id
            )
        });
    }

    println!("Writing cache files to {}...", config.cache.dir);
    let cache = FileCache::on_fs(
        &config.cache.dir,
        config.cache.domains_file.clone(),
        config.cache.redirections_file.clone(),
    )
    .expect("Failed to open cache directory");
    cache
        .rebuild(&snapshot)
        .await
        .expect("Failed to write cache files");

    println!(
        "Done: {} tenant(s), {} redirect(s).",
        snapshot.tenants.len(),
        snapshot.redirects.len()
    );
}
