//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Runtime application settings.
    pub app: RuntimeConfig,
    /// Cache file configuration.
    pub cache: CacheConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Runtime application settings.
#[derive(Debug, Clone, Deserialize)]
pub struct RuntimeConfig {
    /// Deployment environment name (`dev`, `prod`).
    #[serde(default = "default_env")]
    pub env: String,
    /// Debug mode. Disables CSP emission and reveals error detail.
    #[serde(default)]
    pub debug: bool,
    /// Canonical scheme for redirect targets (`http` or `https`).
    #[serde(default = "default_protocol")]
    pub protocol: String,
    /// Secret segment of the admin path prefix (`/admin-<token>`).
    pub security_token: String,
}

fn default_env() -> String {
    "dev".to_string()
}

fn default_protocol() -> String {
    "https".to_string()
}

impl RuntimeConfig {
    /// Returns the admin path prefix, e.g. `/admin-s3cret`.
    #[must_use]
    pub fn admin_prefix(&self) -> String {
        format!("/admin-{}", self.security_token)
    }
}

/// Cache file configuration.
///
/// Cache files are regenerated wholesale by the warmer binary and consumed
/// read-only by the running service.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Directory holding the cache files.
    #[serde(default = "default_cache_dir")]
    pub dir: String,
    /// Domain snapshot file name.
    #[serde(default = "default_domains_file")]
    pub domains_file: String,
    /// Legacy-redirect mapping file name.
    #[serde(default = "default_redirections_file")]
    pub redirections_file: String,
}

fn default_cache_dir() -> String {
    "var/cache".to_string()
}

fn default_domains_file() -> String {
    "domains.cache.json".to_string()
}

fn default_redirections_file() -> String {
    "redirections.cache".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("VITRINE").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
