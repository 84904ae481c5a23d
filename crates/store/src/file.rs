//! Persisted cache files via OpenDAL.
//!
//! Two files live under the cache directory: `domains.cache.json` (tenant
//! snapshots, including their domains) and `redirections.cache`
//! (legacy-URL mappings). Both are regenerated entirely by the warmer —
//! never incrementally — and consumed read-only by the running service.

use opendal::{services, ErrorKind, Operator};
use serde::{Deserialize, Serialize};
use tracing::warn;

use vitrine_core::redirect::RedirectKey;
use vitrine_core::tenant::TenantSnapshot;

use crate::error::StoreError;

/// One legacy-redirect mapping as persisted in `redirections.cache`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectEntry {
    /// Lookup key.
    pub key: RedirectKey,
    /// Absolute or path-relative redirect target.
    pub target: String,
}

/// Everything the cache files hold.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheSnapshot {
    /// Tenant snapshots from the domain file.
    pub tenants: Vec<TenantSnapshot>,
    /// Legacy-redirect mappings.
    pub redirects: Vec<RedirectEntry>,
}

/// Reader/writer for the persisted cache files.
pub struct FileCache {
    operator: Operator,
    domains_file: String,
    redirections_file: String,
}

impl FileCache {
    /// Opens a cache rooted in a filesystem directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the operator cannot be built.
    pub fn on_fs(
        dir: &str,
        domains_file: impl Into<String>,
        redirections_file: impl Into<String>,
    ) -> Result<Self, StoreError> {
        let builder = services::Fs::default().root(dir);
        Ok(Self {
            operator: Operator::new(builder)?.finish(),
            domains_file: domains_file.into(),
            redirections_file: redirections_file.into(),
        })
    }

    /// Opens an in-memory cache (tests, ephemeral environments).
    ///
    /// # Errors
    ///
    /// Returns an error if the operator cannot be built.
    pub fn in_memory() -> Result<Self, StoreError> {
        let builder = services::Memory::default();
        Ok(Self {
            operator: Operator::new(builder)?.finish(),
            domains_file: "domains.cache.json".to_string(),
            redirections_file: "redirections.cache".to_string(),
        })
    }

    /// Loads both cache files. A missing file loads as empty — the
    /// service can start cold and serve tenant-not-found until warmed.
    ///
    /// # Errors
    ///
    /// Returns an error on backend failures or malformed content.
    pub async fn load(&self) -> Result<CacheSnapshot, StoreError> {
        let tenants = self.read_json(&self.domains_file).await?.unwrap_or_default();
        let redirects = self
            .read_json(&self.redirections_file)
            .await?
            .unwrap_or_default();
        Ok(CacheSnapshot { tenants, redirects })
    }

    /// Rewrites both cache files wholesale.
    ///
    /// # Errors
    ///
    /// Returns an error on backend failures or unencodable content.
    pub async fn rebuild(&self, snapshot: &CacheSnapshot) -> Result<(), StoreError> {
        self.write_json(&self.domains_file, &snapshot.tenants)
            .await?;
        self.write_json(&self.redirections_file, &snapshot.redirects)
            .await
    }

    async fn read_json<T: serde::de::DeserializeOwned>(
        &self,
        file: &str,
    ) -> Result<Option<T>, StoreError> {
        let buffer = match self.operator.read(file).await {
            Ok(buffer) => buffer,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(file, "cache file missing, loading empty");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_slice(&buffer.to_vec())
            .map(Some)
            .map_err(|source| StoreError::Format {
                file: file.to_string(),
                source,
            })
    }

    async fn write_json<T: Serialize>(&self, file: &str, value: &T) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(value).map_err(|source| StoreError::Encode {
            file: file.to_string(),
            source,
        })?;
        self.operator.write(file, bytes).await?;
        Ok(())
    }
}
