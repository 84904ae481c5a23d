//! In-memory directories and the redirect lookup cache.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use moka::sync::Cache;
use tracing::info;
use vitrine_shared::types::WebsiteId;

use vitrine_core::host::{DomainDirectory, DomainRecord, TenantDirectory};
use vitrine_core::redirect::{RedirectKey, RedirectLookup};
use vitrine_core::tenant::TenantSnapshot;

use crate::file::RedirectEntry;

/// In-memory tenant and domain directories, rebuilt wholesale.
///
/// Reads are lock-cheap clones of `Arc` snapshots; the only writer is the
/// rebuild path.
#[derive(Debug, Default)]
pub struct TenantCatalog {
    tenants: RwLock<HashMap<WebsiteId, Arc<TenantSnapshot>>>,
    hosts: RwLock<HashMap<String, DomainRecord>>,
}

impl TenantCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole catalog content with the given snapshots.
    pub fn rebuild(&self, snapshots: Vec<TenantSnapshot>) {
        let mut tenants = HashMap::new();
        let mut hosts = HashMap::new();

        for snapshot in snapshots {
            let website_id = snapshot.website.id;
            for domain in &snapshot.configuration.domains {
                hosts.insert(
                    domain.name.to_ascii_lowercase(),
                    DomainRecord {
                        website_id,
                        domain: domain.clone(),
                    },
                );
            }
            tenants.insert(website_id, Arc::new(snapshot));
        }

        info!(
            tenants = tenants.len(),
            domains = hosts.len(),
            "tenant catalog rebuilt"
        );

        *self.tenants.write().expect("catalog lock poisoned") = tenants;
        *self.hosts.write().expect("catalog lock poisoned") = hosts;
    }

    /// Number of known tenants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tenants.read().expect("catalog lock poisoned").len()
    }

    /// True when no tenant is loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TenantDirectory for TenantCatalog {
    fn snapshot(&self, id: WebsiteId) -> Option<Arc<TenantSnapshot>> {
        self.tenants
            .read()
            .expect("catalog lock poisoned")
            .get(&id)
            .cloned()
    }
}

impl DomainDirectory for TenantCatalog {
    fn by_host(&self, host: &str) -> Option<DomainRecord> {
        self.hosts
            .read()
            .expect("catalog lock poisoned")
            .get(host)
            .cloned()
    }
}

/// Legacy-redirect lookup backed by a concurrent cache.
///
/// No TTL and no eviction: entries live until the next wholesale rebuild,
/// matching the regenerate-entirely contract of the cache files.
pub struct MemoryRedirectStore {
    cache: Cache<RedirectKey, String>,
}

impl MemoryRedirectStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cache: Cache::builder().build(),
        }
    }

    /// Replaces the whole mapping with the given entries.
    pub fn rebuild(&self, entries: Vec<RedirectEntry>) {
        self.cache.invalidate_all();
        let count = entries.len();
        for entry in entries {
            self.cache.insert(entry.key, entry.target);
        }
        info!(entries = count, "redirect store rebuilt");
    }

    /// Number of entries currently stored.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }
}

impl Default for MemoryRedirectStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RedirectLookup for MemoryRedirectStore {
    fn get(&self, key: &RedirectKey) -> Option<String> {
        self.cache.get(key)
    }
}

#[cfg(test)]
mod tests {
    use vitrine_shared::Locale;

    use vitrine_core::tenant::{Configuration, Domain, SecurityPolicy, Website};

    use super::*;

    fn locale(tag: &str) -> Locale {
        Locale::parse(tag).unwrap()
    }

    fn snapshot(host: &str) -> TenantSnapshot {
        let website = Website::new("Site", "site");
        let id = website.id;
        let mut configuration = Configuration::new(id, locale("fr"));
        configuration
            .domains
            .push(Domain::new_default(host, locale("fr")));
        TenantSnapshot {
            website,
            configuration,
            security: SecurityPolicy::new(id),
        }
    }

    #[test]
    fn test_catalog_rebuild_replaces_content() {
        let catalog = TenantCatalog::new();
        let first = snapshot("a.example.com");
        let first_id = first.website.id;
        catalog.rebuild(vec![first]);

        assert!(catalog.by_host("a.example.com").is_some());
        assert!(catalog.snapshot(first_id).is_some());

        let second = snapshot("b.example.com");
        catalog.rebuild(vec![second]);

        assert!(catalog.by_host("a.example.com").is_none());
        assert!(catalog.snapshot(first_id).is_none());
        assert!(catalog.by_host("b.example.com").is_some());
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_redirect_store_rebuild_replaces_content() {
        let store = MemoryRedirectStore::new();
        let key = |url: &str| RedirectKey {
            locale: locale("fr"),
            website_id: WebsiteId::new(),
            url: url.to_string(),
        };

        let old = key("/old");
        store.rebuild(vec![RedirectEntry {
            key: old.clone(),
            target: "/new".to_string(),
        }]);
        assert_eq!(store.get(&old), Some("/new".to_string()));

        let newer = key("/older");
        store.rebuild(vec![RedirectEntry {
            key: newer.clone(),
            target: "/newer".to_string(),
        }]);
        assert_eq!(store.get(&old), None);
        assert_eq!(store.get(&newer), Some("/newer".to_string()));
        assert_eq!(store.entry_count(), 1);
    }
}
