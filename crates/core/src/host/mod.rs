//! Host/domain to tenant resolution.
//!
//! Maps an inbound request host to a website and its configuration. In
//! admin/preview contexts an explicit website id wins over the host. The
//! resolver never fabricates defaults: no match means no tenant, and the
//! caller renders a tenant-not-found response.

use std::sync::Arc;

use vitrine_shared::types::WebsiteId;

use crate::tenant::{Domain, TenantSnapshot};

/// Source of tenant snapshots, rebuilt wholesale by the cache warmer.
pub trait TenantDirectory: Send + Sync {
    /// Returns the snapshot for a website id, if known.
    fn snapshot(&self, id: WebsiteId) -> Option<Arc<TenantSnapshot>>;
}

/// A domain record paired with its owning website, as stored in the
/// domain snapshot.
#[derive(Debug, Clone)]
pub struct DomainRecord {
    /// Owning website.
    pub website_id: WebsiteId,
    /// The matched domain.
    pub domain: Domain,
}

/// Hostname lookup over the domain snapshot.
pub trait DomainDirectory: Send + Sync {
    /// Returns the record whose hostname matches `host` (normalized).
    fn by_host(&self, host: &str) -> Option<DomainRecord>;
}

/// The outcome of host resolution.
#[derive(Debug, Clone)]
pub struct ResolvedSite {
    /// The resolved tenant.
    pub tenant: Arc<TenantSnapshot>,
    /// The domain that matched the request host. Absent when the tenant
    /// was selected explicitly (admin/preview context).
    pub domain: Option<Domain>,
}

/// Resolves request hosts to tenants.
pub struct HostResolver<'a> {
    tenants: &'a dyn TenantDirectory,
    domains: &'a dyn DomainDirectory,
}

impl<'a> HostResolver<'a> {
    /// Creates a resolver over the given directories.
    #[must_use]
    pub fn new(tenants: &'a dyn TenantDirectory, domains: &'a dyn DomainDirectory) -> Self {
        Self { tenants, domains }
    }

    /// Resolves a request to a tenant.
    ///
    /// In admin/preview context (`admin_context`) an explicit website id
    /// takes precedence over the host. Inactive websites never resolve.
    #[must_use]
    pub fn resolve(
        &self,
        host: &str,
        explicit: Option<WebsiteId>,
        admin_context: bool,
    ) -> Option<ResolvedSite> {
        if admin_context {
            if let Some(id) = explicit {
                let tenant = self.tenants.snapshot(id).filter(|t| t.website.active)?;
                return Some(ResolvedSite {
                    tenant,
                    domain: None,
                });
            }
        }

        let record = self.domains.by_host(&normalize_host(host))?;
        let tenant = self
            .tenants
            .snapshot(record.website_id)
            .filter(|t| t.website.active)?;

        Some(ResolvedSite {
            tenant,
            domain: Some(record.domain),
        })
    }
}

/// Lowercases a host and strips any port suffix.
#[must_use]
pub fn normalize_host(host: &str) -> String {
    let host = host.trim().to_ascii_lowercase();

    // Bracketed IPv6 literals keep their brackets, lose the port.
    if let Some(end) = host.find(']') {
        return host[..=end].to_string();
    }

    match host.rsplit_once(':') {
        Some((name, port)) if port.chars().all(|c| c.is_ascii_digit()) => name.to_string(),
        _ => host,
    }
}
