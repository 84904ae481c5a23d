//! Tenant record types.

use std::net::IpAddr;

use rand::RngCore;
use serde::{Deserialize, Serialize};
use vitrine_shared::types::{DomainId, WebsiteId};
use vitrine_shared::Locale;

use super::error::TenantError;

/// A website (tenant): one customer site instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Website {
    /// Unique identifier.
    pub id: WebsiteId,
    /// Display name.
    pub name: String,
    /// URL-safe identifier, also the upload namespace segment.
    pub slug: String,
    /// Soft lifecycle flag. Inactive websites resolve as not-found.
    pub active: bool,
}

impl Website {
    /// Creates an active website.
    #[must_use]
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: WebsiteId::new(),
            name: name.into(),
            slug: slug.into(),
            active: true,
        }
    }

    /// Returns the request-path prefix of this website's upload namespace.
    ///
    /// Domain-canonicalization redirects never apply under this prefix.
    #[must_use]
    pub fn upload_prefix(&self) -> String {
        format!("/uploads/{}/", self.slug)
    }
}

/// A hostname attached to a configuration, carrying one locale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Domain {
    /// Unique identifier.
    pub id: DomainId,
    /// Hostname, stored lowercase without port.
    pub name: String,
    /// Locale served by this domain.
    pub locale: Locale,
    /// Whether this domain is the canonical one for its locale.
    pub as_default: bool,
}

impl Domain {
    /// Creates a non-default domain record. The hostname is lowercased.
    #[must_use]
    pub fn new(name: &str, locale: Locale) -> Self {
        Self {
            id: DomainId::new(),
            name: name.to_ascii_lowercase(),
            locale,
            as_default: false,
        }
    }

    /// Creates a domain record flagged as the default for its locale.
    #[must_use]
    pub fn new_default(name: &str, locale: Locale) -> Self {
        Self {
            as_default: true,
            ..Self::new(name, locale)
        }
    }
}

/// Per-website configuration: locales, domains, IP lists, theming.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Configuration {
    /// Owning website.
    pub website_id: WebsiteId,
    /// Locale used when negotiation finds nothing better.
    pub default_locale: Locale,
    /// Every locale the website carries content for.
    pub locales: Vec<Locale>,
    /// Published subset of `locales`.
    pub online_locales: Vec<Locale>,
    /// Front-office template identifier.
    pub template: String,
    /// Cache expiration window in seconds, surfaced to response caching.
    pub cache_ttl_secs: u32,
    /// Developer allow-list. Overrides the ban list.
    pub ips_dev: Vec<IpAddr>,
    /// Customer allow-list (preview access to offline locales).
    pub ips_customer: Vec<IpAddr>,
    /// Banned addresses.
    pub ips_ban: Vec<IpAddr>,
    /// Theme identifiers available to the template.
    pub themes: Vec<String>,
    /// Domains owned by this configuration.
    pub domains: Vec<Domain>,
}

impl Configuration {
    /// Creates a configuration with the given default locale. The default
    /// is always part of the locale set.
    #[must_use]
    pub fn new(website_id: WebsiteId, default_locale: Locale) -> Self {
        Self {
            website_id,
            locales: vec![default_locale.clone()],
            online_locales: vec![default_locale.clone()],
            default_locale,
            template: "base".to_string(),
            cache_ttl_secs: 3600,
            ips_dev: Vec::new(),
            ips_customer: Vec::new(),
            ips_ban: Vec::new(),
            themes: Vec::new(),
            domains: Vec::new(),
        }
    }

    /// Returns true when the website carries the given locale.
    #[must_use]
    pub fn supports(&self, locale: &Locale) -> bool {
        self.locales.contains(locale)
    }

    /// Returns true when the given locale is published.
    #[must_use]
    pub fn is_online(&self, locale: &Locale) -> bool {
        self.online_locales.contains(locale)
    }

    /// Checks the configuration invariants.
    ///
    /// # Errors
    ///
    /// - `DefaultLocaleNotSupported` when the default locale is outside
    ///   the locale set;
    /// - `OnlineLocaleNotSupported` when an online locale is outside the
    ///   locale set;
    /// - `DuplicateDefaultDomain` when two domains are flagged default for
    ///   the same locale;
    /// - `DuplicateDomainName` when two domains share a hostname.
    pub fn validate(&self) -> Result<(), TenantError> {
        if !self.supports(&self.default_locale) {
            return Err(TenantError::DefaultLocaleNotSupported(
                self.default_locale.clone(),
            ));
        }

        for locale in &self.online_locales {
            if !self.supports(locale) {
                return Err(TenantError::OnlineLocaleNotSupported(locale.clone()));
            }
        }

        for (i, domain) in self.domains.iter().enumerate() {
            for other in &self.domains[i + 1..] {
                if domain.name == other.name {
                    return Err(TenantError::DuplicateDomainName(domain.name.clone()));
                }
                if domain.as_default && other.as_default && domain.locale == other.locale {
                    return Err(TenantError::DuplicateDefaultDomain(domain.locale.clone()));
                }
            }
        }

        Ok(())
    }

    /// Flags a domain as the default for its locale, clearing any previous
    /// default for that locale.
    ///
    /// # Errors
    ///
    /// Returns `UnknownDomain` when the domain is not part of this
    /// configuration.
    pub fn set_default_domain(&mut self, id: DomainId) -> Result<(), TenantError> {
        let locale = self
            .domains
            .iter()
            .find(|d| d.id == id)
            .map(|d| d.locale.clone())
            .ok_or(TenantError::UnknownDomain(id))?;

        for domain in &mut self.domains {
            if domain.locale == locale {
                domain.as_default = domain.id == id;
            }
        }

        Ok(())
    }

    /// Returns the default domain for the given locale, if any.
    #[must_use]
    pub fn default_domain(&self, locale: &Locale) -> Option<&Domain> {
        self.domains
            .iter()
            .find(|d| d.as_default && &d.locale == locale)
    }

    /// Looks up a domain by hostname (case-insensitive).
    #[must_use]
    pub fn domain_by_host(&self, host: &str) -> Option<&Domain> {
        let host = host.to_ascii_lowercase();
        self.domains.iter().find(|d| d.name == host)
    }
}

/// Response-header categories a security policy can enable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeaderCategory {
    /// `Content-Security-Policy` with the per-request nonce.
    ContentSecurityPolicy,
    /// `X-Content-Type-Options: nosniff`.
    ContentTypeOptions,
    /// `X-Frame-Options: SAMEORIGIN`.
    FrameOptions,
    /// `Referrer-Policy: strict-origin-when-cross-origin`.
    ReferrerPolicy,
    /// `Strict-Transport-Security`.
    StrictTransportSecurity,
}

/// Per-website security policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityPolicy {
    /// Owning website.
    pub website_id: WebsiteId,
    /// Generated once at creation, never regenerated in place.
    pub secret_key: String,
    /// Enabled response-header categories.
    pub header_categories: Vec<HeaderCategory>,
    /// Front office requires an authenticated visitor.
    pub secure_site: bool,
    /// Operators must rotate passwords.
    pub password_rotation: bool,
    /// Visitor registration is open.
    pub registration_open: bool,
    /// External domains allowed as CSP sources.
    pub allowed_domains: Vec<String>,
}

impl SecurityPolicy {
    /// Creates a policy with a freshly generated secret key and every
    /// header category enabled.
    #[must_use]
    pub fn new(website_id: WebsiteId) -> Self {
        Self {
            website_id,
            secret_key: generate_secret_key(),
            header_categories: vec![
                HeaderCategory::ContentSecurityPolicy,
                HeaderCategory::ContentTypeOptions,
                HeaderCategory::FrameOptions,
                HeaderCategory::ReferrerPolicy,
                HeaderCategory::StrictTransportSecurity,
            ],
            secure_site: false,
            password_rotation: false,
            registration_open: false,
            allowed_domains: Vec::new(),
        }
    }

    /// Returns true when the given category is enabled.
    #[must_use]
    pub fn has_category(&self, category: HeaderCategory) -> bool {
        self.header_categories.contains(&category)
    }
}

/// A website bundled with its configuration and security policy, the unit
/// handed to the request pipeline by tenant directories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantSnapshot {
    /// The website record.
    pub website: Website,
    /// Its configuration.
    pub configuration: Configuration,
    /// Its security policy.
    pub security: SecurityPolicy,
}

/// Generates a URL-safe 256-bit secret key.
fn generate_secret_key() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    base64_url::encode(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locale(tag: &str) -> Locale {
        Locale::parse(tag).unwrap()
    }

    fn config_fr_en() -> Configuration {
        let mut config = Configuration::new(WebsiteId::new(), locale("fr"));
        config.locales = vec![locale("fr"), locale("en")];
        config.online_locales = vec![locale("fr"), locale("en")];
        config
    }

    #[test]
    fn test_default_locale_must_be_supported() {
        let mut config = config_fr_en();
        config.default_locale = locale("de");
        assert_eq!(
            config.validate(),
            Err(TenantError::DefaultLocaleNotSupported(locale("de")))
        );
    }

    #[test]
    fn test_online_locales_must_be_subset() {
        let mut config = config_fr_en();
        config.online_locales.push(locale("es"));
        assert_eq!(
            config.validate(),
            Err(TenantError::OnlineLocaleNotSupported(locale("es")))
        );
    }

    #[test]
    fn test_one_default_domain_per_locale() {
        let mut config = config_fr_en();
        config.domains = vec![
            Domain::new_default("a.example.com", locale("fr")),
            Domain::new_default("b.example.com", locale("fr")),
        ];
        assert_eq!(
            config.validate(),
            Err(TenantError::DuplicateDefaultDomain(locale("fr")))
        );
    }

    #[test]
    fn test_set_default_domain_clears_previous() {
        let mut config = config_fr_en();
        config.domains = vec![
            Domain::new_default("a.example.com", locale("fr")),
            Domain::new("b.example.com", locale("fr")),
            Domain::new_default("en.example.com", locale("en")),
        ];
        let b = config.domains[1].id;

        config.set_default_domain(b).unwrap();

        assert!(!config.domains[0].as_default);
        assert!(config.domains[1].as_default);
        // Other locales are untouched.
        assert!(config.domains[2].as_default);
        config.validate().unwrap();
    }

    #[test]
    fn test_set_default_domain_unknown() {
        let mut config = config_fr_en();
        let id = DomainId::new();
        assert_eq!(
            config.set_default_domain(id),
            Err(TenantError::UnknownDomain(id))
        );
    }

    #[test]
    fn test_domain_lookup_is_case_insensitive() {
        let mut config = config_fr_en();
        config.domains = vec![Domain::new("Site.Example.COM", locale("fr"))];
        assert!(config.domain_by_host("site.example.com").is_some());
        assert!(config.domain_by_host("SITE.EXAMPLE.COM").is_some());
        assert!(config.domain_by_host("other.example.com").is_none());
    }

    #[test]
    fn test_secret_key_generated_once() {
        let policy = SecurityPolicy::new(WebsiteId::new());
        assert!(!policy.secret_key.is_empty());
        assert_ne!(
            policy.secret_key,
            SecurityPolicy::new(WebsiteId::new()).secret_key
        );
    }

    #[test]
    fn test_upload_prefix() {
        let website = Website::new("Site", "t1");
        assert_eq!(website.upload_prefix(), "/uploads/t1/");
    }
}
