//! The decision algorithm.

use vitrine_shared::Locale;

use crate::host::ResolvedSite;
use crate::tenant::Configuration;

use super::types::{
    Decision, Redirect, RedirectKind, RedirectKey, RedirectLookup, RequestFacts,
};

/// Computes redirect decisions for resolved requests.
pub struct RedirectEngine<'a> {
    lookup: &'a dyn RedirectLookup,
}

impl<'a> RedirectEngine<'a> {
    /// Creates an engine over a legacy-redirect lookup.
    #[must_use]
    pub fn new(lookup: &'a dyn RedirectLookup) -> Self {
        Self { lookup }
    }

    /// Decides what to do with a request.
    ///
    /// The ban signal is computed for every method. URL redirects are
    /// computed for idempotent fetches (GET/HEAD) only: replaying a
    /// redirect would drop a request body, so non-idempotent methods pass
    /// through untouched.
    #[must_use]
    pub fn decide(
        &self,
        site: &ResolvedSite,
        locale: &Locale,
        request: &RequestFacts<'_>,
    ) -> Decision {
        let configuration = &site.tenant.configuration;
        let banned = is_banned(configuration, request);

        if !request.method.is_idempotent_fetch() {
            return Decision {
                redirect: None,
                banned,
            };
        }

        if let Some(redirect) = self.canonical_redirect(site, locale, request) {
            return Decision {
                redirect: Some(redirect),
                banned,
            };
        }

        Decision {
            redirect: self.legacy_redirect(site, locale, request),
            banned,
        }
    }

    /// Step 1: domain canonicalization. Fires when the matched domain is
    /// not the default for the negotiated locale and a default exists.
    /// Never fires under the website's upload namespace, and never
    /// produces a self-redirect.
    fn canonical_redirect(
        &self,
        site: &ResolvedSite,
        locale: &Locale,
        request: &RequestFacts<'_>,
    ) -> Option<Redirect> {
        if request.path.starts_with(&site.tenant.website.upload_prefix()) {
            return None;
        }

        let matched = site.domain.as_ref()?;
        if matched.as_default && &matched.locale == locale {
            return None;
        }

        let target = site.tenant.configuration.default_domain(locale)?;
        if target.name == request.host {
            return None;
        }

        // The target domain carries the locale; a leading locale path
        // segment would be redundant on it.
        let path = strip_locale_prefix(request.path, locale);
        let mut url = format!("{}://{}{}", request.scheme, target.name, path);
        if let Some(query) = request.query.filter(|q| !q.is_empty()) {
            url.push('?');
            url.push_str(query);
        }

        Some(Redirect {
            target_url: url,
            kind: RedirectKind::DomainCanonical,
        })
    }

    /// Step 2: legacy-URL lookup, three keys in sequence — https-qualified
    /// host+path, bare host+path, then path only. First hit wins.
    fn legacy_redirect(
        &self,
        site: &ResolvedSite,
        locale: &Locale,
        request: &RequestFacts<'_>,
    ) -> Option<Redirect> {
        let website_id = site.tenant.website.id;
        let candidates = [
            format!("https://{}{}", request.host, request.path),
            format!("{}{}", request.host, request.path),
            request.path.to_string(),
        ];

        candidates
            .into_iter()
            .find_map(|url| {
                self.lookup.get(&RedirectKey {
                    locale: locale.clone(),
                    website_id,
                    url,
                })
            })
            .map(|target_url| Redirect {
                target_url,
                kind: RedirectKind::Legacy,
            })
    }
}

/// Ban check: on the ban list and not on the dev allow-list.
fn is_banned(configuration: &Configuration, request: &RequestFacts<'_>) -> bool {
    configuration.ips_ban.contains(&request.client_ip)
        && !configuration.ips_dev.contains(&request.client_ip)
}

/// Strips a leading `/{locale}` segment, leaving at least `/`.
fn strip_locale_prefix(path: &str, locale: &Locale) -> String {
    let prefix = format!("/{locale}");
    if path == prefix {
        return "/".to_string();
    }
    match path.strip_prefix(&prefix) {
        Some(rest) if rest.starts_with('/') => rest.to_string(),
        _ => path.to_string(),
    }
}

#[cfg(test)]
mod strip_tests {
    use super::*;

    #[test]
    fn test_strip_locale_prefix() {
        let en = Locale::parse("en").unwrap();
        assert_eq!(strip_locale_prefix("/en/page", &en), "/page");
        assert_eq!(strip_locale_prefix("/en", &en), "/");
        assert_eq!(strip_locale_prefix("/enlarged", &en), "/enlarged");
        assert_eq!(strip_locale_prefix("/fr/page", &en), "/fr/page");
    }
}
