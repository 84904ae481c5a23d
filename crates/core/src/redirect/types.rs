//! Redirect decision types.

use std::net::IpAddr;

use serde::{Deserialize, Serialize};
use vitrine_shared::types::WebsiteId;
use vitrine_shared::Locale;

/// HTTP method, reduced to what the decision engine cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    /// GET.
    Get,
    /// HEAD.
    Head,
    /// POST.
    Post,
    /// Anything else.
    Other,
}

impl RequestMethod {
    /// URL redirects are only computed for idempotent fetches.
    #[must_use]
    pub const fn is_idempotent_fetch(self) -> bool {
        matches!(self, Self::Get | Self::Head)
    }
}

/// Request facts the engine needs. All borrowed from the HTTP layer.
#[derive(Debug, Clone)]
pub struct RequestFacts<'a> {
    /// Request method.
    pub method: RequestMethod,
    /// Request scheme (`http` or `https`).
    pub scheme: &'a str,
    /// Request host, already normalized (lowercase, no port).
    pub host: &'a str,
    /// Request path, starting with `/`.
    pub path: &'a str,
    /// Raw query string without the `?`, if any.
    pub query: Option<&'a str>,
    /// Requesting client address.
    pub client_ip: IpAddr,
}

/// What kind of redirect fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectKind {
    /// The request host is not the canonical domain for the locale.
    DomainCanonical,
    /// A precomputed legacy-URL mapping matched.
    Legacy,
}

/// A URL redirect to issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    /// Absolute target URL.
    pub target_url: String,
    /// Why the redirect fired.
    pub kind: RedirectKind,
}

/// The engine's output. `banned` is a separate signal: callers must check
/// it before acting on `redirect`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    /// URL redirect, if one applies.
    pub redirect: Option<Redirect>,
    /// The client IP is banned (and not on the dev allow-list).
    pub banned: bool,
}

impl Decision {
    /// A pass-through decision.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            redirect: None,
            banned: false,
        }
    }
}

/// Cache key for precomputed legacy-URL redirects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RedirectKey {
    /// Locale the mapping applies to.
    pub locale: Locale,
    /// Owning website.
    pub website_id: WebsiteId,
    /// Normalized URL: `https://host/path`, `host/path`, or `/path`.
    pub url: String,
}

/// Read side of the legacy-redirect cache.
pub trait RedirectLookup: Send + Sync {
    /// Returns the redirect target stored for the key, if any.
    fn get(&self, key: &RedirectKey) -> Option<String>;
}
