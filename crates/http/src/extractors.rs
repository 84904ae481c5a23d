//! Request extractors.

use std::net::IpAddr;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use chrono_tz::Tz;
use std::sync::Arc;

use vitrine_core::tenant::{Domain, TenantSnapshot};
use vitrine_shared::Locale;

use crate::error_response;

/// Per-request site context, inserted by the site-resolution middleware.
///
/// Carries the resolved tenant, the negotiated locale, and the derived
/// timezone — the timezone never leaves this context (no process-wide
/// side effects).
#[derive(Debug, Clone)]
pub struct SiteContext {
    /// Resolved tenant snapshot.
    pub tenant: Arc<TenantSnapshot>,
    /// Domain matched by the request host, if host-resolved.
    pub domain: Option<Domain>,
    /// Negotiated locale.
    pub locale: Locale,
    /// Timezone derived from the locale.
    pub timezone: Tz,
    /// Per-request CSP nonce.
    pub nonce: String,
    /// Session id for this visitor.
    pub session_id: String,
    /// Request entered through the admin prefix.
    pub admin: bool,
}

impl<S> FromRequestParts<S> for SiteContext
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<Self>().cloned().ok_or_else(|| {
            error_response(
                StatusCode::NOT_FOUND,
                "tenant_not_found",
                "No website matches this request",
            )
        })
    }
}

/// Client IP: first `X-Forwarded-For` entry, falling back to loopback
/// when the header is absent or unparseable.
#[must_use]
pub fn client_ip(headers: &HeaderMap) -> IpAddr {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(IpAddr::from([127, 0, 0, 1]))
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn test_client_ip_reads_first_forwarded_entry() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.9, 10.0.0.1"),
        );
        assert_eq!(client_ip(&headers), "203.0.113.9".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn test_client_ip_defaults_to_loopback() {
        assert_eq!(
            client_ip(&HeaderMap::new()),
            IpAddr::from([127, 0, 0, 1])
        );
    }
}
