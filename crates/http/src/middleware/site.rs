//! Site resolution middleware.
//!
//! Resolves the request host to a tenant, negotiates the locale, and asks
//! the redirect decision engine whether to short-circuit. On success a
//! [`SiteContext`] extension is attached for handlers and the response
//! decorator.

use axum::extract::{Request, State};
use axum::http::{header, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use vitrine_core::host::{normalize_host, HostResolver};
use vitrine_core::locale::{
    timezone_for, AdminStrategy, FrontStrategy, LocaleRequest, LocaleStrategy,
};
use vitrine_core::redirect::{RedirectEngine, RedirectKind, RequestFacts, RequestMethod};
use vitrine_core::security::nonce;
use vitrine_core::tenant::Website;
use vitrine_shared::types::WebsiteId;
use vitrine_shared::Locale;

use crate::extractors::{client_ip, SiteContext};
use crate::session::SESSION_COOKIE;
use crate::{error_response, AppState};

/// Paths that never need a tenant.
const EXEMPT_PATHS: &[&str] = &["/healthz"];

/// The resolution middleware.
#[allow(clippy::too_many_lines)]
pub async fn resolve_site(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    if EXEMPT_PATHS.contains(&path.as_str()) {
        return next.run(request).await;
    }

    let admin = path.starts_with(&state.config.app.admin_prefix());
    let query = request.uri().query().map(str::to_string);

    // Host resolution; explicit website id only honored in admin context.
    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .map(normalize_host)
        .unwrap_or_default();
    let explicit = query
        .as_deref()
        .and_then(|q| query_param(q, "website"))
        .and_then(|value| value.parse::<Uuid>().ok())
        .map(WebsiteId::from_uuid);

    let resolver = HostResolver::new(state.catalog.as_ref(), state.catalog.as_ref());
    let Some(site) = resolver.resolve(&host, explicit, admin) else {
        return error_response(
            StatusCode::NOT_FOUND,
            "tenant_not_found",
            "No website matches this request",
        );
    };

    // Session: reuse the cookie's session when it is still known.
    let jar = CookieJar::from_headers(request.headers());
    let (session_id, fresh_session) = match jar.get(SESSION_COOKIE) {
        Some(cookie) if state.sessions.get(cookie.value()).is_some() => {
            (cookie.value().to_string(), false)
        }
        _ => (state.sessions.create(), true),
    };
    let session = state.sessions.get(&session_id).unwrap_or_default();

    // Locale negotiation: front reads the route prefix, admin an explicit
    // query parameter.
    let route_locale = if admin {
        query
            .as_deref()
            .and_then(|q| query_param(q, "locale"))
            .and_then(|value| Locale::parse(&value).ok())
    } else {
        first_segment(&path).and_then(|segment| Locale::parse(segment).ok())
    };
    let accept_language = request
        .headers()
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok());

    let locale_request = LocaleRequest {
        route_locale,
        session_locale: session.locale.clone(),
        accept_language,
        profile_locale: None,
        subresource: is_subresource(&path, &site.tenant.website),
    };
    let configuration = &site.tenant.configuration;
    let negotiation = if admin {
        AdminStrategy.negotiate(&locale_request, configuration)
    } else {
        FrontStrategy.negotiate(&locale_request, configuration)
    };
    if negotiation.persist_to_session {
        state
            .sessions
            .set_locale(&session_id, negotiation.locale.clone());
    }
    let locale = negotiation.locale;

    // Redirect decisions apply to the front office only.
    if !admin {
        let facts = RequestFacts {
            method: request_method(request.method()),
            scheme: &state.config.app.protocol,
            host: &host,
            path: &path,
            query: query.as_deref(),
            client_ip: client_ip(request.headers()),
        };
        let decision = RedirectEngine::new(state.redirects.as_ref()).decide(&site, &locale, &facts);

        // Ban comes first, as its own signal.
        if decision.banned {
            return error_response(
                StatusCode::FORBIDDEN,
                "access_denied",
                "Your address is not allowed on this website",
            );
        }

        if let Some(redirect) = decision.redirect {
            let status = match redirect.kind {
                RedirectKind::DomainCanonical => StatusCode::PERMANENT_REDIRECT,
                RedirectKind::Legacy => StatusCode::FOUND,
            };
            return (status, [(header::LOCATION, redirect.target_url)]).into_response();
        }

        // Secured websites force unauthenticated visitors to the login
        // route.
        if site.tenant.security.secure_site
            && !session.authenticated
            && !login_exempt(&path, &locale, &site.tenant.website)
        {
            let target = format!("/{locale}/login");
            return (StatusCode::FOUND, [(header::LOCATION, target)]).into_response();
        }
    }

    let context = SiteContext {
        tenant: site.tenant,
        domain: site.domain,
        timezone: timezone_for(&locale),
        locale,
        nonce: nonce(),
        session_id: session_id.clone(),
        admin,
    };
    request.extensions_mut().insert(context);

    let mut response = next.run(request).await;

    if fresh_session {
        let cookie = format!("{SESSION_COOKIE}={session_id}; Path=/; HttpOnly; SameSite=Lax");
        if let Ok(value) = cookie.parse() {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }

    response
}

fn request_method(method: &Method) -> RequestMethod {
    match *method {
        Method::GET => RequestMethod::Get,
        Method::HEAD => RequestMethod::Head,
        Method::POST => RequestMethod::Post,
        _ => RequestMethod::Other,
    }
}

/// First path segment, e.g. `fr` in `/fr/page`.
fn first_segment(path: &str) -> Option<&str> {
    path.trim_start_matches('/').split('/').next().filter(|s| !s.is_empty())
}

/// Sub-resources skip browser re-negotiation: upload-namespace assets and
/// anything with a file extension.
fn is_subresource(path: &str, website: &Website) -> bool {
    if path.starts_with(&website.upload_prefix()) {
        return true;
    }
    path.rsplit('/')
        .next()
        .is_some_and(|segment| segment.contains('.'))
}

/// Routes reachable on a secured website without authentication.
fn login_exempt(path: &str, locale: &Locale, website: &Website) -> bool {
    path == format!("/{locale}/login")
        || path == "/login"
        || path.starts_with(&website.upload_prefix())
}

/// Minimal query-parameter lookup (first occurrence wins).
fn query_param(query: &str, name: &str) -> Option<String> {
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == name).then(|| value.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_segment() {
        assert_eq!(first_segment("/fr/page"), Some("fr"));
        assert_eq!(first_segment("/fr"), Some("fr"));
        assert_eq!(first_segment("/"), None);
    }

    #[test]
    fn test_subresource_detection() {
        let website = Website::new("Site", "t1");
        assert!(is_subresource("/uploads/t1/logo.png", &website));
        assert!(is_subresource("/fr/app.css", &website));
        assert!(!is_subresource("/fr/page", &website));
    }

    #[test]
    fn test_query_param() {
        assert_eq!(query_param("a=1&b=2", "b"), Some("2".to_string()));
        assert_eq!(query_param("a=1", "b"), None);
    }
}
