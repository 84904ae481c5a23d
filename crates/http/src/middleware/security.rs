//! Security middleware: request screening and response decoration.

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::header::{HeaderName, HeaderValue, CACHE_CONTROL, CONTENT_TYPE};
use axum::http::{Method, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;

use vitrine_core::security::{assemble_headers, screen_request, STRIPPED_HEADERS};

use crate::extractors::SiteContext;
use crate::{error_response, AppState};

/// Largest form body the screen will buffer.
const MAX_SCREENED_BODY: usize = 1024 * 1024;

/// XSS screening middleware.
///
/// Rejects the request outright when the raw URI, a query value, or a
/// form-encoded body value trips the heuristics. Admin-area paths
/// (trusted authenticated operators) and framework-internal paths are
/// skipped entirely.
pub async fn screen(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let path = request.uri().path();
    if path.starts_with(&state.config.app.admin_prefix()) || path.starts_with("/_") {
        return next.run(request).await;
    }

    let uri = request.uri().to_string();
    let query_values = request
        .uri()
        .query()
        .map(parse_form_pairs)
        .unwrap_or_default();

    if let Err(violation) = screen_request(
        &uri,
        query_values.iter().map(|(k, v)| (k.as_str(), v.as_str())),
    ) {
        warn!(%violation, "request rejected by XSS screen");
        return denied();
    }

    // Form-encoded POST bodies are screened value by value; other body
    // types pass through to the handlers' own validation.
    if request.method() == Method::POST && is_form(&request) {
        let (parts, body) = request.into_parts();
        let bytes = match axum::body::to_bytes(body, MAX_SCREENED_BODY).await {
            Ok(bytes) => bytes,
            Err(_) => {
                return error_response(
                    StatusCode::PAYLOAD_TOO_LARGE,
                    "payload_too_large",
                    "Request body exceeds the screening limit",
                );
            }
        };

        let form_values = parse_form_pairs(&String::from_utf8_lossy(&bytes));
        if let Err(violation) = screen_request(
            &uri,
            form_values.iter().map(|(k, v)| (k.as_str(), v.as_str())),
        ) {
            warn!(%violation, "request rejected by XSS screen");
            return denied();
        }

        let request = Request::from_parts(parts, Body::from(bytes));
        return next.run(request).await;
    }

    next.run(request).await
}

fn denied() -> Response {
    error_response(
        StatusCode::FORBIDDEN,
        "access_denied",
        "Request rejected",
    )
}

fn is_form(request: &Request) -> bool {
    request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"))
}

/// Splits `a=1&b=2` into decoded pairs.
fn parse_form_pairs(raw: &str) -> Vec<(String, String)> {
    raw.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => (percent_decode(key), percent_decode(value)),
            None => (percent_decode(pair), String::new()),
        })
        .collect()
}

/// Decodes `%XX` escapes and `+` as space. Invalid escapes pass through
/// untouched so screening still sees them.
fn percent_decode(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' => {
                if let Some(decoded) = bytes
                    .get(i + 1..i + 3)
                    .and_then(|pair| std::str::from_utf8(pair).ok())
                    .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                {
                    out.push(decoded);
                    i += 3;
                } else {
                    out.push(b'%');
                    i += 1;
                }
            }
            other => {
                out.push(other);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Response decoration middleware.
///
/// Strips server-identifying headers, attaches the security headers the
/// tenant policy enables (with the per-request CSP nonce), and sets the
/// tenant's cache window on successful front-office GETs.
pub async fn decorate_response(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let context = request.extensions().get::<SiteContext>().cloned();
    let method = request.method().clone();

    let mut response = next.run(request).await;

    for name in STRIPPED_HEADERS {
        response.headers_mut().remove(*name);
    }

    let Some(context) = context else {
        return response;
    };

    for (name, value) in assemble_headers(
        &context.tenant.security,
        &context.nonce,
        state.config.app.debug,
    ) {
        if let Ok(value) = HeaderValue::from_str(&value) {
            response
                .headers_mut()
                .insert(HeaderName::from_static(name), value);
        }
    }

    if !context.admin && method == Method::GET && response.status().is_success() {
        let ttl = context.tenant.configuration.cache_ttl_secs;
        if let Ok(value) = HeaderValue::from_str(&format!("public, max-age={ttl}")) {
            response.headers_mut().insert(CACHE_CONTROL, value);
        }
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_decode() {
        assert_eq!(percent_decode("a+b"), "a b");
        assert_eq!(percent_decode("%3Cscript%3E"), "<script>");
        assert_eq!(percent_decode("100%"), "100%");
        assert_eq!(percent_decode("%zz"), "%zz");
    }

    #[test]
    fn test_parse_form_pairs() {
        assert_eq!(
            parse_form_pairs("a=1&msg=%3Cb%3E&flag"),
            vec![
                ("a".to_string(), "1".to_string()),
                ("msg".to_string(), "<b>".to_string()),
                ("flag".to_string(), String::new()),
            ]
        );
    }
}
