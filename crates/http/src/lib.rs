//! HTTP layer with Axum routes and the request pipeline middleware.
//!
//! This crate provides:
//! - The middleware chain: XSS screening, site resolution + locale
//!   negotiation, redirect decisions, response decoration
//! - Front-office and admin routes
//! - Request extractors

pub mod content_catalog;
pub mod extractors;
pub mod middleware;
pub mod routes;
pub mod session;
pub mod wallet_book;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::json;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;
use tower_http::trace::TraceLayer;

use vitrine_shared::AppConfig;
use vitrine_store::{FileCache, MemoryRedirectStore, TenantCatalog};

use content_catalog::ContentCatalog;
use session::SessionStore;
use wallet_book::WalletBooks;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Tenant/domain directories, rebuilt from the domain cache file.
    pub catalog: Arc<TenantCatalog>,
    /// Legacy-redirect lookup, rebuilt from the redirection cache file.
    pub redirects: Arc<MemoryRedirectStore>,
    /// Persisted cache files.
    pub file_cache: Arc<FileCache>,
    /// Visitor sessions (locale persistence, authentication flag).
    pub sessions: Arc<SessionStore>,
    /// Front-office content (pages and layouts).
    pub content: Arc<ContentCatalog>,
    /// Wallet classification state per website.
    pub wallets: Arc<WalletBooks>,
}

/// Creates the main application router.
///
/// Request flow, outermost first: trace, XSS screening, site resolution
/// (locale negotiation + redirect decisions), response decoration, routes.
pub fn create_router(state: AppState) -> Router {
    let admin_prefix = state.config.app.admin_prefix();

    Router::new()
        .merge(routes::health::routes())
        .merge(routes::pages::routes())
        .nest(&admin_prefix, routes::admin::routes())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::security::decorate_response,
        ))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::site::resolve_site,
        ))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::security::screen,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(SetSensitiveRequestHeadersLayer::new(std::iter::once(
            axum::http::header::COOKIE,
        )))
        .with_state(state)
}

/// Builds the uniform JSON error body used across routes and middleware.
#[must_use]
pub fn error_response(status: StatusCode, error: &str, message: &str) -> Response {
    (
        status,
        Json(json!({ "error": error, "message": message })),
    )
        .into_response()
}
