//! Front-office page rendering.
//!
//! Templating is out of scope: handlers answer with the JSON projection a
//! template engine would consume — the page's `ContentView` plus the
//! rendered layout tree.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use vitrine_core::content::{ContentView, ViewContext};
use vitrine_core::layout::{layout_view, LayoutView};
use vitrine_shared::Locale;

use crate::extractors::SiteContext;
use crate::{error_response, AppState};

/// Rendered page payload.
#[derive(Debug, Serialize)]
pub struct PageResponse {
    /// Negotiated locale.
    pub locale: Locale,
    /// Timezone derived from the locale.
    pub timezone: String,
    /// Tenant template identifier.
    pub template: String,
    /// The page projection.
    pub content: ContentView,
    /// The rendered composition tree, if the page has one.
    pub layout: Option<LayoutView>,
}

/// Creates the front-office routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/{locale}", get(home))
        .route("/{locale}/{*slug}", get(page))
}

/// `/` bounces to the negotiated locale's home.
async fn root(context: SiteContext) -> Response {
    let target = format!("/{}", context.locale);
    (StatusCode::FOUND, [(header::LOCATION, target)]).into_response()
}

/// `/{locale}` renders the home page.
async fn home(State(state): State<AppState>, context: SiteContext) -> Response {
    render(&state, &context, "home")
}

/// `/{locale}/{*slug}` renders an arbitrary page.
async fn page(
    State(state): State<AppState>,
    context: SiteContext,
    Path((_locale, slug)): Path<(String, String)>,
) -> Response {
    render(&state, &context, &slug)
}

fn render(state: &AppState, context: &SiteContext, slug: &str) -> Response {
    let configuration = &context.tenant.configuration;
    if !configuration.is_online(&context.locale) {
        return error_response(
            StatusCode::NOT_FOUND,
            "locale_offline",
            "This locale is not published",
        );
    }

    let Some(entry) = state.content.get(context.tenant.website.id, slug) else {
        return error_response(StatusCode::NOT_FOUND, "page_not_found", "No such page");
    };

    // One view context per request: repeated blocks project once.
    let mut views = ViewContext::new();
    let content = (*views.view(&entry.page, &context.locale)).clone();
    let layout = entry
        .layout
        .as_ref()
        .map(|layout| layout_view(&mut views, layout, &context.locale));

    Json(PageResponse {
        locale: context.locale.clone(),
        timezone: context.timezone.name().to_string(),
        template: configuration.template.clone(),
        content,
        layout,
    })
    .into_response()
}
