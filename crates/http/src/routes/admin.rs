//! Admin back-office routes.
//!
//! Mounted under the tenant-scoped `/admin-<security-token>` prefix.
//! Operators reach them with an explicit `?website=<id>` preview
//! parameter or through a tenant domain.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};

use vitrine_core::ordering::append;
use vitrine_core::wallet::{Category, CategoryType, Operation, SubCategory, Wallet, WalletService};
use vitrine_shared::types::{CategoryId, CategoryTypeId, SubCategoryId};

use crate::extractors::SiteContext;
use crate::{error_response, AppState};

/// Creates the admin routes (the caller nests them under the admin
/// prefix).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/website", get(current_website))
        .route("/wallet", get(wallet_overview))
        .route("/wallet/types", post(create_category_type))
        .route("/wallet/types/{type_id}/categories", post(create_category))
        .route(
            "/wallet/types/{type_id}/categories/{category_id}",
            delete(delete_category),
        )
        .route(
            "/wallet/types/{type_id}/categories/{category_id}/subcategories",
            post(create_subcategory),
        )
        .route(
            "/wallet/types/{type_id}/categories/{category_id}/subcategories/{subcategory_id}",
            delete(delete_subcategory),
        )
        .route("/wallet/operations", post(record_operation))
        .route("/cache/rebuild", post(rebuild_caches))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating a classification node.
#[derive(Debug, Deserialize)]
pub struct CreateNodeRequest {
    /// Display name.
    pub name: String,
}

/// Request body for recording a wallet operation.
#[derive(Debug, Deserialize)]
pub struct RecordOperationRequest {
    /// Classification leaf.
    pub subcategory_id: SubCategoryId,
    /// Operator-facing label.
    pub label: String,
    /// Signed amount.
    pub amount: Decimal,
    /// Value date.
    pub date: NaiveDate,
}

/// One wallet with its balance.
#[derive(Debug, Serialize)]
pub struct WalletSummary {
    /// Wallet name.
    pub name: String,
    /// Signed sum of its operations.
    pub balance: Decimal,
    /// Operation count.
    pub operations: usize,
}

// ============================================================================
// Handlers
// ============================================================================

/// Returns the resolved tenant, a preview smoke-check.
async fn current_website(context: SiteContext) -> Response {
    Json(json!({
        "website": context.tenant.website,
        "locale": context.locale,
        "timezone": context.timezone.name(),
    }))
    .into_response()
}

/// Lists the classification tree and wallet balances.
async fn wallet_overview(State(state): State<AppState>, context: SiteContext) -> Response {
    let book = state
        .wallets
        .read_book(context.tenant.website.id)
        .unwrap_or_default();

    let summaries: Vec<WalletSummary> = book
        .wallets
        .iter()
        .map(|wallet| WalletSummary {
            name: wallet.name.clone(),
            balance: WalletService::balance(wallet),
            operations: wallet.operations.len(),
        })
        .collect();

    Json(json!({
        "category_types": book.category_types,
        "wallets": summaries,
    }))
    .into_response()
}

/// Creates a category type at the end of the list.
async fn create_category_type(
    State(state): State<AppState>,
    context: SiteContext,
    Json(body): Json<CreateNodeRequest>,
) -> Response {
    if body.name.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "validation_error", "Name is required");
    }

    let created = state.wallets.with_book(context.tenant.website.id, |book| {
        let category_type = CategoryType::new(body.name.trim());
        let id = category_type.id;
        append(&mut book.category_types, category_type);
        id
    });

    info!(%created, website = %context.tenant.website.id, "category type created");
    (StatusCode::CREATED, Json(json!({ "id": created }))).into_response()
}

/// Creates a category under a type.
async fn create_category(
    State(state): State<AppState>,
    context: SiteContext,
    Path(type_id): Path<CategoryTypeId>,
    Json(body): Json<CreateNodeRequest>,
) -> Response {
    if body.name.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "validation_error", "Name is required");
    }

    let created = state.wallets.with_book(context.tenant.website.id, |book| {
        let category_type = book.category_types.iter_mut().find(|t| t.id == type_id)?;
        let category = Category::new(body.name.trim());
        let id = category.id;
        category_type.append_category(category);
        Some(id)
    });

    match created {
        Some(id) => (StatusCode::CREATED, Json(json!({ "id": id }))).into_response(),
        None => error_response(StatusCode::NOT_FOUND, "not_found", "Unknown category type"),
    }
}

/// Deletes a category, cascading to subcategories and their operations.
async fn delete_category(
    State(state): State<AppState>,
    context: SiteContext,
    Path((type_id, category_id)): Path<(CategoryTypeId, CategoryId)>,
) -> Response {
    let removed = state.wallets.with_book(context.tenant.website.id, |book| {
        let (category_types, wallets) = (&mut book.category_types, &mut book.wallets);
        let category_type = category_types.iter_mut().find(|t| t.id == type_id)?;
        WalletService::delete_category(category_type, wallets, category_id)
    });

    match removed {
        Some(_) => {
            info!(%category_id, "category deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        None => error_response(StatusCode::NOT_FOUND, "not_found", "Unknown category"),
    }
}

/// Creates a subcategory under a category.
async fn create_subcategory(
    State(state): State<AppState>,
    context: SiteContext,
    Path((type_id, category_id)): Path<(CategoryTypeId, CategoryId)>,
    Json(body): Json<CreateNodeRequest>,
) -> Response {
    if body.name.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "validation_error", "Name is required");
    }

    let created = state.wallets.with_book(context.tenant.website.id, |book| {
        let category = book
            .category_types
            .iter_mut()
            .find(|t| t.id == type_id)?
            .categories
            .iter_mut()
            .find(|c| c.id == category_id)?;
        let subcategory = SubCategory::new(body.name.trim());
        let id = subcategory.id;
        category.append_subcategory(subcategory);
        Some(id)
    });

    match created {
        Some(id) => (StatusCode::CREATED, Json(json!({ "id": id }))).into_response(),
        None => error_response(StatusCode::NOT_FOUND, "not_found", "Unknown category"),
    }
}

/// Deletes a subcategory, reflowing sibling positions and purging its
/// operations.
async fn delete_subcategory(
    State(state): State<AppState>,
    context: SiteContext,
    Path((type_id, category_id, subcategory_id)): Path<(CategoryTypeId, CategoryId, SubCategoryId)>,
) -> Response {
    let removed = state.wallets.with_book(context.tenant.website.id, |book| {
        let (category_types, wallets) = (&mut book.category_types, &mut book.wallets);
        let category = category_types
            .iter_mut()
            .find(|t| t.id == type_id)?
            .categories
            .iter_mut()
            .find(|c| c.id == category_id)?;
        WalletService::delete_subcategory(category, wallets, subcategory_id)
    });

    match removed {
        Some(()) => {
            info!(%subcategory_id, "subcategory deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        None => error_response(StatusCode::NOT_FOUND, "not_found", "Unknown subcategory"),
    }
}

/// Records an operation in the website's main wallet, creating the wallet
/// on first use.
async fn record_operation(
    State(state): State<AppState>,
    context: SiteContext,
    Json(body): Json<RecordOperationRequest>,
) -> Response {
    let website_id = context.tenant.website.id;
    let id = state.wallets.with_book(website_id, |book| {
        if book.wallets.is_empty() {
            book.wallets.push(Wallet::new(website_id, "Main"));
        }
        let operation = Operation::new(body.subcategory_id, body.label.clone(), body.amount, body.date);
        let id = operation.id;
        book.wallets[0].operations.push(operation);
        id
    });

    (StatusCode::CREATED, Json(json!({ "id": id }))).into_response()
}

/// Reloads the cache files and swaps both stores wholesale.
async fn rebuild_caches(State(state): State<AppState>, _context: SiteContext) -> Response {
    match state.file_cache.load().await {
        Ok(snapshot) => {
            let tenants = snapshot.tenants.len();
            let redirects = snapshot.redirects.len();
            state.catalog.rebuild(snapshot.tenants);
            state.redirects.rebuild(snapshot.redirects);
            info!(tenants, redirects, "caches rebuilt from files");
            Json(json!({ "tenants": tenants, "redirects": redirects })).into_response()
        }
        Err(e) => {
            error!(error = %e, "cache rebuild failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "store_error",
                "Cache files could not be loaded",
            )
        }
    }
}
