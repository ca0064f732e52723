//! HTTP layer - router, handlers, and shared response types.
//!
//! Handlers parse the request, call into `core`, and wrap the result in the
//! `{success, ...}` envelope the dashboard consumes. All domain decisions
//! live in `core`; this layer only translates between HTTP and plain data.

/// Authenticated-user extractor
pub mod auth;
/// Donation endpoints
pub mod donations;
/// Expiry item endpoints
pub mod expiry;
/// Reference-data endpoints (disease profiles, supply-chain deliveries)
pub mod reference;
/// Waste record and analytics endpoints
pub mod waste;

use crate::config::reference::ReferenceData;
use axum::{Json, Router, routing::get};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

/// Shared state available to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection for all record operations
    pub db: DatabaseConnection,
    /// Injected read-only reference datasets
    pub reference: Arc<ReferenceData>,
}

impl AppState {
    /// Creates the shared state from its parts.
    #[must_use]
    pub fn new(db: DatabaseConnection, reference: ReferenceData) -> Self {
        Self {
            db,
            reference: Arc::new(reference),
        }
    }
}

/// Pagination block echoed on list responses.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Requested page, 1-based
    pub page: u64,
    /// Requested page size
    pub limit: u64,
    /// Total matching records across all pages
    pub total: u64,
    /// Total page count
    pub pages: u64,
}

impl Pagination {
    /// Builds the block for a page of `total` records at `limit` per page.
    #[must_use]
    pub fn new(page: u64, limit: u64, total: u64) -> Self {
        Self {
            page,
            limit,
            total,
            pages: total.div_ceil(limit.max(1)),
        }
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "OK", "message": "Usana API is running" }))
}

/// Builds the full application router over the shared state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/waste", get(waste::list_records).post(waste::create_record))
        .route("/api/waste/analytics/overview", get(waste::analytics_overview))
        .route(
            "/api/waste/expiry",
            get(expiry::list_items).post(expiry::create_item),
        )
        .route(
            "/api/waste/expiry/:id",
            axum::routing::put(expiry::update_item).delete(expiry::delete_item),
        )
        .route(
            "/api/waste/:id",
            get(waste::get_record)
                .put(waste::update_record)
                .delete(waste::delete_record),
        )
        .route(
            "/api/donations",
            get(donations::list).post(donations::create),
        )
        .route("/api/donations/available", get(donations::available))
        .route(
            "/api/donations/:id",
            get(donations::get_one)
                .put(donations::update)
                .delete(donations::delete),
        )
        .route("/api/disease", get(reference::disease_profiles))
        .route(
            "/api/supply-chain/deliveries",
            get(reference::deliveries),
        )
        .route(
            "/api/supply-chain/deliveries/:id",
            get(reference::delivery_by_id),
        )
        .with_state(state)
}
