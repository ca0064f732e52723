//! Expiry item endpoints.
//!
//! Listings always surface the live freshness classification: the stored
//! status snapshot is overwritten on the way out, never trusted.

use crate::{
    api::{AppState, auth::AuthUser, waste::DeleteResponse},
    core::expiry::{self, NewExpiryItem},
    entities::expiry_item,
    errors::Result,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use serde::Serialize;

/// Envelope for the expiry item listing.
#[derive(Debug, Serialize)]
pub struct ListResponse {
    /// Always true on the success path
    pub success: bool,
    /// Number of items returned
    pub count: usize,
    /// Items sorted by expiry date ascending, statuses recomputed
    pub data: Vec<expiry_item::Model>,
}

/// Envelope for a single expiry item.
#[derive(Debug, Serialize)]
pub struct ItemResponse {
    /// Always true on the success path
    pub success: bool,
    /// The item
    pub data: expiry_item::Model,
}

/// `GET /api/waste/expiry` - all items for the user, live statuses.
pub async fn list_items(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ListResponse>> {
    let items = expiry::list_expiry_items(&state.db, &user_id, Utc::now().date_naive()).await?;
    tracing::debug!(user = %user_id, count = items.len(), "listed expiry items");

    Ok(Json(ListResponse {
        success: true,
        count: items.len(),
        data: items,
    }))
}

/// `POST /api/waste/expiry` - validated create with derived status.
pub async fn create_item(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(input): Json<NewExpiryItem>,
) -> Result<(StatusCode, Json<ItemResponse>)> {
    let item = expiry::create_expiry_item(&state.db, &user_id, input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ItemResponse {
            success: true,
            data: item,
        }),
    ))
}

/// `PUT /api/waste/expiry/:id` - full-record update, owner only.
pub async fn update_item(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
    Json(input): Json<NewExpiryItem>,
) -> Result<Json<ItemResponse>> {
    let item = expiry::update_expiry_item(&state.db, &user_id, id, input).await?;
    Ok(Json(ItemResponse {
        success: true,
        data: item,
    }))
}

/// `DELETE /api/waste/expiry/:id` - owner only.
pub async fn delete_item(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>> {
    expiry::delete_expiry_item(&state.db, &user_id, id).await?;
    Ok(Json(DeleteResponse {
        success: true,
        message: "Expiry item removed",
    }))
}
