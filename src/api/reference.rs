//! Reference-data endpoints.
//!
//! These serve the injected read-only datasets loaded at startup; no
//! handler mutates them and no database access is involved.

use crate::{
    api::{AppState, auth::AuthUser},
    config::reference::{Delivery, DiseaseProfile},
    errors::{Error, Result},
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

/// Query parameters for the disease listing.
#[derive(Debug, Default, Deserialize)]
pub struct DiseaseParams {
    /// Restrict to one severity grade
    pub severity: Option<String>,
}

/// Query parameters for the deliveries listing.
#[derive(Debug, Default, Deserialize)]
pub struct DeliveryParams {
    /// Restrict to one run status
    pub status: Option<String>,
}

/// Envelope for the disease listing.
#[derive(Debug, Serialize)]
pub struct DiseaseListResponse {
    /// Always true on the success path
    pub success: bool,
    /// Number of profiles returned
    pub count: usize,
    /// The profiles
    pub data: Vec<DiseaseProfile>,
}

/// Envelope for the deliveries listing.
#[derive(Debug, Serialize)]
pub struct DeliveryListResponse {
    /// Always true on the success path
    pub success: bool,
    /// Number of deliveries returned
    pub count: usize,
    /// The deliveries
    pub data: Vec<Delivery>,
}

/// Envelope for a single delivery.
#[derive(Debug, Serialize)]
pub struct DeliveryResponse {
    /// Always true on the success path
    pub success: bool,
    /// The delivery
    pub data: Delivery,
}

/// `GET /api/disease` - crop-disease advisory profiles.
pub async fn disease_profiles(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Query(params): Query<DiseaseParams>,
) -> Result<Json<DiseaseListResponse>> {
    let data: Vec<DiseaseProfile> = state
        .reference
        .diseases
        .iter()
        .filter(|profile| {
            params
                .severity
                .as_ref()
                .is_none_or(|severity| &profile.severity == severity)
        })
        .cloned()
        .collect();

    Ok(Json(DiseaseListResponse {
        success: true,
        count: data.len(),
        data,
    }))
}

/// `GET /api/supply-chain/deliveries` - delivery snapshots.
pub async fn deliveries(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Query(params): Query<DeliveryParams>,
) -> Result<Json<DeliveryListResponse>> {
    let data: Vec<Delivery> = state
        .reference
        .deliveries
        .iter()
        .filter(|delivery| {
            params
                .status
                .as_ref()
                .is_none_or(|status| &delivery.status == status)
        })
        .cloned()
        .collect();

    Ok(Json(DeliveryListResponse {
        success: true,
        count: data.len(),
        data,
    }))
}

/// `GET /api/supply-chain/deliveries/:id` - one delivery by id.
pub async fn delivery_by_id(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<DeliveryResponse>> {
    let delivery = state
        .reference
        .deliveries
        .iter()
        .find(|delivery| delivery.id == id)
        .cloned()
        .ok_or_else(|| Error::NotFound {
            resource: "Delivery",
            id,
        })?;

    Ok(Json(DeliveryResponse {
        success: true,
        data: delivery,
    }))
}
