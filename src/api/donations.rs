//! Donation endpoints.

use crate::{
    api::{AppState, Pagination, auth::AuthUser, waste::DeleteResponse},
    core::donation::{self, DonationFilter, DonationView, NewDonation},
    errors::Result,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

const DEFAULT_PAGE: u64 = 1;
const DEFAULT_LIMIT: u64 = 10;

/// Query parameters for the donor-scoped listing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    /// Page number, 1-based
    pub page: Option<u64>,
    /// Page size
    pub limit: Option<u64>,
    /// Restrict to one donation type (`food` / `money`)
    #[serde(rename = "type")]
    pub donation_type: Option<String>,
    /// Restrict to one lifecycle status
    pub status: Option<String>,
}

/// Envelope for the donor-scoped listing.
#[derive(Debug, Serialize)]
pub struct ListResponse {
    /// Always true on the success path
    pub success: bool,
    /// Donations on this page
    pub count: usize,
    /// Pagination block
    pub pagination: Pagination,
    /// The donations themselves
    pub data: Vec<DonationView>,
}

/// Envelope for the marketplace listing.
#[derive(Debug, Serialize)]
pub struct AvailableResponse {
    /// Always true on the success path
    pub success: bool,
    /// Number of available donations
    pub count: usize,
    /// Approved food donations across all donors
    pub data: Vec<DonationView>,
}

/// Envelope for a single donation.
#[derive(Debug, Serialize)]
pub struct DonationResponse {
    /// Always true on the success path
    pub success: bool,
    /// The donation
    pub data: DonationView,
}

/// `GET /api/donations` - the caller's donations, newest first.
pub async fn list(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse>> {
    let page = params.page.unwrap_or(DEFAULT_PAGE).max(1);
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).max(1);
    let filter = DonationFilter {
        donation_type: params.donation_type,
        status: params.status,
    };

    let result = donation::list_donations(&state.db, &user_id, &filter, page, limit).await?;

    Ok(Json(ListResponse {
        success: true,
        count: result.donations.len(),
        pagination: Pagination::new(page, limit, result.total),
        data: result.donations,
    }))
}

/// `GET /api/donations/available` - approved food donations, any donor.
pub async fn available(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
) -> Result<Json<AvailableResponse>> {
    let donations = donation::list_available_donations(&state.db).await?;
    Ok(Json(AvailableResponse {
        success: true,
        count: donations.len(),
        data: donations,
    }))
}

/// `GET /api/donations/:id` - single donation, owner only.
pub async fn get_one(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<DonationResponse>> {
    let view = donation::get_donation(&state.db, &user_id, id).await?;
    Ok(Json(DonationResponse {
        success: true,
        data: view,
    }))
}

/// `POST /api/donations` - validated create from the tagged payload.
pub async fn create(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(input): Json<NewDonation>,
) -> Result<(StatusCode, Json<DonationResponse>)> {
    let view = donation::create_donation(&state.db, &user_id, input).await?;
    Ok((
        StatusCode::CREATED,
        Json(DonationResponse {
            success: true,
            data: view,
        }),
    ))
}

/// `PUT /api/donations/:id` - full-record update, owner only.
pub async fn update(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
    Json(input): Json<NewDonation>,
) -> Result<Json<DonationResponse>> {
    let view = donation::update_donation(&state.db, &user_id, id, input).await?;
    Ok(Json(DonationResponse {
        success: true,
        data: view,
    }))
}

/// `DELETE /api/donations/:id` - owner only.
pub async fn delete(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>> {
    donation::delete_donation(&state.db, &user_id, id).await?;
    Ok(Json(DeleteResponse {
        success: true,
        message: "Donation removed",
    }))
}
