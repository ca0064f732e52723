//! Waste record and analytics endpoints.

use crate::{
    api::{AppState, Pagination, auth::AuthUser},
    core::{
        analytics::{self, FoodTypeBreakdown, WasteSummary},
        period::ReportPeriod,
        waste::{self, FoodType, NewWasteRecord, WasteFilter},
    },
    entities::waste_record,
    errors::{Error, FieldError, Result},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

const DEFAULT_PAGE: u64 = 1;
const DEFAULT_LIMIT: u64 = 10;

/// Query parameters for the waste listing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    /// Page number, 1-based
    pub page: Option<u64>,
    /// Page size
    pub limit: Option<u64>,
    /// Lower date bound; applied only together with `endDate`
    pub start_date: Option<NaiveDate>,
    /// Upper date bound; applied only together with `startDate`
    pub end_date: Option<NaiveDate>,
    /// Restrict to one food type
    pub food_type: Option<String>,
}

/// Query parameters for the analytics endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyticsParams {
    /// Period token; unrecognized or absent values default to `month`
    pub period: Option<String>,
}

/// Envelope for the waste listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse {
    /// Always true on the success path
    pub success: bool,
    /// Records on this page
    pub count: usize,
    /// Pagination block
    pub pagination: Pagination,
    /// Aggregate over the whole filtered set
    pub summary: WasteSummary,
    /// The records themselves
    pub data: Vec<waste_record::Model>,
}

/// Envelope for a single waste record.
#[derive(Debug, Serialize)]
pub struct RecordResponse {
    /// Always true on the success path
    pub success: bool,
    /// The record
    pub data: waste_record::Model,
}

/// Envelope for the analytics report.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    /// Always true on the success path
    pub success: bool,
    /// The period the report covers
    pub period: ReportPeriod,
    /// Resolved start of the reporting window
    pub start_date: DateTime<Utc>,
    /// Per-food-type groups
    pub data: Vec<FoodTypeBreakdown>,
}

/// Envelope for deletions.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    /// Always true on the success path
    pub success: bool,
    /// Confirmation message
    pub message: &'static str,
}

fn build_filter(params: &ListParams) -> Result<WasteFilter> {
    let food_type = match &params.food_type {
        None => None,
        Some(raw) => Some(FoodType::parse(raw).ok_or_else(|| {
            Error::validation(vec![FieldError::new("foodType", "Invalid food type")])
        })?),
    };

    Ok(WasteFilter {
        start_date: params.start_date,
        end_date: params.end_date,
        food_type,
    })
}

/// `GET /api/waste` - paginated listing with filters and summary.
pub async fn list_records(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse>> {
    let page = params.page.unwrap_or(DEFAULT_PAGE).max(1);
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).max(1);
    let filter = build_filter(&params)?;

    let result = waste::list_waste_records(&state.db, &user_id, &filter, page, limit).await?;

    Ok(Json(ListResponse {
        success: true,
        count: result.records.len(),
        pagination: Pagination::new(page, limit, result.total),
        summary: result.summary,
        data: result.records,
    }))
}

/// `GET /api/waste/:id` - single record, owner only.
pub async fn get_record(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<RecordResponse>> {
    let record = waste::get_waste_record(&state.db, &user_id, id).await?;
    Ok(Json(RecordResponse {
        success: true,
        data: record,
    }))
}

/// `POST /api/waste` - validated create.
pub async fn create_record(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(input): Json<NewWasteRecord>,
) -> Result<(StatusCode, Json<RecordResponse>)> {
    let record = waste::create_waste_record(&state.db, &user_id, input).await?;
    Ok((
        StatusCode::CREATED,
        Json(RecordResponse {
            success: true,
            data: record,
        }),
    ))
}

/// `PUT /api/waste/:id` - full-record update, owner only.
pub async fn update_record(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
    Json(input): Json<NewWasteRecord>,
) -> Result<Json<RecordResponse>> {
    let record = waste::update_waste_record(&state.db, &user_id, id, input).await?;
    Ok(Json(RecordResponse {
        success: true,
        data: record,
    }))
}

/// `DELETE /api/waste/:id` - owner only.
pub async fn delete_record(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>> {
    waste::delete_waste_record(&state.db, &user_id, id).await?;
    Ok(Json(DeleteResponse {
        success: true,
        message: "Waste record removed",
    }))
}

/// `GET /api/waste/analytics/overview` - grouped report for the period.
pub async fn analytics_overview(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(params): Query<AnalyticsParams>,
) -> Result<Json<AnalyticsResponse>> {
    let period = ReportPeriod::parse(params.period.as_deref());
    let report = analytics::aggregate_waste(&state.db, &user_id, period, Utc::now()).await?;

    Ok(Json(AnalyticsResponse {
        success: true,
        period: report.period,
        start_date: report.start_date,
        data: report.groups,
    }))
}
