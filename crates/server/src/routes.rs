//! Router and request handlers.

use crate::error::ApiError;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use rollcall_attendance::{
    read_day, read_summary, write_day, AttendanceUpdate, ClassSheet, DayAttendance, Summary,
    WriteOutcome,
};
use rollcall_sheets::RangeClient;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared handler state: one client for the attendance document.
#[derive(Clone)]
pub struct AppState {
    pub sheets: Arc<dyn RangeClient>,
}

impl AppState {
    pub fn new(sheets: Arc<dyn RangeClient>) -> Self {
        Self { sheets }
    }
}

/// Health check response.
#[derive(Serialize, Deserialize)]
pub struct Health {
    /// Server status ("ok" when healthy).
    pub status: String,
    /// Server version from Cargo.toml.
    pub version: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayQuery {
    pub class_name: Option<String>,
    pub day_label: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryQuery {
    pub class_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDayRequest {
    pub class_name: Option<String>,
    pub day_label: Option<String>,
    pub items: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateDayResponse {
    pub success: bool,
    #[serde(flatten)]
    pub outcome: WriteOutcome,
}

const MISSING_DAY_PARAMS: &str = "Missing className or dayLabel";
const MISSING_UPDATE_FIELDS: &str = "Missing className, dayLabel or items";
const SUMMARY_FAILED: &str = "Failed to fetch summary";

/// Create the application router.
///
/// This is separated from `main()` to allow testing.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/attendance/day", get(get_day).put(put_day))
        .route("/attendance/summary", get(get_summary))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint handler.
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn query_error(rejection: &QueryRejection) -> ApiError {
    ApiError::bad_request(format!("Invalid query string: {}", rejection.body_text()))
}

/// `GET /attendance/day?className=&dayLabel=`
pub async fn get_day(
    State(state): State<AppState>,
    query: Result<Query<DayQuery>, QueryRejection>,
) -> Result<Json<DayAttendance>, ApiError> {
    let Query(query) = query.map_err(|rejection| query_error(&rejection))?;
    let (Some(class_name), Some(day_label)) =
        (present(query.class_name), present(query.day_label))
    else {
        return Err(ApiError::bad_request(MISSING_DAY_PARAMS));
    };

    let sheet = ClassSheet::new(class_name)?;
    let day = read_day(state.sheets.as_ref(), &sheet, &day_label).await?;
    Ok(Json(day))
}

/// `PUT /attendance/day`
pub async fn put_day(
    State(state): State<AppState>,
    payload: Result<Json<UpdateDayRequest>, JsonRejection>,
) -> Result<Json<UpdateDayResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        ApiError::bad_request(format!("Invalid request body: {}", rejection.body_text()))
    })?;

    let (Some(class_name), Some(day_label), Some(Value::Array(items))) = (
        present(request.class_name),
        present(request.day_label),
        request.items,
    ) else {
        return Err(ApiError::bad_request(MISSING_UPDATE_FIELDS));
    };

    let items: Vec<AttendanceUpdate> = serde_json::from_value(Value::Array(items))
        .map_err(|e| ApiError::bad_request(format!("Invalid items: {e}")))?;

    let sheet = ClassSheet::new(class_name)?;
    let outcome = write_day(state.sheets.as_ref(), &sheet, &day_label, &items).await?;
    Ok(Json(UpdateDayResponse {
        success: true,
        outcome,
    }))
}

/// `GET /attendance/summary?className=`
///
/// Backend failures are reported with a fixed message.
pub async fn get_summary(
    State(state): State<AppState>,
    query: Result<Query<SummaryQuery>, QueryRejection>,
) -> Result<Json<Summary>, ApiError> {
    let Query(query) = query.map_err(|rejection| query_error(&rejection))?;
    let Some(class_name) = present(query.class_name) else {
        return Err(ApiError::bad_request("Missing className"));
    };

    let sheet = ClassSheet::new(class_name)?;
    let summary = read_summary(state.sheets.as_ref(), &sheet)
        .await
        .map_err(|err| {
            tracing::error!(error = %err, class = sheet.name(), "summary request failed");
            ApiError::Internal(SUMMARY_FAILED.to_string())
        })?;
    Ok(Json(summary))
}
