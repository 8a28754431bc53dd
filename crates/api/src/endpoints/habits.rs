//! Habit tracking endpoints.

use axum::{Json, Router, extract::State, routing::post};
use serde::{Deserialize, Serialize};
use slimfit_common::AppResult;
use slimfit_core::ConsistencySummary;
use slimfit_db::entities::daily_log;
use slimfit_engine::{CalendarEntry, CheckField};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Daily log response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyLogResponse {
    pub date: String,
    pub ate_healthy: bool,
    pub trained: bool,
    pub drank_water: bool,
    pub note: Option<String>,
}

impl From<daily_log::Model> for DailyLogResponse {
    fn from(log: daily_log::Model) -> Self {
        Self {
            date: log.log_date.to_string(),
            ate_healthy: log.ate_healthy,
            trained: log.trained,
            drank_water: log.drank_water,
            note: log.note,
        }
    }
}

/// Toggle check request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleCheckRequest {
    pub field: CheckField,
}

/// Calendar request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarRequest {
    #[serde(default = "default_window_days")]
    pub window_days: u32,
}

const fn default_window_days() -> u32 {
    7
}

/// Flip one habit check on today's log.
async fn toggle_check(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<ToggleCheckRequest>,
) -> AppResult<ApiResponse<DailyLogResponse>> {
    let log = state.habit_service.toggle_check(&user.id, req.field).await?;
    Ok(ApiResponse::ok(log.into()))
}

/// Calendar over the requested window.
async fn calendar(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CalendarRequest>,
) -> AppResult<ApiResponse<Vec<CalendarEntry>>> {
    let entries = state
        .habit_service
        .calendar(&user.id, req.window_days.min(366))
        .await?;
    Ok(ApiResponse::ok(entries))
}

/// Consistency percentages over the configured windows.
async fn consistency(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<ConsistencySummary>> {
    let summary = state.habit_service.consistency(&user.id).await?;
    Ok(ApiResponse::ok(summary))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/toggle", post(toggle_check))
        .route("/calendar", post(calendar))
        .route("/consistency", post(consistency))
}
