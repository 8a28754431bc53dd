//! Admin/Moderation endpoints.

use axum::{Json, Router, extract::State, routing::post};
use serde::{Deserialize, Serialize};
use slimfit_common::AppResult;
use slimfit_core::{
    AppBanInput, ExportData, FeedBanInput, MuteUserInput, PenalizePointsInput, PermanentBanInput,
    UserWithStatus,
};
use slimfit_db::entities::user;
use slimfit_engine as engine;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// A user row in the admin table: derived status plus condition badges.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUserResponse {
    pub id: String,
    pub username: String,
    pub name: Option<String>,
    pub points: i32,
    pub is_admin: bool,
    /// Single highest-severity status label.
    pub status: String,
    /// Independent condition badges; several may be true at once.
    pub banned: bool,
    pub feed_banned: bool,
    pub muted: bool,
    pub ban_reason: Option<String>,
    pub banned_until: Option<String>,
    pub feed_banned_until: Option<String>,
    pub muted_until: Option<String>,
    pub created_at: String,
}

impl From<UserWithStatus> for AdminUserResponse {
    fn from(row: UserWithStatus) -> Self {
        let user = row.user;
        Self {
            id: user.id,
            username: user.username,
            name: user.name,
            points: user.points,
            is_admin: user.is_admin,
            status: row.status.as_str().to_string(),
            banned: row.banned,
            feed_banned: row.feed_banned,
            muted: row.muted,
            ban_reason: user.ban_reason,
            banned_until: user.banned_until.map(|t| t.to_rfc3339()),
            feed_banned_until: user.feed_banned_until.map(|t| t.to_rfc3339()),
            muted_until: user.muted_until.map(|t| t.to_rfc3339()),
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

impl AdminUserResponse {
    /// Decorate a bare user row with freshly derived status and badges.
    fn from_model(user: user::Model) -> Self {
        let now = chrono::Utc::now();
        let flags = user.flag_record();
        Self::from(UserWithStatus {
            status: engine::evaluate(&flags, now),
            banned: engine::is_banned(&flags, now),
            feed_banned: engine::is_feed_banned(&flags, now),
            muted: engine::is_muted(&flags, now),
            user,
        })
    }
}

/// List users request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersRequest {
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

const fn default_limit() -> u64 {
    10
}

/// Mute user request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MuteUserRequest {
    pub user_id: String,
    /// Duration in hours.
    pub duration_hours: i64,
}

/// Feed ban request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedBanRequest {
    pub user_id: String,
    /// Duration in hours.
    pub duration_hours: i64,
}

/// App ban request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppBanRequest {
    pub user_id: String,
    /// Duration in hours.
    pub duration_hours: i64,
    pub reason: String,
}

/// Permanent ban request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermanentBanRequest {
    pub user_id: String,
    pub reason: String,
}

/// Unban request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnbanUserRequest {
    pub user_id: String,
}

/// Penalize points request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PenalizePointsRequest {
    pub user_id: String,
    pub amount: i32,
}

// ========== User List ==========

/// List users with derived status (admin only).
async fn list_users(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<ListUsersRequest>,
) -> AppResult<ApiResponse<Vec<AdminUserResponse>>> {
    // Verify admin
    if !user.is_admin {
        return Err(slimfit_common::AppError::Forbidden(
            "Only admins can list users".to_string(),
        ));
    }

    let rows = state
        .moderation_service
        .list_users_with_status(req.limit.min(100), req.offset)
        .await?;

    let responses: Vec<AdminUserResponse> =
        rows.into_iter().map(std::convert::Into::into).collect();
    Ok(ApiResponse::ok(responses))
}

// ========== Moderation Commands ==========

/// Mute a user for a number of hours (admin only).
async fn mute_user(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<MuteUserRequest>,
) -> AppResult<ApiResponse<AdminUserResponse>> {
    let updated = state
        .moderation_service
        .mute_user(
            &user.id,
            MuteUserInput {
                user_id: req.user_id,
                duration_hours: req.duration_hours,
            },
        )
        .await?;

    Ok(ApiResponse::ok(AdminUserResponse::from_model(updated)))
}

/// Restrict a user from the feed (admin only).
async fn ban_user_from_feed(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<FeedBanRequest>,
) -> AppResult<ApiResponse<AdminUserResponse>> {
    let updated = state
        .moderation_service
        .ban_from_feed(
            &user.id,
            FeedBanInput {
                user_id: req.user_id,
                duration_hours: req.duration_hours,
            },
        )
        .await?;

    Ok(ApiResponse::ok(AdminUserResponse::from_model(updated)))
}

/// Ban a user app-wide for a number of hours (admin only).
async fn ban_user(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<AppBanRequest>,
) -> AppResult<ApiResponse<AdminUserResponse>> {
    let updated = state
        .moderation_service
        .ban_from_app(
            &user.id,
            AppBanInput {
                user_id: req.user_id,
                duration_hours: req.duration_hours,
                reason: req.reason,
            },
        )
        .await?;

    Ok(ApiResponse::ok(AdminUserResponse::from_model(updated)))
}

/// Ban a user permanently (admin only).
async fn ban_user_permanently(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<PermanentBanRequest>,
) -> AppResult<ApiResponse<AdminUserResponse>> {
    let updated = state
        .moderation_service
        .ban_permanently(
            &user.id,
            PermanentBanInput {
                user_id: req.user_id,
                reason: req.reason,
            },
        )
        .await?;

    Ok(ApiResponse::ok(AdminUserResponse::from_model(updated)))
}

/// Lift every restriction on a user (admin only).
async fn unban_user(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<UnbanUserRequest>,
) -> AppResult<ApiResponse<AdminUserResponse>> {
    let updated = state
        .moderation_service
        .unban(&user.id, &req.user_id)
        .await?;

    Ok(ApiResponse::ok(AdminUserResponse::from_model(updated)))
}

/// Deduct points from a user (admin only).
async fn penalize_points(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<PenalizePointsRequest>,
) -> AppResult<ApiResponse<AdminUserResponse>> {
    let updated = state
        .moderation_service
        .penalize_points(
            &user.id,
            PenalizePointsInput {
                user_id: req.user_id,
                amount: req.amount,
            },
        )
        .await?;

    Ok(ApiResponse::ok(AdminUserResponse::from_model(updated)))
}

// ========== Export ==========

/// Export the raw collections (admin only).
async fn export(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<ExportData>> {
    let data = state.moderation_service.export(&user.id).await?;
    Ok(ApiResponse::ok(data))
}

pub fn router() -> Router<AppState> {
    Router::new()
        // User list
        .route("/users/list", post(list_users))
        // Moderation commands
        .route("/mute-user", post(mute_user))
        .route("/ban-user-from-feed", post(ban_user_from_feed))
        .route("/ban-user", post(ban_user))
        .route("/ban-user-permanently", post(ban_user_permanently))
        .route("/unban-user", post(unban_user))
        .route("/penalize-points", post(penalize_points))
        // Export
        .route("/export", post(export))
}
