//! Challenge endpoints.

use axum::{Json, Router, extract::State, routing::post};
use serde::{Deserialize, Serialize};
use slimfit_common::AppResult;
use slimfit_core::{ChallengeStats, CreateChallengeInput, UpdateProgressInput};
use slimfit_db::entities::{challenge, challenge_participant};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Challenge response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub duration_days: i32,
    pub reward_points: i32,
    pub price_cents: i32,
    pub created_at: String,
}

impl From<challenge::Model> for ChallengeResponse {
    fn from(challenge: challenge::Model) -> Self {
        Self {
            id: challenge.id,
            title: challenge.title,
            description: challenge.description,
            duration_days: challenge.duration_days,
            reward_points: challenge.reward_points,
            price_cents: challenge.price_cents,
            created_at: challenge.created_at.to_rfc3339(),
        }
    }
}

/// Participation response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipationResponse {
    pub challenge_id: String,
    pub progress: i32,
    pub joined_at: String,
    pub completed_at: Option<String>,
}

impl From<challenge_participant::Model> for ParticipationResponse {
    fn from(p: challenge_participant::Model) -> Self {
        Self {
            challenge_id: p.challenge_id,
            progress: p.progress,
            joined_at: p.joined_at.to_rfc3339(),
            completed_at: p.completed_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// Create challenge request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChallengeRequest {
    pub title: String,
    pub description: Option<String>,
    pub duration_days: i32,
    #[serde(default)]
    pub reward_points: i32,
    #[serde(default)]
    pub price_cents: i32,
}

/// List challenges request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListChallengesRequest {
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

const fn default_limit() -> u64 {
    10
}

/// Show / join / progress request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeIdRequest {
    pub challenge_id: String,
}

/// Update progress request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProgressRequest {
    pub challenge_id: String,
    pub progress: i32,
}

/// Progress response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressResponse {
    pub participating: bool,
    pub progress: i32,
}

/// Create a challenge (admin only).
async fn create_challenge(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreateChallengeRequest>,
) -> AppResult<ApiResponse<ChallengeResponse>> {
    let challenge = state
        .challenge_service
        .create(
            &user.id,
            CreateChallengeInput {
                title: req.title,
                description: req.description,
                duration_days: req.duration_days,
                reward_points: req.reward_points,
                price_cents: req.price_cents,
            },
        )
        .await?;

    Ok(ApiResponse::ok(challenge.into()))
}

/// List challenges.
async fn list_challenges(
    State(state): State<AppState>,
    Json(req): Json<ListChallengesRequest>,
) -> AppResult<ApiResponse<Vec<ChallengeResponse>>> {
    let challenges = state
        .challenge_service
        .list(req.limit.min(100), req.offset)
        .await?;

    let responses: Vec<ChallengeResponse> =
        challenges.into_iter().map(std::convert::Into::into).collect();
    Ok(ApiResponse::ok(responses))
}

/// Show a challenge.
async fn show_challenge(
    State(state): State<AppState>,
    Json(req): Json<ChallengeIdRequest>,
) -> AppResult<ApiResponse<ChallengeResponse>> {
    let challenge = state.challenge_service.get(&req.challenge_id).await?;
    Ok(ApiResponse::ok(challenge.into()))
}

/// Join a challenge.
async fn join_challenge(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<ChallengeIdRequest>,
) -> AppResult<ApiResponse<ParticipationResponse>> {
    let participation = state
        .challenge_service
        .join(&user.id, &req.challenge_id)
        .await?;
    Ok(ApiResponse::ok(participation.into()))
}

/// Update progress in a challenge.
async fn update_progress(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<UpdateProgressRequest>,
) -> AppResult<ApiResponse<ParticipationResponse>> {
    let participation = state
        .challenge_service
        .update_progress(
            &user.id,
            UpdateProgressInput {
                challenge_id: req.challenge_id,
                progress: req.progress,
            },
        )
        .await?;
    Ok(ApiResponse::ok(participation.into()))
}

/// The authenticated user's progress in a challenge.
async fn progress(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<ChallengeIdRequest>,
) -> AppResult<ApiResponse<ProgressResponse>> {
    let participating = state
        .challenge_service
        .is_participating(&user.id, &req.challenge_id)
        .await?;
    let progress = state
        .challenge_service
        .get_progress(&user.id, &req.challenge_id)
        .await?;

    Ok(ApiResponse::ok(ProgressResponse {
        participating,
        progress,
    }))
}

/// Aggregate stats.
async fn stats(State(state): State<AppState>) -> AppResult<ApiResponse<ChallengeStats>> {
    let stats = state.challenge_service.stats().await?;
    Ok(ApiResponse::ok(stats))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_challenge))
        .route("/list", post(list_challenges))
        .route("/show", post(show_challenge))
        .route("/join", post(join_challenge))
        .route("/update-progress", post(update_progress))
        .route("/progress", post(progress))
        .route("/stats", post(stats))
}
