//! API integration tests.
//!
//! These tests verify the API endpoints work correctly together.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::redundant_clone)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
use slimfit_api::{middleware::AppState, router as api_router};
use slimfit_common::config::HabitsConfig;
use slimfit_core::{ChallengeService, HabitService, ModerationService, UserService};
use slimfit_db::entities::challenge;
use slimfit_db::repositories::{ChallengeRepository, DailyLogRepository, UserRepository};
use std::sync::Arc;
use tower::ServiceExt;

/// Create a mock database connection with queued query results.
fn create_mock_db() -> DatabaseConnection {
    MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<challenge::Model>::new()])
        .into_connection()
}

/// Create test app state with mock database.
fn create_test_state() -> AppState {
    let db = Arc::new(create_mock_db());

    let user_repo = UserRepository::new(Arc::clone(&db));
    let daily_log_repo = DailyLogRepository::new(Arc::clone(&db));
    let challenge_repo = ChallengeRepository::new(Arc::clone(&db));

    AppState {
        user_service: UserService::new(user_repo.clone()),
        habit_service: HabitService::new(daily_log_repo.clone(), HabitsConfig::default()),
        challenge_service: ChallengeService::new(challenge_repo.clone(), user_repo.clone()),
        moderation_service: ModerationService::new(user_repo, daily_log_repo, challenge_repo),
    }
}

/// Create the test router.
fn create_test_router() -> Router {
    api_router().with_state(create_test_state())
}

#[tokio::test]
async fn test_challenges_list_returns_ok() {
    let app = create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/challenges/list")
                .method("POST")
                .header("Content-Type", "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_habits_toggle_requires_auth() {
    let app = create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/habits/toggle")
                .method("POST")
                .header("Content-Type", "application/json")
                .body(Body::from(r#"{"field":"trained"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    // No auth middleware ran, so the extractor rejects the request
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_list_requires_auth() {
    let app = create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/admin/users/list")
                .method("POST")
                .header("Content-Type", "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_mute_requires_auth() {
    let app = create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/admin/mute-user")
                .method("POST")
                .header("Content-Type", "application/json")
                .body(Body::from(r#"{"userId":"u1","durationHours":72}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/nonexistent")
                .method("POST")
                .header("Content-Type", "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
