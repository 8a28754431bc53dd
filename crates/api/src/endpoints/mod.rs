//! API endpoints.

mod admin;
mod challenges;
mod habits;
mod users;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/habits", habits::router())
        .nest("/challenges", challenges::router())
        .nest("/admin", admin::router())
}
