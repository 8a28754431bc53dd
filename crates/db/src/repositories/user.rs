//! User repository.

use std::sync::Arc;

use crate::entities::{User, user};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, sea_query::Expr,
};
use slimfit_common::{AppError, AppResult};
use slimfit_engine::FlagRecord;

/// User repository for database operations.
#[derive(Clone)]
pub struct UserRepository {
    db: Arc<DatabaseConnection>,
}

impl UserRepository {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a user by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<user::Model>> {
        User::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a user by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<user::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::UserNotFound(id.to_string()))
    }

    /// Find a user by username (case-insensitive).
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<user::Model>> {
        User::find()
            .filter(user::Column::UsernameLower.eq(username.to_lowercase()))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a user by token.
    pub async fn find_by_token(&self, token: &str) -> AppResult<Option<user::Model>> {
        User::find()
            .filter(user::Column::Token.eq(token))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new user.
    pub async fn create(&self, model: user::ActiveModel) -> AppResult<user::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a user.
    pub async fn update(&self, model: user::ActiveModel) -> AppResult<user::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List users (paginated, newest first).
    pub async fn list(&self, limit: u64, offset: u64) -> AppResult<Vec<user::Model>> {
        User::find()
            .order_by_desc(user::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// All users, for the admin export.
    pub async fn all(&self) -> AppResult<Vec<user::Model>> {
        User::find()
            .order_by_asc(user::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count all users.
    pub async fn count(&self) -> AppResult<u64> {
        User::find()
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Write a user's moderation flags in one conditional update.
    ///
    /// All five flag fields plus the reason are written together so a
    /// partial state can never leak to storage. The write carries the
    /// `updated_at` value the caller read with the flags; if the row has
    /// moved since, zero rows match and the write is rejected with
    /// `Conflict` (the caller re-reads and retries).
    pub async fn update_flags(
        &self,
        user_id: &str,
        flags: &FlagRecord,
        expected_updated_at: Option<sea_orm::prelude::DateTimeWithTimeZone>,
        now: sea_orm::prelude::DateTimeWithTimeZone,
    ) -> AppResult<user::Model> {
        let mut update = User::update_many()
            .col_expr(user::Column::IsBanned, Expr::value(flags.is_banned))
            .col_expr(
                user::Column::BannedUntil,
                Expr::value(flags.banned_until.map(|t| t.fixed_offset())),
            )
            .col_expr(user::Column::BanReason, Expr::value(flags.ban_reason.clone()))
            .col_expr(
                user::Column::FeedBannedUntil,
                Expr::value(flags.feed_banned_until.map(|t| t.fixed_offset())),
            )
            .col_expr(user::Column::IsMuted, Expr::value(flags.is_muted))
            .col_expr(
                user::Column::MutedUntil,
                Expr::value(flags.muted_until.map(|t| t.fixed_offset())),
            )
            .col_expr(user::Column::UpdatedAt, Expr::value(Some(now)))
            .filter(user::Column::Id.eq(user_id));

        update = match expected_updated_at {
            Some(ts) => update.filter(user::Column::UpdatedAt.eq(ts)),
            None => update.filter(user::Column::UpdatedAt.is_null()),
        };

        let result = update
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            return match self.find_by_id(user_id).await? {
                Some(_) => Err(AppError::Conflict(
                    "User flags were modified concurrently".to_string(),
                )),
                None => Err(AppError::UserNotFound(user_id.to_string())),
            };
        }

        self.get_by_id(user_id).await
    }

    /// Set a user's point balance.
    pub async fn update_points(
        &self,
        user_id: &str,
        points: i32,
        now: sea_orm::prelude::DateTimeWithTimeZone,
    ) -> AppResult<user::Model> {
        let result = User::update_many()
            .col_expr(user::Column::Points, Expr::value(points))
            .col_expr(user::Column::UpdatedAt, Expr::value(Some(now)))
            .filter(user::Column::Id.eq(user_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(AppError::UserNotFound(user_id.to_string()));
        }

        self.get_by_id(user_id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn create_test_user(id: &str, username: &str) -> user::Model {
        user::Model {
            id: id.to_string(),
            username: username.to_string(),
            username_lower: username.to_lowercase(),
            token: None,
            name: None,
            avatar_url: None,
            points: 0,
            is_admin: false,
            is_banned: false,
            banned_until: None,
            ban_reason: None,
            feed_banned_until: None,
            is_muted: false,
            muted_until: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let user = create_test_user("user1", "maria");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user.clone()]])
                .into_connection(),
        );

        let repo = UserRepository::new(db);
        let result = repo.get_by_id("user1").await.unwrap();

        assert_eq!(result.id, "user1");
        assert_eq!(result.username, "maria");
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user::Model>::new()])
                .into_connection(),
        );

        let repo = UserRepository::new(db);
        let result = repo.get_by_id("missing").await;

        assert!(matches!(result, Err(AppError::UserNotFound(_))));
    }

    #[tokio::test]
    async fn test_update_flags_stale_write_is_conflict() {
        let user = create_test_user("user1", "maria");

        // Zero rows affected, then the existence check finds the user:
        // the write was stale, not targeting a missing user.
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                }])
                .append_query_results([[user]])
                .into_connection(),
        );

        let repo = UserRepository::new(db);
        let result = repo
            .update_flags("user1", &FlagRecord::default(), None, Utc::now().into())
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_flags_missing_user() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                }])
                .append_query_results([Vec::<user::Model>::new()])
                .into_connection(),
        );

        let repo = UserRepository::new(db);
        let result = repo
            .update_flags("ghost", &FlagRecord::default(), None, Utc::now().into())
            .await;

        assert!(matches!(result, Err(AppError::UserNotFound(_))));
    }
}
