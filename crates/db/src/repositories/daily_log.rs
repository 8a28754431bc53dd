//! Daily log repository.

use std::sync::Arc;

use crate::entities::{DailyLog, daily_log};
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use slimfit_common::{AppError, AppResult};

/// Daily log repository for database operations.
#[derive(Clone)]
pub struct DailyLogRepository {
    db: Arc<DatabaseConnection>,
}

impl DailyLogRepository {
    /// Create a new daily log repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// All logs a user has for one calendar date.
    ///
    /// The schema enforces one row per (user, date); this still returns a
    /// `Vec` so callers can detect and resolve duplicates defensively
    /// instead of trusting the constraint.
    pub async fn find_for_date(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> AppResult<Vec<daily_log::Model>> {
        DailyLog::find()
            .filter(daily_log::Column::UserId.eq(user_id))
            .filter(daily_log::Column::LogDate.eq(date))
            .order_by_desc(daily_log::Column::UpdatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// A user's logs from `since` onward (inclusive), oldest first.
    pub async fn find_since(
        &self,
        user_id: &str,
        since: NaiveDate,
    ) -> AppResult<Vec<daily_log::Model>> {
        DailyLog::find()
            .filter(daily_log::Column::UserId.eq(user_id))
            .filter(daily_log::Column::LogDate.gte(since))
            .order_by_asc(daily_log::Column::LogDate)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// All logs, for the admin export.
    pub async fn all(&self) -> AppResult<Vec<daily_log::Model>> {
        DailyLog::find()
            .order_by_asc(daily_log::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new log.
    pub async fn create(&self, model: daily_log::ActiveModel) -> AppResult<daily_log::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update an existing log.
    pub async fn update(&self, model: daily_log::ActiveModel) -> AppResult<daily_log::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_log(id: &str, user_id: &str, date: &str) -> daily_log::Model {
        daily_log::Model {
            id: id.to_string(),
            user_id: user_id.to_string(),
            log_date: date.parse().unwrap(),
            ate_healthy: true,
            trained: false,
            drank_water: false,
            note: None,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_for_date() {
        let log = create_test_log("log1", "user1", "2025-03-10");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[log]])
                .into_connection(),
        );

        let repo = DailyLogRepository::new(db);
        let result = repo
            .find_for_date("user1", "2025-03-10".parse().unwrap())
            .await
            .unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "log1");
    }

    #[tokio::test]
    async fn test_find_since_empty() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<daily_log::Model>::new()])
                .into_connection(),
        );

        let repo = DailyLogRepository::new(db);
        let result = repo
            .find_since("user1", "2025-03-04".parse().unwrap())
            .await
            .unwrap();

        assert!(result.is_empty());
    }
}
