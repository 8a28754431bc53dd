//! Habit service: daily check-ins, calendar and consistency views.

use chrono::{Days, Utc};
use sea_orm::Set;
use serde::Serialize;
use slimfit_common::{AppResult, IdGenerator, config::HabitsConfig};
use slimfit_db::{entities::daily_log, repositories::DailyLogRepository};
use slimfit_engine::{self as engine, CalendarEntry, CheckField};

/// Rolling consistency percentages over the configured windows.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencySummary {
    pub short_window_days: u32,
    pub short_percentage: u8,
    pub long_window_days: u32,
    pub long_percentage: u8,
}

/// Habit service for business logic.
#[derive(Clone)]
pub struct HabitService {
    log_repo: DailyLogRepository,
    id_gen: IdGenerator,
    config: HabitsConfig,
}

impl HabitService {
    /// Create a new habit service.
    #[must_use]
    pub const fn new(log_repo: DailyLogRepository, config: HabitsConfig) -> Self {
        Self {
            log_repo,
            id_gen: IdGenerator::new(),
            config,
        }
    }

    /// Flip one habit check on today's log, creating the log if needed.
    pub async fn toggle_check(
        &self,
        user_id: &str,
        field: CheckField,
    ) -> AppResult<daily_log::Model> {
        let now = Utc::now();
        let today = now.date_naive();

        let rows = self.log_repo.find_for_date(user_id, today).await?;
        if rows.len() > 1 {
            tracing::warn!(
                user_id,
                %today,
                count = rows.len(),
                "Duplicate daily logs for one date"
            );
        }

        // Rows come back newest-updated first; the engine treats the
        // newest as authoritative.
        let existing = rows.first();
        let next = engine::toggle_check(existing.map(|m| m.to_engine()).as_ref(), field, today, now);

        match existing {
            Some(row) => {
                let mut model: daily_log::ActiveModel = row.clone().into();
                model.ate_healthy = Set(next.ate_healthy);
                model.trained = Set(next.trained);
                model.drank_water = Set(next.drank_water);
                model.updated_at = Set(now.into());
                self.log_repo.update(model).await
            }
            None => {
                let model = daily_log::ActiveModel {
                    id: Set(self.id_gen.generate()),
                    user_id: Set(user_id.to_string()),
                    log_date: Set(next.date),
                    ate_healthy: Set(next.ate_healthy),
                    trained: Set(next.trained),
                    drank_water: Set(next.drank_water),
                    note: Set(next.note),
                    created_at: Set(now.into()),
                    updated_at: Set(now.into()),
                };
                self.log_repo.create(model).await
            }
        }
    }

    /// Calendar view over the last `window_days` days, today inclusive.
    pub async fn calendar(&self, user_id: &str, window_days: u32) -> AppResult<Vec<CalendarEntry>> {
        let today = Utc::now().date_naive();
        let logs = self.window_logs(user_id, window_days).await?;

        Ok(engine::build_calendar(&logs, window_days, today))
    }

    /// Consistency percentages over the configured short and long windows.
    pub async fn consistency(&self, user_id: &str) -> AppResult<ConsistencySummary> {
        let today = Utc::now().date_naive();
        let long_window = self.config.long_window_days.max(self.config.short_window_days);
        let logs = self.window_logs(user_id, long_window).await?;

        Ok(ConsistencySummary {
            short_window_days: self.config.short_window_days,
            short_percentage: engine::consistency_percentage(
                &logs,
                self.config.short_window_days,
                today,
            ),
            long_window_days: self.config.long_window_days,
            long_percentage: engine::consistency_percentage(
                &logs,
                self.config.long_window_days,
                today,
            ),
        })
    }

    /// Load a user's logs covering the window, surfacing duplicates.
    async fn window_logs(
        &self,
        user_id: &str,
        window_days: u32,
    ) -> AppResult<Vec<engine::DailyLog>> {
        let today = Utc::now().date_naive();
        let since = today
            .checked_sub_days(Days::new(u64::from(window_days.saturating_sub(1))))
            .unwrap_or(today);

        let rows = self.log_repo.find_since(user_id, since).await?;
        let logs: Vec<engine::DailyLog> = rows.iter().map(daily_log::Model::to_engine).collect();

        let duplicates = engine::duplicate_count(&logs);
        if duplicates > 0 {
            tracing::warn!(user_id, duplicates, "Duplicate daily logs in window");
        }

        Ok(logs)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::NaiveDate;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn service(db: sea_orm::DatabaseConnection) -> HabitService {
        HabitService::new(
            DailyLogRepository::new(Arc::new(db)),
            HabitsConfig::default(),
        )
    }

    fn log_row(id: &str, user_id: &str, date: NaiveDate) -> daily_log::Model {
        daily_log::Model {
            id: id.to_string(),
            user_id: user_id.to_string(),
            log_date: date,
            ate_healthy: false,
            trained: false,
            drank_water: false,
            note: None,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_toggle_creates_log_when_none_exists() {
        let today = Utc::now().date_naive();
        let mut created = log_row("log1", "user1", today);
        created.trained = true;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            // No existing log for today
            .append_query_results([Vec::<daily_log::Model>::new()])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            // Insert returns the created row
            .append_query_results([[created]])
            .into_connection();

        let result = service(db)
            .toggle_check("user1", CheckField::Trained)
            .await
            .unwrap();

        assert!(result.trained);
        assert!(!result.ate_healthy);
    }

    #[tokio::test]
    async fn test_calendar_is_total_without_logs() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<daily_log::Model>::new()])
            .into_connection();

        let entries = service(db).calendar("user1", 7).await.unwrap();
        assert_eq!(entries.len(), 7);
        assert!(entries.iter().all(|e| e.completed == 0));
    }
}
