//! Challenge repository for challenges and participations.

use std::sync::Arc;

use crate::entities::{Challenge, ChallengeParticipant, challenge, challenge_participant};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use slimfit_common::{AppError, AppResult};

/// Challenge repository for database operations.
#[derive(Clone)]
pub struct ChallengeRepository {
    db: Arc<DatabaseConnection>,
}

impl ChallengeRepository {
    /// Create a new challenge repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    // ========== Challenges ==========

    /// Create a new challenge.
    pub async fn create(&self, model: challenge::ActiveModel) -> AppResult<challenge::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a challenge by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<challenge::Model>> {
        Challenge::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a challenge by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<challenge::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::ChallengeNotFound(id.to_string()))
    }

    /// List challenges (paginated, newest first).
    pub async fn list(&self, limit: u64, offset: u64) -> AppResult<Vec<challenge::Model>> {
        Challenge::find()
            .order_by_desc(challenge::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ========== Participations ==========

    /// Find a participation by (user, challenge) pair.
    pub async fn find_participation(
        &self,
        user_id: &str,
        challenge_id: &str,
    ) -> AppResult<Option<challenge_participant::Model>> {
        ChallengeParticipant::find()
            .filter(challenge_participant::Column::UserId.eq(user_id))
            .filter(challenge_participant::Column::ChallengeId.eq(challenge_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// A user's participations, oldest first.
    pub async fn find_participations_for_user(
        &self,
        user_id: &str,
    ) -> AppResult<Vec<challenge_participant::Model>> {
        ChallengeParticipant::find()
            .filter(challenge_participant::Column::UserId.eq(user_id))
            .order_by_asc(challenge_participant::Column::JoinedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// All participations, for stats and the admin export.
    pub async fn all_participations(&self) -> AppResult<Vec<challenge_participant::Model>> {
        ChallengeParticipant::find()
            .order_by_asc(challenge_participant::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count participants of a challenge.
    pub async fn count_participants(&self, challenge_id: &str) -> AppResult<u64> {
        ChallengeParticipant::find()
            .filter(challenge_participant::Column::ChallengeId.eq(challenge_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new participation.
    pub async fn create_participation(
        &self,
        model: challenge_participant::ActiveModel,
    ) -> AppResult<challenge_participant::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update an existing participation.
    pub async fn update_participation(
        &self,
        model: challenge_participant::ActiveModel,
    ) -> AppResult<challenge_participant::Model> {
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

    fn create_test_participation(
        id: &str,
        user_id: &str,
        challenge_id: &str,
        progress: i32,
    ) -> challenge_participant::Model {
        challenge_participant::Model {
            id: id.to_string(),
            user_id: user_id.to_string(),
            challenge_id: challenge_id.to_string(),
            progress,
            joined_at: Utc::now().into(),
            completed_at: None,
        }
    }

    #[tokio::test]
    async fn test_find_participation() {
        let participation = create_test_participation("p1", "user1", "challenge1", 40);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[participation]])
                .into_connection(),
        );

        let repo = ChallengeRepository::new(db);
        let result = repo
            .find_participation("user1", "challenge1")
            .await
            .unwrap();

        assert!(result.is_some());
        assert_eq!(result.unwrap().progress, 40);
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<challenge::Model>::new()])
                .into_connection(),
        );

        let repo = ChallengeRepository::new(db);
        let result = repo.get_by_id("missing").await;

        assert!(matches!(result, Err(AppError::ChallengeNotFound(_))));
    }
}
