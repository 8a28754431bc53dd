//! Challenge service: authoring, participation and progress.

use chrono::Utc;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use slimfit_common::{AppError, AppResult, IdGenerator};
use slimfit_db::{
    entities::{challenge, challenge_participant},
    repositories::{ChallengeRepository, UserRepository},
};
use slimfit_engine::{self as engine, Participation};
use validator::Validate;

use super::engine_error;

/// Input for creating a challenge.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateChallengeInput {
    #[validate(length(min = 1, max = 256))]
    pub title: String,

    #[validate(length(max = 4000))]
    pub description: Option<String>,

    #[validate(range(min = 1, max = 365))]
    pub duration_days: i32,

    #[validate(range(min = 0))]
    pub reward_points: i32,

    #[validate(range(min = 0))]
    pub price_cents: i32,
}

/// Input for a progress update.
///
/// Out-of-range values are clamped, not rejected.
#[derive(Debug, Deserialize)]
pub struct UpdateProgressInput {
    pub challenge_id: String,
    pub progress: i32,
}

/// Aggregate participation stats.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeStats {
    pub active_count: usize,
    pub completed_count: usize,
    pub total_points: i64,
}

/// Challenge service for business logic.
#[derive(Clone)]
pub struct ChallengeService {
    challenge_repo: ChallengeRepository,
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

impl ChallengeService {
    /// Create a new challenge service.
    #[must_use]
    pub const fn new(challenge_repo: ChallengeRepository, user_repo: UserRepository) -> Self {
        Self {
            challenge_repo,
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a new challenge (admin only).
    pub async fn create(
        &self,
        actor_id: &str,
        input: CreateChallengeInput,
    ) -> AppResult<challenge::Model> {
        input.validate()?;

        let actor = self.user_repo.get_by_id(actor_id).await?;
        if !actor.is_admin {
            return Err(AppError::Forbidden(
                "Only admins can create challenges".to_string(),
            ));
        }

        let model = challenge::ActiveModel {
            id: Set(self.id_gen.generate()),
            title: Set(input.title),
            description: Set(input.description),
            duration_days: Set(input.duration_days),
            reward_points: Set(input.reward_points),
            price_cents: Set(input.price_cents),
            created_at: Set(Utc::now().into()),
        };

        self.challenge_repo.create(model).await
    }

    /// List challenges (paginated).
    pub async fn list(&self, limit: u64, offset: u64) -> AppResult<Vec<challenge::Model>> {
        self.challenge_repo.list(limit, offset).await
    }

    /// Get a challenge by ID.
    pub async fn get(&self, id: &str) -> AppResult<challenge::Model> {
        self.challenge_repo.get_by_id(id).await
    }

    /// Join a challenge.
    ///
    /// Joining twice is a conflict; the participations collection is left
    /// unchanged.
    pub async fn join(
        &self,
        user_id: &str,
        challenge_id: &str,
    ) -> AppResult<challenge_participant::Model> {
        // Challenge must exist
        self.challenge_repo.get_by_id(challenge_id).await?;

        let now = Utc::now();
        let snapshot = self.participations_for(user_id).await?;
        let next = engine::join(&snapshot, user_id, challenge_id, now).map_err(engine_error)?;

        // The appended entry is the one to persist.
        let joined = next
            .last()
            .ok_or_else(|| AppError::Internal("join produced no participation".to_string()))?;

        let model = challenge_participant::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(joined.user_id.clone()),
            challenge_id: Set(joined.challenge_id.clone()),
            progress: Set(joined.progress),
            joined_at: Set(joined.joined_at.into()),
            completed_at: Set(None),
        };

        tracing::info!(user_id, challenge_id, "User joined challenge");
        self.challenge_repo.create_participation(model).await
    }

    /// Update a user's progress in a challenge.
    ///
    /// Values are clamped to 0–100. The challenge's reward points are
    /// credited exactly once, when progress first reaches 100.
    pub async fn update_progress(
        &self,
        user_id: &str,
        input: UpdateProgressInput,
    ) -> AppResult<challenge_participant::Model> {
        let challenge = self.challenge_repo.get_by_id(&input.challenge_id).await?;

        let now = Utc::now();
        let snapshot = self.participations_for(user_id).await?;
        let was_completed =
            engine::get_progress(&snapshot, user_id, &input.challenge_id) == 100;

        let next = engine::update_progress(
            &snapshot,
            user_id,
            &input.challenge_id,
            input.progress,
            now,
        )
        .map_err(engine_error)?;

        let updated = next
            .iter()
            .find(|p| p.challenge_id == input.challenge_id)
            .ok_or_else(|| {
                AppError::Internal("updated participation missing from snapshot".to_string())
            })?;

        let row = self
            .challenge_repo
            .find_participation(user_id, &input.challenge_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "no participation for challenge {}",
                    input.challenge_id
                ))
            })?;

        let mut model: challenge_participant::ActiveModel = row.into();
        model.progress = Set(updated.progress);
        model.completed_at = Set(updated.completed_at.map(std::convert::Into::into));
        let persisted = self.challenge_repo.update_participation(model).await?;

        // First completion awards the challenge's reward points.
        if !was_completed && persisted.completed_at.is_some() {
            let user = self.user_repo.get_by_id(user_id).await?;
            let new_points = user.points.saturating_add(challenge.reward_points);
            self.user_repo
                .update_points(user_id, new_points, now.into())
                .await?;
            tracing::info!(
                user_id,
                challenge_id = %input.challenge_id,
                reward_points = challenge.reward_points,
                "Challenge completed, points awarded"
            );
        }

        Ok(persisted)
    }

    /// Whether the user participates in the challenge. Absence is `false`.
    pub async fn is_participating(&self, user_id: &str, challenge_id: &str) -> AppResult<bool> {
        let snapshot = self.participations_for(user_id).await?;
        Ok(engine::is_participating(&snapshot, user_id, challenge_id))
    }

    /// The user's progress in the challenge, `0` when not participating.
    pub async fn get_progress(&self, user_id: &str, challenge_id: &str) -> AppResult<i32> {
        let snapshot = self.participations_for(user_id).await?;
        Ok(engine::get_progress(&snapshot, user_id, challenge_id))
    }

    /// A user's participations, oldest first.
    pub async fn participations(
        &self,
        user_id: &str,
    ) -> AppResult<Vec<challenge_participant::Model>> {
        self.challenge_repo.find_participations_for_user(user_id).await
    }

    /// Aggregate stats over all users and participations.
    pub async fn stats(&self) -> AppResult<ChallengeStats> {
        let participations: Vec<Participation> = self
            .challenge_repo
            .all_participations()
            .await?
            .iter()
            .map(challenge_participant::Model::to_engine)
            .collect();

        let users = self.user_repo.all().await?;
        let total_points = engine::total_points(users.iter().map(|u| Some(u.points)));

        Ok(ChallengeStats {
            active_count: engine::active_count(&participations),
            completed_count: engine::completed_count(&participations),
            total_points,
        })
    }

    /// The user's participations as an engine snapshot.
    async fn participations_for(&self, user_id: &str) -> AppResult<Vec<Participation>> {
        Ok(self
            .challenge_repo
            .find_participations_for_user(user_id)
            .await?
            .iter()
            .map(challenge_participant::Model::to_engine)
            .collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_create_challenge_input_validation() {
        let input = CreateChallengeInput {
            title: String::new(),
            description: None,
            duration_days: 30,
            reward_points: 100,
            price_cents: 0,
        };
        assert!(input.validate().is_err());

        let input = CreateChallengeInput {
            title: "30 dias de treino".to_string(),
            description: None,
            duration_days: 0,
            reward_points: 100,
            price_cents: 0,
        };
        assert!(input.validate().is_err());
    }
}
