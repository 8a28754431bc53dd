//! Moderation service: admin actions on user flags and points.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use slimfit_common::{AppError, AppResult};
use slimfit_db::{
    entities::{challenge_participant, daily_log, user},
    repositories::{ChallengeRepository, DailyLogRepository, UserRepository},
};
use slimfit_engine::{self as engine, AccessStatus};
use validator::Validate;

/// Input for a time-boxed mute.
#[derive(Debug, Deserialize, Validate)]
pub struct MuteUserInput {
    pub user_id: String,
    /// Duration in hours.
    #[validate(range(min = 1, max = 8760))]
    pub duration_hours: i64,
}

/// Input for a time-boxed feed restriction.
#[derive(Debug, Deserialize, Validate)]
pub struct FeedBanInput {
    pub user_id: String,
    /// Duration in hours.
    #[validate(range(min = 1, max = 8760))]
    pub duration_hours: i64,
}

/// Input for a time-boxed app-wide ban.
#[derive(Debug, Deserialize, Validate)]
pub struct AppBanInput {
    pub user_id: String,
    /// Duration in hours.
    #[validate(range(min = 1, max = 8760))]
    pub duration_hours: i64,
    #[validate(length(min = 1, max = 2000))]
    pub reason: String,
}

/// Input for a permanent ban.
#[derive(Debug, Deserialize, Validate)]
pub struct PermanentBanInput {
    pub user_id: String,
    #[validate(length(min = 1, max = 2000))]
    pub reason: String,
}

/// Input for a point penalty.
#[derive(Debug, Deserialize, Validate)]
pub struct PenalizePointsInput {
    pub user_id: String,
    #[validate(range(min = 1))]
    pub amount: i32,
}

/// A user decorated with their derived status and condition badges.
///
/// The status is the single highest-severity label; the badges are the
/// independent predicates, so the admin table can show a ban badge and a
/// mute badge at the same time.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserWithStatus {
    #[serde(flatten)]
    pub user: user::Model,
    pub status: AccessStatus,
    pub banned: bool,
    pub feed_banned: bool,
    pub muted: bool,
}

/// Raw collections for the admin export.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportData {
    pub users: Vec<user::Model>,
    pub daily_logs: Vec<daily_log::Model>,
    pub participations: Vec<challenge_participant::Model>,
}

/// Moderation service for admin actions.
#[derive(Clone)]
pub struct ModerationService {
    user_repo: UserRepository,
    daily_log_repo: DailyLogRepository,
    challenge_repo: ChallengeRepository,
}

impl ModerationService {
    /// Create a new moderation service.
    #[must_use]
    pub const fn new(
        user_repo: UserRepository,
        daily_log_repo: DailyLogRepository,
        challenge_repo: ChallengeRepository,
    ) -> Self {
        Self {
            user_repo,
            daily_log_repo,
            challenge_repo,
        }
    }

    /// Mute a user for a number of hours.
    pub async fn mute_user(
        &self,
        moderator_id: &str,
        input: MuteUserInput,
    ) -> AppResult<user::Model> {
        input.validate()?;
        let target = self.guarded_target(moderator_id, &input.user_id).await?;

        let now = Utc::now();
        let flags = engine::mute_for(&target.flag_record(), input.duration_hours, now);

        tracing::info!(
            moderator_id,
            user_id = %input.user_id,
            duration_hours = input.duration_hours,
            "Muting user"
        );
        self.user_repo
            .update_flags(&input.user_id, &flags, target.updated_at, now.into())
            .await
    }

    /// Restrict a user from the feed for a number of hours.
    pub async fn ban_from_feed(
        &self,
        moderator_id: &str,
        input: FeedBanInput,
    ) -> AppResult<user::Model> {
        input.validate()?;
        let target = self.guarded_target(moderator_id, &input.user_id).await?;

        let now = Utc::now();
        let flags = engine::ban_from_feed(&target.flag_record(), input.duration_hours, now);

        tracing::info!(
            moderator_id,
            user_id = %input.user_id,
            duration_hours = input.duration_hours,
            "Banning user from feed"
        );
        self.user_repo
            .update_flags(&input.user_id, &flags, target.updated_at, now.into())
            .await
    }

    /// Ban a user app-wide for a number of hours.
    pub async fn ban_from_app(
        &self,
        moderator_id: &str,
        input: AppBanInput,
    ) -> AppResult<user::Model> {
        input.validate()?;
        let reason = validated_reason(&input.reason)?;
        let target = self.guarded_target(moderator_id, &input.user_id).await?;

        let now = Utc::now();
        let flags = engine::ban_from_app(&target.flag_record(), input.duration_hours, reason, now);

        tracing::info!(
            moderator_id,
            user_id = %input.user_id,
            duration_hours = input.duration_hours,
            "Banning user from app"
        );
        self.user_repo
            .update_flags(&input.user_id, &flags, target.updated_at, now.into())
            .await
    }

    /// Ban a user permanently.
    pub async fn ban_permanently(
        &self,
        moderator_id: &str,
        input: PermanentBanInput,
    ) -> AppResult<user::Model> {
        input.validate()?;
        let reason = validated_reason(&input.reason)?;
        let target = self.guarded_target(moderator_id, &input.user_id).await?;

        let now = Utc::now();
        let flags = engine::ban_permanently(&target.flag_record(), reason);

        tracing::info!(moderator_id, user_id = %input.user_id, "Permanently banning user");
        self.user_repo
            .update_flags(&input.user_id, &flags, target.updated_at, now.into())
            .await
    }

    /// Lift every restriction on a user in one update.
    pub async fn unban(&self, moderator_id: &str, user_id: &str) -> AppResult<user::Model> {
        self.require_admin(moderator_id).await?;
        let target = self.user_repo.get_by_id(user_id).await?;

        let now = Utc::now();
        let flags = engine::unban_all(&target.flag_record());

        tracing::info!(moderator_id, user_id, "Unbanning user");
        self.user_repo
            .update_flags(user_id, &flags, target.updated_at, now.into())
            .await
    }

    /// Deduct points from a user, flooring at zero.
    pub async fn penalize_points(
        &self,
        moderator_id: &str,
        input: PenalizePointsInput,
    ) -> AppResult<user::Model> {
        input.validate()?;
        let target = self.guarded_target(moderator_id, &input.user_id).await?;

        let new_points = engine::penalize_points(target.points, input.amount);

        tracing::info!(
            moderator_id,
            user_id = %input.user_id,
            amount = input.amount,
            new_points,
            "Penalizing user points"
        );
        self.user_repo
            .update_points(&input.user_id, new_points, Utc::now().into())
            .await
    }

    /// List users decorated with derived status and badges (paginated).
    pub async fn list_users_with_status(
        &self,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<UserWithStatus>> {
        let now = Utc::now();
        let users = self.user_repo.list(limit, offset).await?;

        Ok(users
            .into_iter()
            .map(|user| {
                let flags = user.flag_record();
                UserWithStatus {
                    status: engine::evaluate(&flags, now),
                    banned: engine::is_banned(&flags, now),
                    feed_banned: engine::is_feed_banned(&flags, now),
                    muted: engine::is_muted(&flags, now),
                    user,
                }
            })
            .collect())
    }

    /// Serialize the raw collections for the admin export.
    pub async fn export(&self, moderator_id: &str) -> AppResult<ExportData> {
        self.require_admin(moderator_id).await?;

        Ok(ExportData {
            users: self.user_repo.all().await?,
            daily_logs: self.daily_log_repo.all().await?,
            participations: self.challenge_repo.all_participations().await?,
        })
    }

    /// Verify the actor is an admin.
    async fn require_admin(&self, moderator_id: &str) -> AppResult<user::Model> {
        let moderator = self.user_repo.get_by_id(moderator_id).await?;
        if !moderator.is_admin {
            return Err(AppError::Forbidden(
                "Only admins can moderate users".to_string(),
            ));
        }
        Ok(moderator)
    }

    /// Load the target after the standard guards.
    async fn guarded_target(&self, moderator_id: &str, user_id: &str) -> AppResult<user::Model> {
        self.require_admin(moderator_id).await?;

        // Can't moderate yourself
        if moderator_id == user_id {
            return Err(AppError::BadRequest("Cannot moderate yourself".to_string()));
        }

        let target = self.user_repo.get_by_id(user_id).await?;

        // Can't moderate admins
        if target.is_admin {
            return Err(AppError::Forbidden("Cannot moderate an admin".to_string()));
        }

        Ok(target)
    }
}

/// Trim and validate a ban reason.
fn validated_reason(reason: &str) -> AppResult<String> {
    let reason = reason.trim();
    if reason.is_empty() {
        return Err(AppError::BadRequest("Ban reason is required".to_string()));
    }
    Ok(reason.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_mute_input_rejects_zero_duration() {
        let input = MuteUserInput {
            user_id: "user1".to_string(),
            duration_hours: 0,
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_app_ban_input_requires_reason() {
        let input = AppBanInput {
            user_id: "user1".to_string(),
            duration_hours: 24,
            reason: String::new(),
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_reason_is_trimmed() {
        assert_eq!(validated_reason("  spam  ").unwrap(), "spam");
        assert!(validated_reason("   ").is_err());
    }
}
