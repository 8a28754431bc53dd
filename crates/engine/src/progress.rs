//! Challenge participation state and aggregate reductions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A user's participation in a challenge.
///
/// `completed_at` is non-null iff `progress == 100`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participation {
    /// The participating user.
    pub user_id: String,
    /// The challenge.
    pub challenge_id: String,
    /// Completion percentage, clamped to 0–100.
    pub progress: i32,
    /// When the user joined.
    pub joined_at: DateTime<Utc>,
    /// Set exactly once, when progress first reaches 100.
    pub completed_at: Option<DateTime<Utc>>,
}

/// Join a challenge.
///
/// Returns the next participations snapshot with a fresh zero-progress entry
/// appended, or [`EngineError::AlreadyParticipating`] (snapshot unchanged)
/// when a participation for the pair already exists.
pub fn join(
    participations: &[Participation],
    user_id: &str,
    challenge_id: &str,
    now: DateTime<Utc>,
) -> Result<Vec<Participation>, EngineError> {
    if is_participating(participations, user_id, challenge_id) {
        return Err(EngineError::AlreadyParticipating {
            user_id: user_id.to_string(),
            challenge_id: challenge_id.to_string(),
        });
    }

    let mut next = participations.to_vec();
    next.push(Participation {
        user_id: user_id.to_string(),
        challenge_id: challenge_id.to_string(),
        progress: 0,
        joined_at: now,
        completed_at: None,
    });
    Ok(next)
}

/// Set a participation's progress, clamping to 0–100.
///
/// `completed_at` is stamped with `now` exactly when the clamped value first
/// reaches 100; repeating the call with 100 leaves the original timestamp in
/// place. Any value below 100 clears `completed_at`, supporting progress
/// corrections and rollbacks.
pub fn update_progress(
    participations: &[Participation],
    user_id: &str,
    challenge_id: &str,
    new_progress: i32,
    now: DateTime<Utc>,
) -> Result<Vec<Participation>, EngineError> {
    if !is_participating(participations, user_id, challenge_id) {
        return Err(EngineError::ParticipationNotFound {
            user_id: user_id.to_string(),
            challenge_id: challenge_id.to_string(),
        });
    }

    let clamped = new_progress.clamp(0, 100);
    let next = participations
        .iter()
        .map(|p| {
            if p.user_id == user_id && p.challenge_id == challenge_id {
                let completed_at = if clamped == 100 {
                    p.completed_at.or(Some(now))
                } else {
                    None
                };
                Participation {
                    progress: clamped,
                    completed_at,
                    ..p.clone()
                }
            } else {
                p.clone()
            }
        })
        .collect();
    Ok(next)
}

/// Whether a participation exists for the pair. Absence is `false`, never an error.
#[must_use]
pub fn is_participating(
    participations: &[Participation],
    user_id: &str,
    challenge_id: &str,
) -> bool {
    find(participations, user_id, challenge_id).is_some()
}

/// The pair's progress, or `0` when no participation exists.
#[must_use]
pub fn get_progress(participations: &[Participation], user_id: &str, challenge_id: &str) -> i32 {
    find(participations, user_id, challenge_id).map_or(0, |p| p.progress)
}

/// Participations still in progress.
#[must_use]
pub fn active_count(participations: &[Participation]) -> usize {
    participations.iter().filter(|p| p.progress < 100).count()
}

/// Completed participations.
#[must_use]
pub fn completed_count(participations: &[Participation]) -> usize {
    participations
        .iter()
        .filter(|p| p.completed_at.is_some())
        .count()
}

/// Sum point balances, counting missing values as zero.
#[must_use]
pub fn total_points<I>(points: I) -> i64
where
    I: IntoIterator<Item = Option<i32>>,
{
    points
        .into_iter()
        .map(|p| i64::from(p.unwrap_or(0)))
        .sum()
}

fn find<'a>(
    participations: &'a [Participation],
    user_id: &str,
    challenge_id: &str,
) -> Option<&'a Participation> {
    participations
        .iter()
        .find(|p| p.user_id == user_id && p.challenge_id == challenge_id)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn joined(user: &str, challenge: &str, now: DateTime<Utc>) -> Vec<Participation> {
        join(&[], user, challenge, now).unwrap()
    }

    #[test]
    fn join_appends_zero_progress_entry() {
        let now = Utc::now();
        let parts = joined("u1", "c1", now);

        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].progress, 0);
        assert_eq!(parts[0].joined_at, now);
        assert!(parts[0].completed_at.is_none());
    }

    #[test]
    fn duplicate_join_is_rejected_and_snapshot_unchanged() {
        // Joining the same (user, challenge) pair twice must fail.
        let now = Utc::now();
        let parts = joined("u1", "c1", now);

        let err = join(&parts, "u1", "c1", now).unwrap_err();
        assert_eq!(
            err,
            EngineError::AlreadyParticipating {
                user_id: "u1".to_string(),
                challenge_id: "c1".to_string(),
            }
        );
        assert_eq!(parts.len(), 1);
    }

    #[test]
    fn same_user_may_join_other_challenges() {
        let now = Utc::now();
        let parts = joined("u1", "c1", now);
        let parts = join(&parts, "u1", "c2", now).unwrap();
        let parts = join(&parts, "u2", "c1", now).unwrap();

        assert_eq!(parts.len(), 3);
    }

    #[test]
    fn update_progress_clamps_high_and_low() {
        let now = Utc::now();
        let parts = joined("u1", "c1", now);

        let high = update_progress(&parts, "u1", "c1", 150, now).unwrap();
        let capped = update_progress(&parts, "u1", "c1", 100, now).unwrap();
        assert_eq!(high, capped);

        let low = update_progress(&parts, "u1", "c1", -5, now).unwrap();
        let floored = update_progress(&parts, "u1", "c1", 0, now).unwrap();
        assert_eq!(low, floored);
        assert_eq!(get_progress(&low, "u1", "c1"), 0);
    }

    #[test]
    fn completed_at_is_stamped_once() {
        let now = Utc::now();
        let later = now + chrono::Duration::hours(1);
        let parts = joined("u1", "c1", now);

        let done = update_progress(&parts, "u1", "c1", 100, now).unwrap();
        assert_eq!(done[0].completed_at, Some(now));

        // Second call with 100 must not move the timestamp.
        let again = update_progress(&done, "u1", "c1", 100, later).unwrap();
        assert_eq!(again[0].completed_at, Some(now));
    }

    #[test]
    fn rollback_below_hundred_clears_completed_at() {
        let now = Utc::now();
        let parts = joined("u1", "c1", now);
        let done = update_progress(&parts, "u1", "c1", 100, now).unwrap();

        let rolled = update_progress(&done, "u1", "c1", 80, now).unwrap();
        assert_eq!(rolled[0].progress, 80);
        assert!(rolled[0].completed_at.is_none());

        // Completing again after a rollback stamps a fresh timestamp.
        let later = now + chrono::Duration::hours(2);
        let redone = update_progress(&rolled, "u1", "c1", 100, later).unwrap();
        assert_eq!(redone[0].completed_at, Some(later));
    }

    #[test]
    fn update_progress_on_missing_participation_errors() {
        let now = Utc::now();
        let err = update_progress(&[], "u1", "c1", 50, now).unwrap_err();
        assert_eq!(
            err,
            EngineError::ParticipationNotFound {
                user_id: "u1".to_string(),
                challenge_id: "c1".to_string(),
            }
        );
    }

    #[test]
    fn update_progress_leaves_other_pairs_untouched() {
        let now = Utc::now();
        let parts = joined("u1", "c1", now);
        let parts = join(&parts, "u2", "c1", now).unwrap();

        let next = update_progress(&parts, "u1", "c1", 40, now).unwrap();
        assert_eq!(get_progress(&next, "u1", "c1"), 40);
        assert_eq!(get_progress(&next, "u2", "c1"), 0);
    }

    #[test]
    fn lookups_return_defaults_on_absence() {
        assert!(!is_participating(&[], "u1", "c1"));
        assert_eq!(get_progress(&[], "u1", "c1"), 0);
    }

    #[test]
    fn invariant_completed_at_iff_progress_100() {
        let now = Utc::now();
        let parts = joined("u1", "c1", now);

        for value in [-5, 0, 50, 99, 100, 150] {
            let next = update_progress(&parts, "u1", "c1", value, now).unwrap();
            let p = &next[0];
            assert_eq!(p.completed_at.is_some(), p.progress == 100);
        }
    }

    #[test]
    fn aggregate_counts() {
        let now = Utc::now();
        let parts = joined("u1", "c1", now);
        let parts = join(&parts, "u2", "c1", now).unwrap();
        let parts = update_progress(&parts, "u1", "c1", 100, now).unwrap();

        assert_eq!(active_count(&parts), 1);
        assert_eq!(completed_count(&parts), 1);
    }

    #[test]
    fn total_points_treats_missing_as_zero() {
        assert_eq!(total_points([Some(10), None, Some(5)]), 15);
        assert_eq!(total_points([None, None]), 0);
        assert_eq!(total_points(Vec::new()), 0);
    }
}
