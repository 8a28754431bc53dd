//! Moderation commands: pure transforms over a flag record.
//!
//! Each command returns the full next [`FlagRecord`] for the caller to
//! persist. Persistence must be atomic across all flag fields; a failed
//! write means no state change.

use chrono::{DateTime, Duration, Utc};

use crate::flags::FlagRecord;

/// Mute the user for `duration_hours` starting at `now`.
///
/// Only the time-boxed `muted_until` field is written; the sticky `is_muted`
/// flag is reserved for permanent mutes and stays untouched, so the mute
/// lapses naturally when the timer expires.
#[must_use]
pub fn mute_for(flags: &FlagRecord, duration_hours: i64, now: DateTime<Utc>) -> FlagRecord {
    FlagRecord {
        muted_until: Some(now + Duration::hours(duration_hours)),
        ..flags.clone()
    }
}

/// Restrict the user from the feed for `duration_hours` starting at `now`.
#[must_use]
pub fn ban_from_feed(flags: &FlagRecord, duration_hours: i64, now: DateTime<Utc>) -> FlagRecord {
    FlagRecord {
        feed_banned_until: Some(now + Duration::hours(duration_hours)),
        ..flags.clone()
    }
}

/// Ban the user app-wide for `duration_hours` starting at `now`.
#[must_use]
pub fn ban_from_app(
    flags: &FlagRecord,
    duration_hours: i64,
    reason: impl Into<String>,
    now: DateTime<Utc>,
) -> FlagRecord {
    FlagRecord {
        banned_until: Some(now + Duration::hours(duration_hours)),
        ban_reason: Some(reason.into()),
        ..flags.clone()
    }
}

/// Ban the user app-wide without expiry.
///
/// Any running ban timer is cleared: permanence overrides it, and a stale
/// `banned_until` would otherwise resurface as a time ban if the permanent
/// flag were ever lifted in isolation.
#[must_use]
pub fn ban_permanently(flags: &FlagRecord, reason: impl Into<String>) -> FlagRecord {
    FlagRecord {
        is_banned: true,
        banned_until: None,
        ban_reason: Some(reason.into()),
        ..flags.clone()
    }
}

/// Clear every restriction in one step.
///
/// All five temporal/boolean fields go inactive together so a partial unban
/// can never leak to storage. Idempotent.
#[must_use]
pub fn unban_all(_flags: &FlagRecord) -> FlagRecord {
    FlagRecord::inactive()
}

/// Deduct `amount` points, flooring at zero.
#[must_use]
pub fn penalize_points(current_points: i32, amount: i32) -> i32 {
    (current_points - amount).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::{AccessStatus, evaluate, is_muted};

    #[test]
    fn mute_for_sets_only_the_timer() {
        let now = Utc::now();
        let flags = mute_for(&FlagRecord::default(), 72, now);

        assert_eq!(flags.muted_until, Some(now + Duration::hours(72)));
        assert!(!flags.is_muted);
        assert_eq!(evaluate(&flags, now), AccessStatus::Muted);
    }

    #[test]
    fn mute_expires_naturally() {
        // A 72-hour mute evaluated at +73h has lapsed.
        let now = Utc::now();
        let flags = mute_for(&FlagRecord::default(), 72, now);
        let later = now + Duration::hours(73);

        assert_eq!(evaluate(&flags, later), AccessStatus::Active);
        assert!(!is_muted(&flags, later));
    }

    #[test]
    fn feed_ban_leaves_other_flags_alone() {
        let now = Utc::now();
        let muted = mute_for(&FlagRecord::default(), 24, now);
        let flags = ban_from_feed(&muted, 48, now);

        assert_eq!(flags.feed_banned_until, Some(now + Duration::hours(48)));
        assert_eq!(flags.muted_until, muted.muted_until);
        // Co-occurring flags: summary shows the ban, badge still shows the mute.
        assert_eq!(evaluate(&flags, now), AccessStatus::FeedBanned);
        assert!(is_muted(&flags, now));
    }

    #[test]
    fn app_ban_records_reason() {
        let now = Utc::now();
        let flags = ban_from_app(&FlagRecord::default(), 24, "harassment", now);

        assert_eq!(flags.banned_until, Some(now + Duration::hours(24)));
        assert_eq!(flags.ban_reason.as_deref(), Some("harassment"));
        assert_eq!(evaluate(&flags, now), AccessStatus::TimeBanned);
    }

    #[test]
    fn permanent_ban_clears_the_timer() {
        let now = Utc::now();
        let timed = ban_from_app(&FlagRecord::default(), 24, "first strike", now);
        let flags = ban_permanently(&timed, "repeat offender");

        assert!(flags.is_banned);
        assert!(flags.banned_until.is_none());
        assert_eq!(flags.ban_reason.as_deref(), Some("repeat offender"));
        assert_eq!(evaluate(&flags, now), AccessStatus::PermanentlyBanned);
    }

    #[test]
    fn unban_all_clears_every_field() {
        let now = Utc::now();
        let mut flags = ban_permanently(&FlagRecord::default(), "spam");
        flags = mute_for(&flags, 24, now);
        flags = ban_from_feed(&flags, 24, now);
        flags.is_muted = true;

        let cleared = unban_all(&flags);
        assert_eq!(cleared, FlagRecord::inactive());
        assert_eq!(evaluate(&cleared, now), AccessStatus::Active);
    }

    #[test]
    fn unban_all_is_idempotent() {
        let now = Utc::now();
        let flags = ban_from_app(&FlagRecord::default(), 24, "spam", now);

        let once = unban_all(&flags);
        let twice = unban_all(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn penalize_points_floors_at_zero() {
        assert_eq!(penalize_points(30, 50), 0);
        assert_eq!(penalize_points(50, 30), 20);
        assert_eq!(penalize_points(0, 10), 0);
        assert_eq!(penalize_points(10, 10), 0);
    }
}
