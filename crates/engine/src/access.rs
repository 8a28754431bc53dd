//! Access evaluation: derives a single effective status from a flag record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::flags::FlagRecord;

/// A user's effective access state, derived from their flags at an instant.
///
/// Ordered least to most severe; comparisons follow that ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccessStatus {
    /// No active restriction.
    Active,
    /// Muted (sticky or time-boxed).
    Muted,
    /// Restricted from the feed.
    FeedBanned,
    /// Banned app-wide until a point in time.
    TimeBanned,
    /// Banned app-wide without expiry.
    PermanentlyBanned,
}

impl AccessStatus {
    /// Stable label used in API payloads and the admin table.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Muted => "muted",
            Self::FeedBanned => "feedBanned",
            Self::TimeBanned => "timeBanned",
            Self::PermanentlyBanned => "permanentlyBanned",
        }
    }
}

/// Derive the single highest-severity status for `flags` at `now`.
///
/// Precedence (most severe first): permanent ban, active time ban, active
/// feed ban, mute (sticky or active time-boxed), active. Expired timers never
/// count; an expired `banned_until` falls through to the lower tiers.
///
/// Admins need one unambiguous line per user, so overlapping conditions
/// collapse to the most severe one here. UI badges that show simultaneous
/// conditions use the independent predicates below, which agree with this
/// summary by construction.
#[must_use]
pub fn evaluate(flags: &FlagRecord, now: DateTime<Utc>) -> AccessStatus {
    if flags.is_banned {
        AccessStatus::PermanentlyBanned
    } else if FlagRecord::expiry_active(flags.banned_until, now) {
        AccessStatus::TimeBanned
    } else if FlagRecord::expiry_active(flags.feed_banned_until, now) {
        AccessStatus::FeedBanned
    } else if is_muted(flags, now) {
        AccessStatus::Muted
    } else {
        AccessStatus::Active
    }
}

/// Whether an app-wide ban (permanent or time-boxed) is active at `now`.
#[must_use]
pub fn is_banned(flags: &FlagRecord, now: DateTime<Utc>) -> bool {
    flags.is_banned || FlagRecord::expiry_active(flags.banned_until, now)
}

/// Whether the feed restriction is active at `now`.
#[must_use]
pub fn is_feed_banned(flags: &FlagRecord, now: DateTime<Utc>) -> bool {
    FlagRecord::expiry_active(flags.feed_banned_until, now)
}

/// Whether the user is muted (sticky flag or active timer) at `now`.
#[must_use]
pub fn is_muted(flags: &FlagRecord, now: DateTime<Utc>) -> bool {
    flags.is_muted || FlagRecord::expiry_active(flags.muted_until, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn at(now: DateTime<Utc>, hours: i64) -> Option<DateTime<Utc>> {
        Some(now + Duration::hours(hours))
    }

    #[test]
    fn clean_record_is_active() {
        let now = Utc::now();
        assert_eq!(evaluate(&FlagRecord::default(), now), AccessStatus::Active);
    }

    #[test]
    fn permanent_ban_wins_over_everything() {
        let now = Utc::now();
        let flags = FlagRecord {
            is_banned: true,
            banned_until: at(now, 1),
            feed_banned_until: at(now, 1),
            is_muted: true,
            muted_until: at(now, 1),
            ban_reason: Some("spam".to_string()),
        };
        assert_eq!(evaluate(&flags, now), AccessStatus::PermanentlyBanned);
    }

    #[test]
    fn permanent_ban_beats_active_mute() {
        let now = Utc::now();
        let flags = FlagRecord {
            is_banned: true,
            muted_until: at(now, 5),
            ..FlagRecord::default()
        };
        assert_eq!(evaluate(&flags, now), AccessStatus::PermanentlyBanned);
    }

    #[test]
    fn time_ban_beats_feed_ban_and_mute() {
        let now = Utc::now();
        let flags = FlagRecord {
            banned_until: at(now, 2),
            feed_banned_until: at(now, 2),
            muted_until: at(now, 2),
            ..FlagRecord::default()
        };
        assert_eq!(evaluate(&flags, now), AccessStatus::TimeBanned);
    }

    #[test]
    fn feed_ban_beats_mute() {
        let now = Utc::now();
        let flags = FlagRecord {
            feed_banned_until: at(now, 2),
            is_muted: true,
            ..FlagRecord::default()
        };
        assert_eq!(evaluate(&flags, now), AccessStatus::FeedBanned);
        // The mute badge still shows independently.
        assert!(is_muted(&flags, now));
    }

    #[test]
    fn expired_app_ban_falls_through_to_active() {
        // banned_until one hour in the past, nothing else set.
        let now = Utc::now();
        let flags = FlagRecord {
            is_banned: false,
            banned_until: at(now, -1),
            ban_reason: None,
            feed_banned_until: None,
            is_muted: false,
            muted_until: None,
        };
        assert_eq!(evaluate(&flags, now), AccessStatus::Active);
        assert!(!is_banned(&flags, now));
    }

    #[test]
    fn expired_app_ban_falls_through_to_lower_tier() {
        let now = Utc::now();
        let flags = FlagRecord {
            banned_until: at(now, -1),
            muted_until: at(now, 1),
            ..FlagRecord::default()
        };
        assert_eq!(evaluate(&flags, now), AccessStatus::Muted);
    }

    #[test]
    fn sticky_mute_without_timer_is_muted() {
        let now = Utc::now();
        let flags = FlagRecord {
            is_muted: true,
            ..FlagRecord::default()
        };
        assert_eq!(evaluate(&flags, now), AccessStatus::Muted);
    }

    #[test]
    fn predicates_agree_with_summary() {
        let now = Utc::now();
        let records = [
            FlagRecord::default(),
            FlagRecord {
                is_banned: true,
                ..FlagRecord::default()
            },
            FlagRecord {
                banned_until: at(now, 3),
                ..FlagRecord::default()
            },
            FlagRecord {
                feed_banned_until: at(now, 3),
                muted_until: at(now, 3),
                ..FlagRecord::default()
            },
            FlagRecord {
                muted_until: at(now, -3),
                ..FlagRecord::default()
            },
        ];

        for flags in &records {
            let status = evaluate(flags, now);
            match status {
                AccessStatus::PermanentlyBanned | AccessStatus::TimeBanned => {
                    assert!(is_banned(flags, now));
                }
                AccessStatus::FeedBanned => {
                    assert!(is_feed_banned(flags, now));
                    assert!(!is_banned(flags, now));
                }
                AccessStatus::Muted => {
                    assert!(is_muted(flags, now));
                    assert!(!is_banned(flags, now));
                    assert!(!is_feed_banned(flags, now));
                }
                AccessStatus::Active => {
                    assert!(!is_banned(flags, now));
                    assert!(!is_feed_banned(flags, now));
                    assert!(!is_muted(flags, now));
                }
            }
        }
    }

    #[test]
    fn severity_ordering_matches_precedence() {
        assert!(AccessStatus::PermanentlyBanned > AccessStatus::TimeBanned);
        assert!(AccessStatus::TimeBanned > AccessStatus::FeedBanned);
        assert!(AccessStatus::FeedBanned > AccessStatus::Muted);
        assert!(AccessStatus::Muted > AccessStatus::Active);
    }
}
