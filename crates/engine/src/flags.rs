//! Per-user moderation flag record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Moderation flags for a single user.
///
/// The flags are independent and may co-occur (a user can be muted AND
/// feed-banned at the same time). The effective status is always derived
/// from this record at read time, never stored alongside it, so a "status"
/// field can never drift from its source flags.
///
/// A flag record exists for every user; inactive flags are simply `false` /
/// `None`. Records are only rewritten whole by the moderation commands in
/// [`crate::moderation`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FlagRecord {
    /// Permanent ban, independent of any expiry timer.
    pub is_banned: bool,

    /// App-wide ban active while this instant is in the future.
    pub banned_until: Option<DateTime<Utc>>,

    /// Free text shown to admins. Informational only.
    pub ban_reason: Option<String>,

    /// Feed-specific restriction active while this instant is in the future.
    pub feed_banned_until: Option<DateTime<Utc>>,

    /// Sticky mute, independent of any expiry timer.
    pub is_muted: bool,

    /// Time-boxed mute active while this instant is in the future.
    pub muted_until: Option<DateTime<Utc>>,
}

impl FlagRecord {
    /// A record with every flag inactive.
    #[must_use]
    pub fn inactive() -> Self {
        Self::default()
    }

    /// Whether an expiry timestamp is still in the future.
    pub(crate) fn expiry_active(expiry: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
        expiry.is_some_and(|until| until > now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn default_record_is_fully_inactive() {
        let flags = FlagRecord::default();
        assert!(!flags.is_banned);
        assert!(flags.banned_until.is_none());
        assert!(flags.ban_reason.is_none());
        assert!(flags.feed_banned_until.is_none());
        assert!(!flags.is_muted);
        assert!(flags.muted_until.is_none());
        assert_eq!(flags, FlagRecord::inactive());
    }

    #[test]
    fn expiry_in_future_is_active() {
        let now = Utc::now();
        assert!(FlagRecord::expiry_active(Some(now + Duration::hours(1)), now));
    }

    #[test]
    fn expiry_in_past_or_absent_is_inactive() {
        let now = Utc::now();
        assert!(!FlagRecord::expiry_active(Some(now - Duration::hours(1)), now));
        assert!(!FlagRecord::expiry_active(None, now));
        // Boundary: an expiry exactly at `now` has already lapsed.
        assert!(!FlagRecord::expiry_active(Some(now), now));
    }
}
