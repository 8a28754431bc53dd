//! Access state & consistency engine for slimfit-rs.
//!
//! This crate isolates the derived-state rules of the application as pure,
//! synchronous functions over in-memory snapshots:
//!
//! - **Flags**: per-user moderation flags with optional expiry via [`FlagRecord`]
//! - **Access evaluation**: single effective status via [`evaluate`], plus the
//!   independent predicates [`is_banned`], [`is_feed_banned`] and [`is_muted`]
//! - **Moderation commands**: pure flag transforms via [`mute_for`],
//!   [`ban_from_feed`], [`ban_from_app`], [`ban_permanently`] and [`unban_all`]
//! - **Daily consistency**: habit check-in aggregation via [`toggle_check`],
//!   [`build_calendar`] and [`consistency_percentage`]
//! - **Challenge progress**: participation state via [`join`],
//!   [`update_progress`] and the aggregate reductions
//!
//! Nothing here performs I/O or reads the clock; every `now`/`today` value is
//! an injected parameter, so all behavior is deterministic and testable
//! without mocking global time. Persistence of the returned snapshots is the
//! caller's responsibility and must be atomic: a failed write means no state
//! change.
//!
//! # Example
//!
//! ```
//! use chrono::{Duration, Utc};
//! use slimfit_engine::{AccessStatus, FlagRecord, evaluate, mute_for};
//!
//! let now = Utc::now();
//! let flags = mute_for(&FlagRecord::default(), 72, now);
//! assert_eq!(evaluate(&flags, now), AccessStatus::Muted);
//! assert_eq!(evaluate(&flags, now + Duration::hours(73)), AccessStatus::Active);
//! ```

mod access;
mod consistency;
mod error;
mod flags;
mod moderation;
mod progress;

pub use access::{AccessStatus, evaluate, is_banned, is_feed_banned, is_muted};
pub use consistency::{
    CalendarEntry, CheckField, DailyLog, build_calendar, consistency_percentage, duplicate_count,
    toggle_check,
};
pub use error::EngineError;
pub use flags::FlagRecord;
pub use moderation::{
    ban_from_app, ban_from_feed, ban_permanently, mute_for, penalize_points, unban_all,
};
pub use progress::{
    Participation, active_count, completed_count, get_progress, is_participating, join,
    total_points, update_progress,
};
