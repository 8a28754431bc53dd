//! Daily habit check-ins and consistency aggregation.

use std::collections::HashMap;

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One of the three daily habit checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CheckField {
    /// Ate healthy today.
    AteHealthy,
    /// Trained today.
    Trained,
    /// Drank enough water today.
    DrankWater,
}

/// A user's habit log for one calendar day.
///
/// At most one log exists per (user, day); absence of a log for a date means
/// zero checks for that date, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyLog {
    /// The calendar day this log covers.
    pub date: NaiveDate,
    /// Ate healthy.
    pub ate_healthy: bool,
    /// Trained.
    pub trained: bool,
    /// Drank enough water.
    pub drank_water: bool,
    /// Optional free-text note.
    pub note: Option<String>,
    /// Last modification instant; used to resolve duplicate rows.
    pub updated_at: DateTime<Utc>,
}

impl DailyLog {
    /// A zero-initialized log for `date`.
    #[must_use]
    pub const fn empty(date: NaiveDate, now: DateTime<Utc>) -> Self {
        Self {
            date,
            ate_healthy: false,
            trained: false,
            drank_water: false,
            note: None,
            updated_at: now,
        }
    }

    /// How many of the three checks are done (0–3).
    #[must_use]
    pub const fn completed(&self) -> u8 {
        self.ate_healthy as u8 + self.trained as u8 + self.drank_water as u8
    }

    /// Whether all three checks are done.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.ate_healthy && self.trained && self.drank_water
    }
}

/// One day in a calendar view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEntry {
    /// The calendar day.
    pub date: NaiveDate,
    /// Count of completed checks for that day (0–3).
    pub completed: u8,
}

/// Flip exactly one check on today's log.
///
/// When no log exists for `today` yet, a zero-initialized one is created
/// first and the field flipped on (so the first toggle always checks). All
/// other fields keep their previously recorded values.
#[must_use]
pub fn toggle_check(
    existing: Option<&DailyLog>,
    field: CheckField,
    today: NaiveDate,
    now: DateTime<Utc>,
) -> DailyLog {
    let mut log = existing
        .filter(|log| log.date == today)
        .cloned()
        .unwrap_or_else(|| DailyLog::empty(today, now));

    match field {
        CheckField::AteHealthy => log.ate_healthy = !log.ate_healthy,
        CheckField::Trained => log.trained = !log.trained,
        CheckField::DrankWater => log.drank_water = !log.drank_water,
    }
    log.updated_at = now;
    log
}

/// Build a calendar of exactly `window_days` entries ending at `today`.
///
/// Entries are ordered oldest to newest; days without a log yield
/// `completed = 0`. Should storage ever hold more than one log for a date,
/// the most-recently-updated one wins (see [`duplicate_count`] for the
/// data-quality probe).
#[must_use]
pub fn build_calendar(
    logs: &[DailyLog],
    window_days: u32,
    today: NaiveDate,
) -> Vec<CalendarEntry> {
    let by_date = latest_per_date(logs);

    (0..window_days)
        .rev()
        .filter_map(|back| today.checked_sub_days(Days::new(u64::from(back))))
        .map(|date| CalendarEntry {
            date,
            completed: by_date.get(&date).map_or(0, |log| log.completed()),
        })
        .collect()
}

/// Percentage of days in the fixed window where all three checks are done.
///
/// The denominator is always `window_days`, even when less history exists;
/// new accounts show low consistency until they accumulate a full window.
/// Result is rounded to the nearest integer, 0–100.
#[must_use]
pub fn consistency_percentage(logs: &[DailyLog], window_days: u32, today: NaiveDate) -> u8 {
    if window_days == 0 {
        return 0;
    }

    let by_date = latest_per_date(logs);
    let full_days = (0..window_days)
        .filter_map(|back| today.checked_sub_days(Days::new(u64::from(back))))
        .filter(|date| by_date.get(date).is_some_and(|log| log.is_full()))
        .count();

    ((full_days as f64 / f64::from(window_days)) * 100.0).round() as u8
}

/// How many logs share a date with an earlier log in `logs`.
///
/// Storage enforces one log per (user, day); a non-zero count here is a
/// data-quality signal callers should surface rather than swallow.
#[must_use]
pub fn duplicate_count(logs: &[DailyLog]) -> usize {
    let distinct = logs
        .iter()
        .map(|log| log.date)
        .collect::<std::collections::HashSet<_>>()
        .len();
    logs.len() - distinct
}

/// Index logs by date, keeping the most-recently-updated log per date.
fn latest_per_date(logs: &[DailyLog]) -> HashMap<NaiveDate, &DailyLog> {
    let mut by_date: HashMap<NaiveDate, &DailyLog> = HashMap::with_capacity(logs.len());
    for log in logs {
        by_date
            .entry(log.date)
            .and_modify(|kept| {
                if log.updated_at >= kept.updated_at {
                    *kept = log;
                }
            })
            .or_insert(log);
    }
    by_date
}
