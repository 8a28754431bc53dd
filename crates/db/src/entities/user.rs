//! User entity.

use chrono::Utc;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use slimfit_engine::FlagRecord;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(unique)]
    pub username: String,

    pub username_lower: String,

    /// Access token
    #[sea_orm(unique, nullable)]
    pub token: Option<String>,

    /// Display name
    #[sea_orm(nullable)]
    pub name: Option<String>,

    /// Avatar URL
    #[sea_orm(nullable)]
    pub avatar_url: Option<String>,

    /// Reward point balance (never negative)
    #[sea_orm(default_value = 0)]
    pub points: i32,

    /// Is this user an admin?
    #[sea_orm(default_value = false)]
    pub is_admin: bool,

    /// Permanent app-wide ban
    #[sea_orm(default_value = false)]
    pub is_banned: bool,

    /// Time-boxed app-wide ban (active while in the future)
    #[sea_orm(nullable)]
    pub banned_until: Option<DateTimeWithTimeZone>,

    /// Ban reason, informational only
    #[sea_orm(column_type = "Text", nullable)]
    pub ban_reason: Option<String>,

    /// Time-boxed feed restriction (active while in the future)
    #[sea_orm(nullable)]
    pub feed_banned_until: Option<DateTimeWithTimeZone>,

    /// Sticky mute
    #[sea_orm(default_value = false)]
    pub is_muted: bool,

    /// Time-boxed mute (active while in the future)
    #[sea_orm(nullable)]
    pub muted_until: Option<DateTimeWithTimeZone>,

    pub created_at: DateTimeWithTimeZone,

    /// Doubles as the optimistic-concurrency token for moderation writes
    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

impl Model {
    /// The user's moderation flags as an engine record.
    ///
    /// The flag record exists exactly as long as the user does; inactive
    /// flags are `false`/`None` columns, never missing rows.
    #[must_use]
    pub fn flag_record(&self) -> FlagRecord {
        FlagRecord {
            is_banned: self.is_banned,
            banned_until: self.banned_until.map(|t| t.with_timezone(&Utc)),
            ban_reason: self.ban_reason.clone(),
            feed_banned_until: self.feed_banned_until.map(|t| t.with_timezone(&Utc)),
            is_muted: self.is_muted,
            muted_until: self.muted_until.map(|t| t.with_timezone(&Utc)),
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::daily_log::Entity")]
    DailyLogs,

    #[sea_orm(has_many = "super::challenge_participant::Entity")]
    Participations,
}

impl Related<super::daily_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DailyLogs.def()
    }
}

impl Related<super::challenge_participant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Participations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
