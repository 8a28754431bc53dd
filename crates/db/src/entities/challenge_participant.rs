//! Challenge participation entity (one row per user per challenge).

use chrono::Utc;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Participation model.
///
/// `completed_at` is non-null iff `progress == 100`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "challenge_participant")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// The participating user
    pub user_id: String,

    /// The challenge
    pub challenge_id: String,

    /// Completion percentage, 0–100
    #[sea_orm(default_value = 0)]
    pub progress: i32,

    pub joined_at: DateTimeWithTimeZone,

    /// Set exactly once, when progress first reaches 100
    #[sea_orm(nullable)]
    pub completed_at: Option<DateTimeWithTimeZone>,
}

impl Model {
    /// This row as an engine participation.
    #[must_use]
    pub fn to_engine(&self) -> slimfit_engine::Participation {
        slimfit_engine::Participation {
            user_id: self.user_id.clone(),
            challenge_id: self.challenge_id.clone(),
            progress: self.progress,
            joined_at: self.joined_at.with_timezone(&Utc),
            completed_at: self.completed_at.map(|t| t.with_timezone(&Utc)),
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,

    #[sea_orm(
        belongs_to = "super::challenge::Entity",
        from = "Column::ChallengeId",
        to = "super::challenge::Column::Id",
        on_delete = "Cascade"
    )]
    Challenge,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::challenge::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Challenge.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
