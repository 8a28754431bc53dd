//! Daily habit log entity (one row per user per calendar day).

use chrono::Utc;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "daily_log")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// The logging user
    pub user_id: String,

    /// The calendar day this log covers; unique per user
    pub log_date: Date,

    #[sea_orm(default_value = false)]
    pub ate_healthy: bool,

    #[sea_orm(default_value = false)]
    pub trained: bool,

    #[sea_orm(default_value = false)]
    pub drank_water: bool,

    /// Optional free-text note
    #[sea_orm(column_type = "Text", nullable)]
    pub note: Option<String>,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    /// This row as an engine log.
    #[must_use]
    pub fn to_engine(&self) -> slimfit_engine::DailyLog {
        slimfit_engine::DailyLog {
            date: self.log_date,
            ate_healthy: self.ate_healthy,
            trained: self.trained,
            drank_water: self.drank_water,
            note: self.note.clone(),
            updated_at: self.updated_at.with_timezone(&Utc),
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
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
