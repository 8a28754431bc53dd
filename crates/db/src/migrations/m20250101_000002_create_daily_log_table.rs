//! Create daily log table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DailyLog::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DailyLog::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DailyLog::UserId).string_len(32).not_null())
                    .col(ColumnDef::new(DailyLog::LogDate).date().not_null())
                    .col(
                        ColumnDef::new(DailyLog::AteHealthy)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(DailyLog::Trained)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(DailyLog::DrankWater)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(DailyLog::Note).text())
                    .col(
                        ColumnDef::new(DailyLog::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(DailyLog::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_daily_log_user")
                            .from(DailyLog::Table, DailyLog::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (user_id, log_date) - one log per user per day
        manager
            .create_index(
                Index::create()
                    .name("idx_daily_log_user_date")
                    .table(DailyLog::Table)
                    .col(DailyLog::UserId)
                    .col(DailyLog::LogDate)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DailyLog::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum DailyLog {
    Table,
    Id,
    UserId,
    LogDate,
    AteHealthy,
    Trained,
    DrankWater,
    Note,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
