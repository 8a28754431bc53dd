//! Create challenge participant table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ChallengeParticipant::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ChallengeParticipant::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ChallengeParticipant::UserId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ChallengeParticipant::ChallengeId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ChallengeParticipant::Progress)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ChallengeParticipant::JoinedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(ChallengeParticipant::CompletedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_challenge_participant_user")
                            .from(ChallengeParticipant::Table, ChallengeParticipant::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_challenge_participant_challenge")
                            .from(ChallengeParticipant::Table, ChallengeParticipant::ChallengeId)
                            .to(Challenge::Table, Challenge::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (user_id, challenge_id) - one participation per pair
        manager
            .create_index(
                Index::create()
                    .name("idx_challenge_participant_user_challenge")
                    .table(ChallengeParticipant::Table)
                    .col(ChallengeParticipant::UserId)
                    .col(ChallengeParticipant::ChallengeId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: challenge_id (for counting participants)
        manager
            .create_index(
                Index::create()
                    .name("idx_challenge_participant_challenge_id")
                    .table(ChallengeParticipant::Table)
                    .col(ChallengeParticipant::ChallengeId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ChallengeParticipant::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ChallengeParticipant {
    Table,
    Id,
    UserId,
    ChallengeId,
    Progress,
    JoinedAt,
    CompletedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}

#[derive(Iden)]
enum Challenge {
    Table,
    Id,
}
