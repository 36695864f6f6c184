use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260110_000001_team::Team;

static IDX_PLAYER_TEAM_ID: &str = "idx_player_team_id";
static FK_PLAYER_TEAM_ID: &str = "fk_player_team_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Player::Table)
                    .if_not_exists()
                    .col(pk_auto(Player::Id))
                    .col(big_integer_uniq(Player::PlayerId))
                    .col(string(Player::Name))
                    .col(string_null(Player::Position))
                    .col(integer_null(Player::JerseyNumber))
                    .col(string(Player::Status))
                    .col(integer_null(Player::TeamId))
                    .col(timestamp(Player::CreatedAt))
                    .col(timestamp(Player::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_PLAYER_TEAM_ID)
                    .table(Player::Table)
                    .col(Player::TeamId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_PLAYER_TEAM_ID)
                    .from_tbl(Player::Table)
                    .from_col(Player::TeamId)
                    .to_tbl(Team::Table)
                    .to_col(Team::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_PLAYER_TEAM_ID)
                    .table(Player::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_PLAYER_TEAM_ID)
                    .table(Player::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Player::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Player {
    Table,
    Id,
    PlayerId,
    Name,
    Position,
    JerseyNumber,
    Status,
    TeamId,
    CreatedAt,
    UpdatedAt,
}
