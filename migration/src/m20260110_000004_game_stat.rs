use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20260110_000002_player::Player, m20260110_000003_game::Game};

static IDX_GAME_STAT_GAME_PLAYER: &str = "idx_game_stat_game_player";
static FK_GAME_STAT_GAME_ID: &str = "fk_game_stat_game_id";
static FK_GAME_STAT_PLAYER_ID: &str = "fk_game_stat_player_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GameStat::Table)
                    .if_not_exists()
                    .col(pk_auto(GameStat::Id))
                    .col(integer(GameStat::GameId))
                    .col(integer(GameStat::PlayerId))
                    .col(integer(GameStat::PassingYards))
                    .col(integer(GameStat::RushingYards))
                    .col(integer(GameStat::ReceivingYards))
                    .col(integer(GameStat::Touchdowns))
                    .col(timestamp(GameStat::CreatedAt))
                    .col(timestamp(GameStat::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_GAME_STAT_GAME_PLAYER)
                    .table(GameStat::Table)
                    .col(GameStat::GameId)
                    .col(GameStat::PlayerId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_GAME_STAT_GAME_ID)
                    .from_tbl(GameStat::Table)
                    .from_col(GameStat::GameId)
                    .to_tbl(Game::Table)
                    .to_col(Game::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_GAME_STAT_PLAYER_ID)
                    .from_tbl(GameStat::Table)
                    .from_col(GameStat::PlayerId)
                    .to_tbl(Player::Table)
                    .to_col(Player::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_GAME_STAT_PLAYER_ID)
                    .table(GameStat::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_GAME_STAT_GAME_ID)
                    .table(GameStat::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_GAME_STAT_GAME_PLAYER)
                    .table(GameStat::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(GameStat::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum GameStat {
    Table,
    Id,
    GameId,
    PlayerId,
    PassingYards,
    RushingYards,
    ReceivingYards,
    Touchdowns,
    CreatedAt,
    UpdatedAt,
}
