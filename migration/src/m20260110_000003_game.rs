use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260110_000001_team::Team;

static IDX_GAME_SEASON_WEEK: &str = "idx_game_season_week";
static FK_GAME_HOME_TEAM_ID: &str = "fk_game_home_team_id";
static FK_GAME_AWAY_TEAM_ID: &str = "fk_game_away_team_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Game::Table)
                    .if_not_exists()
                    .col(pk_auto(Game::Id))
                    .col(big_integer_uniq(Game::GameId))
                    .col(integer(Game::Season))
                    .col(integer(Game::Week))
                    .col(integer(Game::HomeTeamId))
                    .col(integer(Game::AwayTeamId))
                    .col(integer_null(Game::HomeScore))
                    .col(integer_null(Game::AwayScore))
                    .col(string(Game::Status))
                    .col(timestamp(Game::StartTime))
                    .col(string_null(Game::Venue))
                    .col(timestamp(Game::CreatedAt))
                    .col(timestamp(Game::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_GAME_SEASON_WEEK)
                    .table(Game::Table)
                    .col(Game::Season)
                    .col(Game::Week)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_GAME_HOME_TEAM_ID)
                    .from_tbl(Game::Table)
                    .from_col(Game::HomeTeamId)
                    .to_tbl(Team::Table)
                    .to_col(Team::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_GAME_AWAY_TEAM_ID)
                    .from_tbl(Game::Table)
                    .from_col(Game::AwayTeamId)
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
                    .name(FK_GAME_AWAY_TEAM_ID)
                    .table(Game::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_GAME_HOME_TEAM_ID)
                    .table(Game::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_GAME_SEASON_WEEK)
                    .table(Game::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Game::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Game {
    Table,
    Id,
    GameId,
    Season,
    Week,
    HomeTeamId,
    AwayTeamId,
    HomeScore,
    AwayScore,
    Status,
    StartTime,
    Venue,
    CreatedAt,
    UpdatedAt,
}
