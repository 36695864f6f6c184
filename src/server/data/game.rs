use chrono::{NaiveDateTime, Utc};
use migration::OnConflict;
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};

/// A game row as fetched from upstream, with team foreign keys already
/// resolved to database row ids.
#[derive(Debug, Clone)]
pub struct NewGame {
    pub game_id: i64,
    pub season: i32,
    pub week: i32,
    pub home_team_id: i32,
    pub away_team_id: i32,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub status: String,
    pub start_time: NaiveDateTime,
    pub venue: Option<String>,
}

pub struct GameRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> GameRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn upsert_many(&self, games: Vec<NewGame>) -> Result<Vec<entity::game::Model>, DbErr> {
        if games.is_empty() {
            return Ok(Vec::new());
        }

        let games = games.into_iter().map(|game| entity::game::ActiveModel {
            game_id: ActiveValue::Set(game.game_id),
            season: ActiveValue::Set(game.season),
            week: ActiveValue::Set(game.week),
            home_team_id: ActiveValue::Set(game.home_team_id),
            away_team_id: ActiveValue::Set(game.away_team_id),
            home_score: ActiveValue::Set(game.home_score),
            away_score: ActiveValue::Set(game.away_score),
            status: ActiveValue::Set(game.status),
            start_time: ActiveValue::Set(game.start_time),
            venue: ActiveValue::Set(game.venue),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        });

        entity::prelude::Game::insert_many(games)
            .on_conflict(
                OnConflict::column(entity::game::Column::GameId)
                    .update_columns([
                        entity::game::Column::Season,
                        entity::game::Column::Week,
                        entity::game::Column::HomeTeamId,
                        entity::game::Column::AwayTeamId,
                        entity::game::Column::HomeScore,
                        entity::game::Column::AwayScore,
                        entity::game::Column::Status,
                        entity::game::Column::StartTime,
                        entity::game::Column::Venue,
                        entity::game::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(self.db)
            .await
    }

    pub async fn find_by_game_id(&self, game_id: i64) -> Result<Option<entity::game::Model>, DbErr> {
        entity::prelude::Game::find()
            .filter(entity::game::Column::GameId.eq(game_id))
            .one(self.db)
            .await
    }

    pub async fn list_by_season(
        &self,
        season: i32,
        week: Option<u8>,
    ) -> Result<Vec<entity::game::Model>, DbErr> {
        let mut query =
            entity::prelude::Game::find().filter(entity::game::Column::Season.eq(season));

        if let Some(week) = week {
            query = query.filter(entity::game::Column::Week.eq(week as i32));
        }

        query
            .order_by_asc(entity::game::Column::StartTime)
            .all(self.db)
            .await
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::Game::find().count(self.db).await
    }
}
