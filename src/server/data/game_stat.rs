use chrono::Utc;
use migration::OnConflict;
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
};

/// One player's stat line for one game, keyed by database row ids.
#[derive(Debug, Clone)]
pub struct NewGameStat {
    pub game_id: i32,
    pub player_id: i32,
    pub passing_yards: i32,
    pub rushing_yards: i32,
    pub receiving_yards: i32,
    pub touchdowns: i32,
}

pub struct GameStatRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> GameStatRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn upsert_many(
        &self,
        stats: Vec<NewGameStat>,
    ) -> Result<Vec<entity::game_stat::Model>, DbErr> {
        if stats.is_empty() {
            return Ok(Vec::new());
        }

        let stats = stats.into_iter().map(|stat| entity::game_stat::ActiveModel {
            game_id: ActiveValue::Set(stat.game_id),
            player_id: ActiveValue::Set(stat.player_id),
            passing_yards: ActiveValue::Set(stat.passing_yards),
            rushing_yards: ActiveValue::Set(stat.rushing_yards),
            receiving_yards: ActiveValue::Set(stat.receiving_yards),
            touchdowns: ActiveValue::Set(stat.touchdowns),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        });

        entity::prelude::GameStat::insert_many(stats)
            .on_conflict(
                OnConflict::columns([
                    entity::game_stat::Column::GameId,
                    entity::game_stat::Column::PlayerId,
                ])
                .update_columns([
                    entity::game_stat::Column::PassingYards,
                    entity::game_stat::Column::RushingYards,
                    entity::game_stat::Column::ReceivingYards,
                    entity::game_stat::Column::Touchdowns,
                    entity::game_stat::Column::UpdatedAt,
                ])
                .to_owned(),
            )
            .exec_with_returning(self.db)
            .await
    }

    pub async fn list_by_game(
        &self,
        game_db_id: i32,
    ) -> Result<Vec<entity::game_stat::Model>, DbErr> {
        entity::prelude::GameStat::find()
            .filter(entity::game_stat::Column::GameId.eq(game_db_id))
            .all(self.db)
            .await
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::GameStat::find().count(self.db).await
    }
}
