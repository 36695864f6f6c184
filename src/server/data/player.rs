use chrono::Utc;
use migration::OnConflict;
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QuerySelect,
};

/// A player row as fetched from upstream, with the team foreign key already
/// resolved to a database row id.
#[derive(Debug, Clone)]
pub struct NewPlayer {
    pub player_id: i64,
    pub name: String,
    pub position: Option<String>,
    pub jersey_number: Option<i32>,
    pub status: String,
    pub team_id: Option<i32>,
}

pub struct PlayerRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PlayerRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn upsert_many(
        &self,
        players: Vec<NewPlayer>,
    ) -> Result<Vec<entity::player::Model>, DbErr> {
        if players.is_empty() {
            return Ok(Vec::new());
        }

        let players = players.into_iter().map(|player| entity::player::ActiveModel {
            player_id: ActiveValue::Set(player.player_id),
            name: ActiveValue::Set(player.name),
            position: ActiveValue::Set(player.position),
            jersey_number: ActiveValue::Set(player.jersey_number),
            status: ActiveValue::Set(player.status),
            team_id: ActiveValue::Set(player.team_id),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        });

        entity::prelude::Player::insert_many(players)
            .on_conflict(
                OnConflict::column(entity::player::Column::PlayerId)
                    .update_columns([
                        entity::player::Column::Name,
                        entity::player::Column::Position,
                        entity::player::Column::JerseyNumber,
                        entity::player::Column::Status,
                        entity::player::Column::TeamId,
                        entity::player::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(self.db)
            .await
    }

    pub async fn find_by_player_id(
        &self,
        player_id: i64,
    ) -> Result<Option<entity::player::Model>, DbErr> {
        entity::prelude::Player::find()
            .filter(entity::player::Column::PlayerId.eq(player_id))
            .one(self.db)
            .await
    }

    /// Maps upstream player ids to database row ids for foreign key resolution.
    pub async fn get_db_ids_by_player_ids(
        &self,
        player_ids: &[i64],
    ) -> Result<Vec<(i64, i32)>, DbErr> {
        entity::prelude::Player::find()
            .select_only()
            .column(entity::player::Column::PlayerId)
            .column(entity::player::Column::Id)
            .filter(entity::player::Column::PlayerId.is_in(player_ids.iter().copied()))
            .into_tuple::<(i64, i32)>()
            .all(self.db)
            .await
    }
}
