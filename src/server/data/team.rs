use chrono::Utc;
use migration::OnConflict;
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

/// A team row as fetched from upstream, before persistence.
#[derive(Debug, Clone)]
pub struct NewTeam {
    pub team_id: i64,
    pub name: String,
    pub abbreviation: String,
    pub location: String,
    pub conference: Option<String>,
    pub division: Option<String>,
}

pub struct TeamRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> TeamRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn upsert_many(&self, teams: Vec<NewTeam>) -> Result<Vec<entity::team::Model>, DbErr> {
        if teams.is_empty() {
            return Ok(Vec::new());
        }

        let teams = teams.into_iter().map(|team| entity::team::ActiveModel {
            team_id: ActiveValue::Set(team.team_id),
            name: ActiveValue::Set(team.name),
            abbreviation: ActiveValue::Set(team.abbreviation),
            location: ActiveValue::Set(team.location),
            conference: ActiveValue::Set(team.conference),
            division: ActiveValue::Set(team.division),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        });

        entity::prelude::Team::insert_many(teams)
            .on_conflict(
                OnConflict::column(entity::team::Column::TeamId)
                    .update_columns([
                        entity::team::Column::Name,
                        entity::team::Column::Abbreviation,
                        entity::team::Column::Location,
                        entity::team::Column::Conference,
                        entity::team::Column::Division,
                        entity::team::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(self.db)
            .await
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::Team::find().count(self.db).await
    }

    pub async fn find_by_team_id(&self, team_id: i64) -> Result<Option<entity::team::Model>, DbErr> {
        entity::prelude::Team::find()
            .filter(entity::team::Column::TeamId.eq(team_id))
            .one(self.db)
            .await
    }

    pub async fn list_all(&self) -> Result<Vec<entity::team::Model>, DbErr> {
        entity::prelude::Team::find()
            .order_by_asc(entity::team::Column::Name)
            .all(self.db)
            .await
    }

    /// Maps upstream team ids to database row ids for foreign key resolution.
    pub async fn get_db_ids_by_team_ids(&self, team_ids: &[i64]) -> Result<Vec<(i64, i32)>, DbErr> {
        entity::prelude::Team::find()
            .select_only()
            .column(entity::team::Column::TeamId)
            .column(entity::team::Column::Id)
            .filter(entity::team::Column::TeamId.is_in(team_ids.iter().copied()))
            .into_tuple::<(i64, i32)>()
            .all(self.db)
            .await
    }
}
