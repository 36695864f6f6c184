use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "game")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// External (upstream) game identifier.
    #[sea_orm(unique)]
    pub game_id: i64,
    pub season: i32,
    pub week: i32,
    pub home_team_id: i32,
    pub away_team_id: i32,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub status: String,
    pub start_time: DateTime,
    pub venue: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::team::Entity",
        from = "Column::HomeTeamId",
        to = "super::team::Column::Id"
    )]
    HomeTeam,
    #[sea_orm(
        belongs_to = "super::team::Entity",
        from = "Column::AwayTeamId",
        to = "super::team::Column::Id"
    )]
    AwayTeam,
    #[sea_orm(has_many = "super::game_stat::Entity")]
    GameStat,
}

impl Related<super::game_stat::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GameStat.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
