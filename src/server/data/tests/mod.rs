//! Repository tests over in-memory SQLite.
//!
//! Every repository is generic over the connection, so these tests exercise
//! the same code paths production runs against Postgres, with the schema
//! created from the entities.

use sea_orm::{DatabaseConnection, DbErr};

use crate::server::{
    data::{
        game::GameRepository, game_stat::GameStatRepository, player::PlayerRepository,
        team::TeamRepository,
    },
    util::test::{mock, setup::test_db},
};


/// Two team rows for foreign key seeding, ordered by external id.
async fn seed_two_teams(
    db: &DatabaseConnection,
) -> Result<(entity::team::Model, entity::team::Model), DbErr> {
    let mut teams = TeamRepository::new(db)
        .upsert_many(vec![mock::new_team(1), mock::new_team(2)])
        .await?;
    teams.sort_by_key(|team| team.team_id);

    let second = teams.pop().expect("expected two teams");
    let first = teams.pop().expect("expected two teams");
    Ok((first, second))
}
