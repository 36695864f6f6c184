pub use sea_orm_migration::prelude::*;

mod m20260110_000001_team;
mod m20260110_000002_player;
mod m20260110_000003_game;
mod m20260110_000004_game_stat;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260110_000001_team::Migration),
            Box::new(m20260110_000002_player::Migration),
            Box::new(m20260110_000003_game::Migration),
            Box::new(m20260110_000004_game_stat::Migration),
        ]
    }
}
