pub mod prelude;

pub mod game;
pub mod game_stat;
pub mod player;
pub mod team;
