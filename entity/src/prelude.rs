pub use super::game::Entity as Game;
pub use super::game_stat::Entity as GameStat;
pub use super::player::Entity as Player;
pub use super::team::Entity as Team;
