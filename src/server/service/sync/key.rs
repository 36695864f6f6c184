//! Canonical identity of a fetchable unit of data.

use std::fmt;

/// Identifies one fetchable resource for deduplication and logging.
///
/// The enum fixes parameter arity and types per kind, so a malformed key is
/// unrepresentable. Equality is structural; the `Display` rendering exists
/// for logs and cache-adjacent observability only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResourceKey {
    Games { season: i32, week: u8 },
    SeasonGames { season: i32 },
    Teams,
    Team { team_id: i64 },
    Player { player_id: i64 },
    GameStats { game_id: i64 },
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Games { season, week } => write!(f, "games:{season}:{week}"),
            Self::SeasonGames { season } => write!(f, "games:{season}:all"),
            Self::Teams => write!(f, "teams:all"),
            Self::Team { team_id } => write!(f, "team:{team_id}"),
            Self::Player { player_id } => write!(f, "player:{player_id}"),
            Self::GameStats { game_id } => write!(f, "stats:{game_id}"),
        }
    }
}
