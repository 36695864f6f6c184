//! Cache key builders, TTLs, and invalidation patterns.
//!
//! Keys are namespaced per resource family so invalidation after a sync can
//! target exactly the queries whose results could include the new rows,
//! never a blanket flush.

/// Games update frequently during the season.
pub const TTL_GAMES_SECS: i64 = 5 * 60;
/// Teams change rarely.
pub const TTL_TEAMS_SECS: i64 = 60 * 60;
/// Players update moderately.
pub const TTL_PLAYERS_SECS: i64 = 15 * 60;
/// Stats update with games.
pub const TTL_STATS_SECS: i64 = 5 * 60;

pub fn games_week_key(season: i32, week: u8) -> String {
    format!("games:{season}:{week}")
}

pub fn games_season_key(season: i32) -> String {
    format!("games:{season}:all")
}

pub fn teams_list_key() -> String {
    "teams:list".to_string()
}

pub fn player_key(player_id: i64) -> String {
    format!("players:{player_id}")
}

pub fn game_stats_key(game_id: i64) -> String {
    format!("stats:game:{game_id}")
}

pub fn games_week_pattern(season: i32, week: u8) -> String {
    format!("games:{season}:{week}*")
}

pub fn games_season_pattern(season: i32) -> String {
    format!("games:{season}:all*")
}

/// Every cached games query for a season, used when a whole-season sync
/// could have touched any week.
pub fn games_pattern(season: i32) -> String {
    format!("games:{season}:*")
}

pub fn teams_pattern() -> String {
    "teams:*".to_string()
}

pub fn players_pattern() -> String {
    "players:*".to_string()
}

pub fn game_stats_pattern(game_id: i64) -> String {
    format!("stats:game:{game_id}*")
}
