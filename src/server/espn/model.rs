//! Trimmed ESPN site API response shapes.
//!
//! Only the fields the sync layer persists are modeled; everything else in the
//! upstream payloads is ignored by serde. The shapes serialize as well so tests
//! can build mock endpoint bodies from the same types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreboardResponse {
    #[serde(default)]
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub date: DateTime<Utc>,
    pub season: EventSeason,
    pub week: EventWeek,
    pub competitions: Vec<Competition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventSeason {
    pub year: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventWeek {
    pub number: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Competition {
    #[serde(default)]
    pub venue: Option<Venue>,
    pub competitors: Vec<Competitor>,
    pub status: GameStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Venue {
    #[serde(rename = "fullName")]
    pub full_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Competitor {
    #[serde(rename = "homeAway")]
    pub home_away: String,
    pub team: TeamRef,
    #[serde(default)]
    pub score: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamRef {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameStatus {
    #[serde(rename = "type")]
    pub status_type: GameStatusType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameStatusType {
    pub name: String,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamsResponse {
    pub sports: Vec<Sport>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sport {
    pub leagues: Vec<League>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct League {
    pub teams: Vec<TeamEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamEntry {
    pub team: Team,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub abbreviation: String,
    pub location: String,
}

impl TeamsResponse {
    /// Flattens the sports/leagues nesting down to the team list.
    pub fn teams(&self) -> impl Iterator<Item = &Team> {
        self.sports
            .iter()
            .flat_map(|sport| sport.leagues.iter())
            .flat_map(|league| league.teams.iter())
            .map(|entry| &entry.team)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterResponse {
    #[serde(default)]
    pub athletes: Vec<RosterGroup>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterGroup {
    #[serde(default)]
    pub items: Vec<Athlete>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Athlete {
    pub id: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
    #[serde(default)]
    pub position: Option<Position>,
    #[serde(default)]
    pub jersey: Option<String>,
    #[serde(default)]
    pub status: Option<AthleteStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    pub abbreviation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AthleteStatus {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub boxscore: Boxscore,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boxscore {
    #[serde(default)]
    pub players: Vec<TeamPlayerStats>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamPlayerStats {
    #[serde(default)]
    pub statistics: Vec<StatCategory>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatCategory {
    pub name: String,
    pub keys: Vec<String>,
    #[serde(default)]
    pub athletes: Vec<AthleteStatLine>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AthleteStatLine {
    pub athlete: AthleteRef,
    pub stats: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AthleteRef {
    pub id: String,
}

/// One player's combined stat line extracted from a box score.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerStatLine {
    pub player_id: i64,
    pub passing_yards: i32,
    pub rushing_yards: i32,
    pub receiving_yards: i32,
    pub touchdowns: i32,
}

impl SummaryResponse {
    /// Collapses the per-category box score into one stat line per player.
    ///
    /// Athletes whose external id fails to parse are skipped; the caller owns
    /// warning about them.
    pub fn player_stat_lines(&self) -> Vec<PlayerStatLine> {
        let mut lines: std::collections::HashMap<i64, PlayerStatLine> =
            std::collections::HashMap::new();

        for team in &self.boxscore.players {
            for category in &team.statistics {
                for entry in &category.athletes {
                    let Ok(player_id) = entry.athlete.id.parse::<i64>() else {
                        continue;
                    };

                    let line = lines.entry(player_id).or_insert_with(|| PlayerStatLine {
                        player_id,
                        ..Default::default()
                    });

                    line.passing_yards += category.stat_value(entry, "passingYards");
                    line.rushing_yards += category.stat_value(entry, "rushingYards");
                    line.receiving_yards += category.stat_value(entry, "receivingYards");
                    line.touchdowns += category.stat_value(entry, "passingTouchdowns")
                        + category.stat_value(entry, "rushingTouchdowns")
                        + category.stat_value(entry, "receivingTouchdowns");
                }
            }
        }

        let mut lines: Vec<PlayerStatLine> = lines.into_values().collect();
        lines.sort_by_key(|line| line.player_id);
        lines
    }
}

impl StatCategory {
    fn stat_value(&self, entry: &AthleteStatLine, key: &str) -> i32 {
        self.keys
            .iter()
            .position(|k| k == key)
            .and_then(|idx| entry.stats.get(idx))
            .and_then(|value| value.parse::<i32>().ok())
            .unwrap_or(0)
    }
}
