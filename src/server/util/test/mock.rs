//! Mock data factories: repository records and ESPN wire bodies.

use chrono::{TimeZone, Utc};

use crate::server::{
    data::{game::NewGame, game_stat::NewGameStat, player::NewPlayer, team::NewTeam},
    espn::model::{
        Athlete, AthleteRef, AthleteStatLine, Boxscore, Competition, Competitor, Event,
        EventSeason, EventWeek, GameStatus, GameStatusType, League, Position, RosterGroup,
        RosterResponse, ScoreboardResponse, Sport, StatCategory, SummaryResponse, Team, TeamEntry,
        TeamPlayerStats, TeamRef, TeamsResponse, Venue,
    },
    service::sync::orchestrator::EXPECTED_TEAM_COUNT,
};

pub fn new_team(team_id: i64) -> NewTeam {
    NewTeam {
        team_id,
        name: format!("Team {team_id}"),
        abbreviation: format!("T{team_id}"),
        location: format!("City {team_id}"),
        conference: None,
        division: None,
    }
}

/// The full fixed-size team set.
pub fn new_teams() -> Vec<NewTeam> {
    (1..=EXPECTED_TEAM_COUNT as i64).map(new_team).collect()
}

pub fn new_game(game_id: i64, season: i32, week: i32, home_team_id: i32, away_team_id: i32) -> NewGame {
    NewGame {
        game_id,
        season,
        week,
        home_team_id,
        away_team_id,
        home_score: None,
        away_score: None,
        status: "Scheduled".to_string(),
        start_time: Utc
            .with_ymd_and_hms(season, 10, 5, 17, 0, 0)
            .unwrap()
            .naive_utc(),
        venue: Some("Test Stadium".to_string()),
    }
}

pub fn new_player(player_id: i64, team_id: Option<i32>) -> NewPlayer {
    NewPlayer {
        player_id,
        name: format!("Player {player_id}"),
        position: Some("QB".to_string()),
        jersey_number: Some(12),
        status: "Active".to_string(),
        team_id,
    }
}

pub fn new_game_stat(game_id: i32, player_id: i32) -> NewGameStat {
    NewGameStat {
        game_id,
        player_id,
        passing_yards: 250,
        rushing_yards: 10,
        receiving_yards: 0,
        touchdowns: 2,
    }
}

pub fn mock_teams_response() -> TeamsResponse {
    let teams = (1..=EXPECTED_TEAM_COUNT as i64)
        .map(|team_id| TeamEntry {
            team: Team {
                id: team_id.to_string(),
                name: format!("Team {team_id}"),
                abbreviation: format!("T{team_id}"),
                location: format!("City {team_id}"),
            },
        })
        .collect();

    TeamsResponse {
        sports: vec![Sport {
            leagues: vec![League { teams }],
        }],
    }
}

/// A full week's scoreboard: `game_count` events pairing teams 1..=2n.
pub fn mock_scoreboard(season: i32, week: u8, game_count: usize) -> ScoreboardResponse {
    let events = (0..game_count)
        .map(|index| {
            let home_team_id = (index as i64) * 2 + 1;
            let away_team_id = (index as i64) * 2 + 2;

            Event {
                id: (401_547_400 + index as i64).to_string(),
                date: Utc.with_ymd_and_hms(season, 10, 5, 17, 0, 0).unwrap(),
                season: EventSeason { year: season },
                week: EventWeek {
                    number: week as i32,
                },
                competitions: vec![Competition {
                    venue: Some(Venue {
                        full_name: format!("Stadium {index}"),
                    }),
                    competitors: vec![
                        Competitor {
                            home_away: "home".to_string(),
                            team: TeamRef {
                                id: home_team_id.to_string(),
                            },
                            score: Some("21".to_string()),
                        },
                        Competitor {
                            home_away: "away".to_string(),
                            team: TeamRef {
                                id: away_team_id.to_string(),
                            },
                            score: Some("17".to_string()),
                        },
                    ],
                    status: GameStatus {
                        status_type: GameStatusType {
                            name: "STATUS_FINAL".to_string(),
                            completed: true,
                        },
                    },
                }],
            }
        })
        .collect();

    ScoreboardResponse { events }
}

pub fn mock_roster(player_ids: &[i64]) -> RosterResponse {
    let items = player_ids
        .iter()
        .map(|player_id| Athlete {
            id: player_id.to_string(),
            full_name: format!("Player {player_id}"),
            position: Some(Position {
                abbreviation: "QB".to_string(),
            }),
            jersey: Some("12".to_string()),
            status: None,
        })
        .collect();

    RosterResponse {
        athletes: vec![RosterGroup { items }],
    }
}

/// A box score with one passing line of `yards` per player.
pub fn mock_summary(lines: &[(i64, i32)]) -> SummaryResponse {
    let athletes = lines
        .iter()
        .map(|(player_id, yards)| AthleteStatLine {
            athlete: AthleteRef {
                id: player_id.to_string(),
            },
            stats: vec![yards.to_string(), "2".to_string()],
        })
        .collect();

    SummaryResponse {
        boxscore: Boxscore {
            players: vec![TeamPlayerStats {
                statistics: vec![StatCategory {
                    name: "passing".to_string(),
                    keys: vec!["passingYards".to_string(), "passingTouchdowns".to_string()],
                    athletes,
                }],
            }],
        },
    }
}
