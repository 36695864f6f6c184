//! Response DTOs and query parameter types for the web API.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// The response when an error occurs with an API request
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorDto {
    /// The error message
    pub error: String,
}

#[derive(Deserialize, IntoParams)]
pub struct GamesQuery {
    /// Season year, e.g. 2025. Defaults to the current season.
    pub season: Option<i32>,
    /// Regular-season week. Omit to list the whole season.
    pub week: Option<u8>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct GameDto {
    pub game_id: i64,
    pub season: i32,
    pub week: i32,
    pub home_team_id: i32,
    pub away_team_id: i32,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub status: String,
    pub start_time: NaiveDateTime,
    pub venue: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct TeamDto {
    pub team_id: i64,
    pub name: String,
    pub abbreviation: String,
    pub location: String,
    pub conference: Option<String>,
    pub division: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct PlayerDto {
    pub player_id: i64,
    pub name: String,
    pub position: Option<String>,
    pub jersey_number: Option<i32>,
    pub status: String,
    pub team_id: Option<i32>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct GameStatDto {
    pub player_id: i32,
    pub passing_yards: i32,
    pub rushing_yards: i32,
    pub receiving_yards: i32,
    pub touchdowns: i32,
}

impl From<entity::game::Model> for GameDto {
    fn from(model: entity::game::Model) -> Self {
        Self {
            game_id: model.game_id,
            season: model.season,
            week: model.week,
            home_team_id: model.home_team_id,
            away_team_id: model.away_team_id,
            home_score: model.home_score,
            away_score: model.away_score,
            status: model.status,
            start_time: model.start_time,
            venue: model.venue,
        }
    }
}

impl From<entity::team::Model> for TeamDto {
    fn from(model: entity::team::Model) -> Self {
        Self {
            team_id: model.team_id,
            name: model.name,
            abbreviation: model.abbreviation,
            location: model.location,
            conference: model.conference,
            division: model.division,
        }
    }
}

impl From<entity::player::Model> for PlayerDto {
    fn from(model: entity::player::Model) -> Self {
        Self {
            player_id: model.player_id,
            name: model.name,
            position: model.position,
            jersey_number: model.jersey_number,
            status: model.status,
            team_id: model.team_id,
        }
    }
}

impl From<entity::game_stat::Model> for GameStatDto {
    fn from(model: entity::game_stat::Model) -> Self {
        Self {
            player_id: model.player_id,
            passing_yards: model.passing_yards,
            rushing_yards: model.rushing_yards,
            receiving_yards: model.receiving_yards,
            touchdowns: model.touchdowns,
        }
    }
}
