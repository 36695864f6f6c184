use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing;

use crate::server::{
    cache::keys,
    controller::util::auto_fetched_headers,
    data::team::TeamRepository,
    error::Error,
    model::{
        api::{ErrorDto, TeamDto},
        app::AppState,
    },
};

pub static TEAMS_TAG: &str = "teams";

/// List all teams.
#[utoipa::path(
    get,
    path = "/api/teams",
    tag = TEAMS_TAG,
    responses(
        (status = 200, description = "All teams", body = Vec<TeamDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_teams(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let cache_key = keys::teams_list_key();
    if let Some(teams) = state.cache.get_json::<Vec<TeamDto>>(&cache_key).await {
        return Ok((StatusCode::OK, auto_fetched_headers(false), axum::Json(teams)).into_response());
    }

    let team_repo = TeamRepository::new(&state.db);
    let mut teams = team_repo.list_all().await?;

    let mut fetched = false;
    if teams.is_empty() {
        match state.sync.refresh_teams().await {
            Ok(was_fetched) => {
                fetched = was_fetched;
                if was_fetched {
                    teams = team_repo.list_all().await?;
                }
            }
            Err(err) => tracing::warn!("teams auto-fetch failed: {err}"),
        }
    }

    let dtos: Vec<TeamDto> = teams.into_iter().map(TeamDto::from).collect();
    state
        .cache
        .set_json(&cache_key, &dtos, keys::TTL_TEAMS_SECS)
        .await;

    Ok((StatusCode::OK, auto_fetched_headers(fetched), axum::Json(dtos)).into_response())
}

/// Get one team by external team id.
#[utoipa::path(
    get,
    path = "/api/teams/{team_id}",
    tag = TEAMS_TAG,
    params(("team_id" = i64, Path, description = "External team identifier")),
    responses(
        (status = 200, description = "The requested team", body = TeamDto),
        (status = 404, description = "Team not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_team(
    State(state): State<AppState>,
    Path(team_id): Path<i64>,
) -> Result<impl IntoResponse, Error> {
    let team_repo = TeamRepository::new(&state.db);

    let mut team = team_repo.find_by_team_id(team_id).await?;
    let mut fetched = false;

    if team.is_none() {
        match state.sync.fetch_team_if_missing(team_id).await {
            Ok(was_fetched) => {
                fetched = was_fetched;
                team = team_repo.find_by_team_id(team_id).await?;
            }
            Err(err) => tracing::warn!(team_id, "team auto-fetch failed: {err}"),
        }
    }

    match team {
        Some(team) => Ok((
            StatusCode::OK,
            auto_fetched_headers(fetched),
            axum::Json(TeamDto::from(team)),
        )
            .into_response()),
        None => Ok((
            StatusCode::NOT_FOUND,
            axum::Json(ErrorDto {
                error: "Team not found".to_string(),
            }),
        )
            .into_response()),
    }
}
