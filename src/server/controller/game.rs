use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use tracing;

use crate::server::{
    cache::keys,
    controller::util::auto_fetched_headers,
    data::{game::GameRepository, game_stat::GameStatRepository},
    error::Error,
    model::{
        api::{ErrorDto, GameDto, GameStatDto, GamesQuery},
        app::AppState,
    },
    service::sync::season,
};

pub static GAMES_TAG: &str = "games";

/// List games for a season, optionally narrowed to a week.
///
/// When the read returns zero rows the missing period is fetched from
/// upstream and the query retried; `x-auto-fetched: true` marks responses
/// whose data was pulled by this request.
#[utoipa::path(
    get,
    path = "/api/games",
    tag = GAMES_TAG,
    params(GamesQuery),
    responses(
        (status = 200, description = "Games for the requested period", body = Vec<GameDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_games(
    State(state): State<AppState>,
    Query(query): Query<GamesQuery>,
) -> Result<impl IntoResponse, Error> {
    let season = query
        .season
        .unwrap_or_else(|| season::current_period(Utc::now()).year);

    let cache_key = match query.week {
        Some(week) => keys::games_week_key(season, week),
        None => keys::games_season_key(season),
    };

    if let Some(games) = state.cache.get_json::<Vec<GameDto>>(&cache_key).await {
        return Ok((StatusCode::OK, auto_fetched_headers(false), axum::Json(games)).into_response());
    }

    let game_repo = GameRepository::new(&state.db);
    let mut games = game_repo.list_by_season(season, query.week).await?;

    let mut fetched = false;
    if games.is_empty() {
        let result = match query.week {
            Some(week) => state.sync.fetch_games_if_missing(season, week).await,
            None => state.sync.fetch_season_games_if_missing(season).await,
        };

        match result {
            Ok(was_fetched) => {
                fetched = was_fetched;
                if was_fetched {
                    games = game_repo.list_by_season(season, query.week).await?;
                }
            }
            // Could not sync; serve what we have (nothing) rather than a 5xx.
            Err(err) => tracing::warn!(season, "games auto-fetch failed: {err}"),
        }
    }

    let dtos: Vec<GameDto> = games.into_iter().map(GameDto::from).collect();
    state
        .cache
        .set_json(&cache_key, &dtos, keys::TTL_GAMES_SECS)
        .await;

    Ok((StatusCode::OK, auto_fetched_headers(fetched), axum::Json(dtos)).into_response())
}

/// Player stat lines for one game, by external game id.
#[utoipa::path(
    get,
    path = "/api/games/{game_id}/stats",
    tag = GAMES_TAG,
    params(("game_id" = i64, Path, description = "External game identifier")),
    responses(
        (status = 200, description = "Stat lines for the game", body = Vec<GameStatDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_game_stats(
    State(state): State<AppState>,
    Path(game_id): Path<i64>,
) -> Result<impl IntoResponse, Error> {
    let cache_key = keys::game_stats_key(game_id);
    if let Some(stats) = state.cache.get_json::<Vec<GameStatDto>>(&cache_key).await {
        return Ok((StatusCode::OK, auto_fetched_headers(false), axum::Json(stats)).into_response());
    }

    let game_repo = GameRepository::new(&state.db);
    let stat_repo = GameStatRepository::new(&state.db);

    let game = game_repo.find_by_game_id(game_id).await?;
    let mut stats = match &game {
        Some(game) => stat_repo.list_by_game(game.id).await?,
        None => Vec::new(),
    };

    let mut fetched = false;
    if stats.is_empty() {
        match state.sync.fetch_stats_if_missing(game_id).await {
            Ok(was_fetched) => {
                fetched = was_fetched;
                if was_fetched {
                    if let Some(game) = game_repo.find_by_game_id(game_id).await? {
                        stats = stat_repo.list_by_game(game.id).await?;
                    }
                }
            }
            Err(err) => tracing::warn!(game_id, "stats auto-fetch failed: {err}"),
        }
    }

    let dtos: Vec<GameStatDto> = stats.into_iter().map(GameStatDto::from).collect();
    state
        .cache
        .set_json(&cache_key, &dtos, keys::TTL_STATS_SECS)
        .await;

    Ok((StatusCode::OK, auto_fetched_headers(fetched), axum::Json(dtos)).into_response())
}
