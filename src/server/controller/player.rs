use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing;

use crate::server::{
    cache::keys,
    controller::util::auto_fetched_headers,
    data::player::PlayerRepository,
    error::Error,
    model::{
        api::{ErrorDto, PlayerDto},
        app::AppState,
    },
};

pub static PLAYERS_TAG: &str = "players";

/// Get one player by external player id.
#[utoipa::path(
    get,
    path = "/api/players/{player_id}",
    tag = PLAYERS_TAG,
    params(("player_id" = i64, Path, description = "External player identifier")),
    responses(
        (status = 200, description = "The requested player", body = PlayerDto),
        (status = 404, description = "Player not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_player(
    State(state): State<AppState>,
    Path(player_id): Path<i64>,
) -> Result<impl IntoResponse, Error> {
    let cache_key = keys::player_key(player_id);
    if let Some(player) = state.cache.get_json::<PlayerDto>(&cache_key).await {
        return Ok((StatusCode::OK, auto_fetched_headers(false), axum::Json(player)).into_response());
    }

    let player_repo = PlayerRepository::new(&state.db);

    let mut player = player_repo.find_by_player_id(player_id).await?;
    let mut fetched = false;

    if player.is_none() {
        match state.sync.fetch_player_if_missing(player_id).await {
            Ok(was_fetched) => {
                fetched = was_fetched;
                player = player_repo.find_by_player_id(player_id).await?;
            }
            Err(err) => tracing::warn!(player_id, "player auto-fetch failed: {err}"),
        }
    }

    match player {
        Some(player) => {
            let dto = PlayerDto::from(player);
            state
                .cache
                .set_json(&cache_key, &dto, keys::TTL_PLAYERS_SECS)
                .await;

            Ok((StatusCode::OK, auto_fetched_headers(fetched), axum::Json(dto)).into_response())
        }
        None => Ok((
            StatusCode::NOT_FOUND,
            axum::Json(ErrorDto {
                error: "Player not found".to_string(),
            }),
        )
            .into_response()),
    }
}
