//! HTTP routing and OpenAPI documentation configuration.
//!
//! All API endpoints are registered here with their utoipa annotations, and
//! Swagger UI serves the collected specification at `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "Gridiron", description = "Self-healing NFL schedule API"), tags(
        (name = controller::game::GAMES_TAG, description = "Game schedule and stats routes"),
        (name = controller::team::TEAMS_TAG, description = "Team routes"),
        (name = controller::player::PLAYERS_TAG, description = "Player routes"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::game::list_games))
        .routes(routes!(controller::game::get_game_stats))
        .routes(routes!(controller::team::list_teams))
        .routes(routes!(controller::team::get_team))
        .routes(routes!(controller::player::get_player))
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
