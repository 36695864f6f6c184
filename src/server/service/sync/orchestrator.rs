//! The on-demand sync orchestrator.
//!
//! One `fetch_*_if_missing` operation per resource family, all following the
//! same shape: build a [`ResourceKey`], check temporal eligibility for
//! period-keyed operations (a decline is a logged no-op, not an error),
//! acquire or join the in-flight fetch for that key, and as leader resolve
//! dependencies, fetch from ESPN, upsert, and invalidate the affected cache
//! patterns. `Ok(true)` means this call pulled and persisted new data;
//! `Ok(false)` means eligibility declined or a concurrent caller's completed
//! fetch was observed.
//!
//! The dependency graph is fixed and acyclic: Teams before Games, Games
//! before Stats, Teams before Players. Dependency fetches recurse through the
//! same entry points, so they are deduplicated like any other fetch. Keep the
//! graph acyclic when extending it.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use futures::stream::{FuturesUnordered, StreamExt};
use sea_orm::DatabaseConnection;
use tracing;

use crate::server::{
    cache::{Cache, keys},
    data::{
        game::{GameRepository, NewGame},
        game_stat::{GameStatRepository, NewGameStat},
        player::{NewPlayer, PlayerRepository},
        team::{NewTeam, TeamRepository},
    },
    error::{Error, sync::SyncError},
    espn,
    service::sync::{
        inflight::{Acquired, InFlightRegistry},
        key::ResourceKey,
        season::{self, SeasonPeriod, SeasonPhase},
    },
};

/// The league has a fixed team count; fewer rows than this means the team
/// set must be (re)fetched before anything that references teams.
pub const EXPECTED_TEAM_COUNT: u64 = 32;

const MAX_CONCURRENT_ROSTER_FETCHES: usize = 8;

#[derive(Clone)]
pub struct SyncOrchestrator {
    db: DatabaseConnection,
    espn: espn::Client,
    cache: Cache,
    inflight: Arc<InFlightRegistry>,
}

impl SyncOrchestrator {
    pub fn new(db: DatabaseConnection, espn: espn::Client, cache: Cache) -> Self {
        Self {
            db,
            espn,
            cache,
            inflight: Arc::new(InFlightRegistry::new()),
        }
    }

    /// Fetch one regular-season week of games if eligible.
    pub async fn fetch_games_if_missing(&self, season: i32, week: u8) -> Result<bool, Error> {
        let requested = SeasonPeriod {
            year: season,
            week,
            phase: SeasonPhase::Regular,
        };
        let decision = season::is_fetch_allowed(&requested, Utc::now());
        if !decision.allowed {
            tracing::info!(
                season,
                week,
                reason = decision.reason.unwrap_or_default(),
                "declining games fetch"
            );
            return Ok(false);
        }

        let key = ResourceKey::Games { season, week };
        self.run(key.clone(), move |orchestrator| async move {
            orchestrator.sync_games(&key, season, Some(week)).await
        })
        .await
    }

    /// Fetch a whole season of games if the season is in the fetch window.
    pub async fn fetch_season_games_if_missing(&self, season: i32) -> Result<bool, Error> {
        let decision = season::is_season_in_window(season, Utc::now());
        if !decision.allowed {
            tracing::info!(
                season,
                reason = decision.reason.unwrap_or_default(),
                "declining season games fetch"
            );
            return Ok(false);
        }

        let key = ResourceKey::SeasonGames { season };
        self.run(key.clone(), move |orchestrator| async move {
            orchestrator.sync_games(&key, season, None).await
        })
        .await
    }

    /// Refresh the full team set because a single team read missed.
    ///
    /// Teams only exist upstream as a complete set, so a missing team is
    /// resolved by refreshing all of them.
    pub async fn fetch_team_if_missing(&self, team_id: i64) -> Result<bool, Error> {
        let key = ResourceKey::Team { team_id };
        self.run(key, move |orchestrator| async move {
            tracing::info!(team_id, "team missing, refreshing full team set");
            orchestrator.refresh_teams().await
        })
        .await
    }

    /// Sync all rosters because a single player read missed.
    pub async fn fetch_player_if_missing(&self, player_id: i64) -> Result<bool, Error> {
        let key = ResourceKey::Player { player_id };
        self.run(key.clone(), move |orchestrator| async move {
            orchestrator.sync_rosters(&key).await
        })
        .await
    }

    /// Fetch the box score for a game that already has a row.
    pub async fn fetch_stats_if_missing(&self, game_id: i64) -> Result<bool, Error> {
        let key = ResourceKey::GameStats { game_id };
        self.run(key.clone(), move |orchestrator| async move {
            orchestrator.sync_game_stats(&key, game_id).await
        })
        .await
    }

    /// Deduplicated full refresh of the team set, shared by the team
    /// operations and the dependency path.
    pub async fn refresh_teams(&self) -> Result<bool, Error> {
        self.run(ResourceKey::Teams, move |orchestrator| async move {
            orchestrator.sync_teams().await
        })
        .await
    }

    /// The uniform dedup-and-lead step shared by every operation.
    ///
    /// The leader's work runs in a detached task so a disconnected caller
    /// cannot starve followers waiting on the same key; only the leader's own
    /// await on the handle is tied to its caller.
    async fn run<F, Fut>(&self, key: ResourceKey, work: F) -> Result<bool, Error>
    where
        F: FnOnce(SyncOrchestrator) -> Fut + Send + 'static,
        Fut: Future<Output = Result<bool, Error>> + Send + 'static,
    {
        match self.inflight.acquire_or_join(key.clone()) {
            Acquired::Follower(follower) => {
                tracing::debug!(%key, "joining in-flight fetch");
                Ok(follower.outcome().await?)
            }
            Acquired::Leader(ticket) => {
                let orchestrator = self.clone();
                let handle = tokio::spawn(async move {
                    let started_at = ticket.started_at();
                    let result = work(orchestrator).await;

                    let outcome = match &result {
                        Ok(fetched) => {
                            let elapsed_ms = (Utc::now() - started_at).num_milliseconds();
                            tracing::info!(key = %ticket.key(), fetched, elapsed_ms, "sync completed");
                            Ok(*fetched)
                        }
                        Err(err) => {
                            tracing::warn!(key = %ticket.key(), "sync failed: {err}");
                            Err(outcome_error(ticket.key(), err))
                        }
                    };

                    ticket.complete(outcome);
                    result
                });

                match handle.await {
                    Ok(result) => result,
                    Err(_) => Err(SyncError::Aborted {
                        key: key.to_string(),
                    }
                    .into()),
                }
            }
        }
    }

    /// Ensure the full team set exists before fetching anything keyed by team.
    async fn ensure_teams_exist(&self) -> Result<(), Error> {
        let count = TeamRepository::new(&self.db).count().await?;
        if count >= EXPECTED_TEAM_COUNT {
            return Ok(());
        }

        tracing::info!(
            count,
            expected = EXPECTED_TEAM_COUNT,
            "team set incomplete, fetching all teams"
        );
        self.refresh_teams().await?;

        Ok(())
    }

    async fn sync_teams(&self) -> Result<bool, Error> {
        let response = self.espn.fetch_all_teams().await?;

        let teams: Vec<NewTeam> = response
            .teams()
            .filter_map(|team| {
                let Ok(team_id) = team.id.parse::<i64>() else {
                    tracing::warn!(id = %team.id, "skipping team with unparseable id");
                    return None;
                };

                Some(NewTeam {
                    team_id,
                    name: team.name.clone(),
                    abbreviation: team.abbreviation.clone(),
                    location: team.location.clone(),
                    conference: None,
                    division: None,
                })
            })
            .collect();

        let persisted = TeamRepository::new(&self.db).upsert_many(teams).await?;
        self.invalidate(&keys::teams_pattern()).await;

        tracing::info!(count = persisted.len(), "synced teams");
        Ok(true)
    }

    async fn sync_games(
        &self,
        key: &ResourceKey,
        season: i32,
        week: Option<u8>,
    ) -> Result<bool, Error> {
        self.ensure_teams_exist()
            .await
            .map_err(|err| dependency_error(key, &err))?;

        let scoreboard = match week {
            Some(week) => self.espn.fetch_games(season, week).await?,
            None => self.espn.fetch_season_games(season).await?,
        };

        let team_ids: Vec<i64> = scoreboard
            .events
            .iter()
            .flat_map(|event| event.competitions.iter())
            .flat_map(|competition| competition.competitors.iter())
            .filter_map(|competitor| competitor.team.id.parse::<i64>().ok())
            .collect();

        let team_db_ids: HashMap<i64, i32> = TeamRepository::new(&self.db)
            .get_db_ids_by_team_ids(&team_ids)
            .await?
            .into_iter()
            .collect();

        let games: Vec<NewGame> = scoreboard
            .events
            .iter()
            .filter_map(|event| map_event(event, &team_db_ids))
            .collect();

        let persisted = GameRepository::new(&self.db).upsert_many(games).await?;

        match week {
            Some(week) => {
                self.invalidate(&keys::games_week_pattern(season, week)).await;
                self.invalidate(&keys::games_season_pattern(season)).await;
            }
            // A season sync can touch any week's cached query.
            None => self.invalidate(&keys::games_pattern(season)).await,
        }

        tracing::info!(season, week, count = persisted.len(), "synced games");
        Ok(true)
    }

    async fn sync_rosters(&self, key: &ResourceKey) -> Result<bool, Error> {
        self.ensure_teams_exist()
            .await
            .map_err(|err| dependency_error(key, &err))?;

        let teams = TeamRepository::new(&self.db).list_all().await?;

        // Keyed by player id: a player appearing on more than one fetched
        // roster must not produce two rows in one upsert statement.
        let mut players: HashMap<i64, NewPlayer> = HashMap::new();
        for chunk in teams.chunks(MAX_CONCURRENT_ROSTER_FETCHES) {
            let mut futures = FuturesUnordered::new();

            for team in chunk {
                let espn = self.espn.clone();
                let team_id = team.team_id;
                let team_db_id = team.id;

                futures.push(async move {
                    espn.fetch_team_roster(team_id)
                        .await
                        .map(|roster| (team_db_id, roster))
                });
            }

            while let Some(fetched) = futures.next().await {
                let (team_db_id, roster) = fetched?;
                collect_roster_players(team_db_id, &roster, &mut players);
            }
        }

        let mut players: Vec<NewPlayer> = players.into_values().collect();
        players.sort_by_key(|player| player.player_id);

        let persisted = PlayerRepository::new(&self.db).upsert_many(players).await?;
        self.invalidate(&keys::players_pattern()).await;

        tracing::info!(count = persisted.len(), "synced rosters");
        Ok(true)
    }

    async fn sync_game_stats(&self, key: &ResourceKey, game_id: i64) -> Result<bool, Error> {
        // Stats hang off a game row; an unknown external id cannot tell us
        // which season/week to backfill, so it is a dependency failure.
        let game = GameRepository::new(&self.db)
            .find_by_game_id(game_id)
            .await?
            .ok_or_else(|| SyncError::Dependency {
                key: key.to_string(),
                reason: format!("game {game_id} is not present"),
            })?;

        let summary = self.espn.fetch_game_stats(game_id).await?;
        let lines = summary.player_stat_lines();

        let player_ids: Vec<i64> = lines.iter().map(|line| line.player_id).collect();
        let player_db_ids: HashMap<i64, i32> = PlayerRepository::new(&self.db)
            .get_db_ids_by_player_ids(&player_ids)
            .await?
            .into_iter()
            .collect();

        let stats: Vec<NewGameStat> = lines
            .into_iter()
            .filter_map(|line| {
                let Some(player_db_id) = player_db_ids.get(&line.player_id).copied() else {
                    tracing::warn!(
                        player_id = line.player_id,
                        game_id,
                        "skipping stat line for unknown player"
                    );
                    return None;
                };

                Some(NewGameStat {
                    game_id: game.id,
                    player_id: player_db_id,
                    passing_yards: line.passing_yards,
                    rushing_yards: line.rushing_yards,
                    receiving_yards: line.receiving_yards,
                    touchdowns: line.touchdowns,
                })
            })
            .collect();

        let persisted = GameStatRepository::new(&self.db).upsert_many(stats).await?;
        self.invalidate(&keys::game_stats_pattern(game_id)).await;

        tracing::info!(game_id, count = persisted.len(), "synced game stats");
        Ok(true)
    }

    /// Cache invalidation is best-effort: failures are logged, never escalated.
    async fn invalidate(&self, pattern: &str) {
        if let Err(err) = self.cache.invalidate_pattern(pattern).await {
            tracing::warn!(pattern, "cache invalidation failed: {err}");
        }
    }
}

fn map_event(event: &espn::model::Event, team_db_ids: &HashMap<i64, i32>) -> Option<NewGame> {
    let Ok(game_id) = event.id.parse::<i64>() else {
        tracing::warn!(id = %event.id, "skipping event with unparseable id");
        return None;
    };

    let competition = event.competitions.first()?;

    let home = competition
        .competitors
        .iter()
        .find(|competitor| competitor.home_away == "home")?;
    let away = competition
        .competitors
        .iter()
        .find(|competitor| competitor.home_away == "away")?;

    let home_db_id = resolve_team(game_id, &home.team.id, team_db_ids)?;
    let away_db_id = resolve_team(game_id, &away.team.id, team_db_ids)?;

    Some(NewGame {
        game_id,
        season: event.season.year,
        week: event.week.number,
        home_team_id: home_db_id,
        away_team_id: away_db_id,
        home_score: home.score.as_deref().and_then(|score| score.parse().ok()),
        away_score: away.score.as_deref().and_then(|score| score.parse().ok()),
        status: competition.status.status_type.name.clone(),
        start_time: event.date.naive_utc(),
        venue: competition.venue.as_ref().map(|venue| venue.full_name.clone()),
    })
}

fn resolve_team(game_id: i64, team_id: &str, team_db_ids: &HashMap<i64, i32>) -> Option<i32> {
    let parsed = team_id.parse::<i64>().ok()?;
    let db_id = team_db_ids.get(&parsed).copied();

    if db_id.is_none() {
        tracing::warn!(game_id, team_id, "skipping game referencing unknown team");
    }

    db_id
}

fn collect_roster_players(
    team_db_id: i32,
    roster: &espn::model::RosterResponse,
    players: &mut HashMap<i64, NewPlayer>,
) {
    for group in &roster.athletes {
        for athlete in &group.items {
            let Ok(player_id) = athlete.id.parse::<i64>() else {
                tracing::warn!(id = %athlete.id, "skipping athlete with unparseable id");
                continue;
            };

            players.insert(player_id, NewPlayer {
                player_id,
                name: athlete.full_name.clone(),
                position: athlete
                    .position
                    .as_ref()
                    .map(|position| position.abbreviation.clone()),
                jersey_number: athlete.jersey.as_deref().and_then(|jersey| jersey.parse().ok()),
                status: athlete
                    .status
                    .as_ref()
                    .map(|status| status.name.clone())
                    .unwrap_or_else(|| "Active".to_string()),
                team_id: Some(team_db_id),
            });
        }
    }
}

fn dependency_error(key: &ResourceKey, err: &Error) -> SyncError {
    SyncError::Dependency {
        key: key.to_string(),
        reason: err.to_string(),
    }
}

/// Classifies a leader failure into the cloneable outcome published to
/// followers, attributed to the requested key.
fn outcome_error(key: &ResourceKey, err: &Error) -> SyncError {
    match err {
        Error::SyncError(sync_err) => sync_err.clone(),
        Error::EspnError(espn_err) => SyncError::Upstream {
            key: key.to_string(),
            reason: espn_err.to_string(),
        },
        Error::DbErr(db_err) => SyncError::Persistence {
            key: key.to_string(),
            reason: db_err.to_string(),
        },
        other => SyncError::Upstream {
            key: key.to_string(),
            reason: other.to_string(),
        },
    }
}
