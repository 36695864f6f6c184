//! End-to-end orchestrator tests against in-memory SQLite and a mockito
//! ESPN server. Request counts on the mocks are the deduplication and
//! dependency assertions; row counts verify persistence.

use chrono::Utc;

use crate::server::{
    data::{
        game::GameRepository, game_stat::GameStatRepository, player::PlayerRepository,
        team::TeamRepository,
    },
    error::{Error, sync::SyncError},
    service::sync::{orchestrator::EXPECTED_TEAM_COUNT, season},
    util::test::{
        mock, mockito,
        setup::{test_setup, test_setup_with_recording_cache},
    },
};

/// A season year that is always inside the on-demand fetch window.
fn current_season() -> i32 {
    season::current_period(Utc::now()).year
}

/// Tests that concurrent fetches for the same key share one upstream call.
///
/// On a current-thread runtime the first future polled becomes the leader and
/// the rest join it before the leader's task runs, so the expected request
/// count is exact.
///
/// Expected: one scoreboard request, all five callers Ok(true), 16 games
#[tokio::test]
async fn deduplicates_concurrent_fetches_for_one_key() -> Result<(), Error> {
    let mut test = test_setup().await;
    TeamRepository::new(&test.state.db)
        .upsert_many(mock::new_teams())
        .await?;

    let season = current_season();
    let scoreboard = mockito::mock_scoreboard_endpoint(
        &mut test.server,
        season,
        Some(5),
        &mock::mock_scoreboard(season, 5, 16),
        1,
    );

    let sync = &test.state.sync;
    let (a, b, c, d, e) = tokio::join!(
        sync.fetch_games_if_missing(season, 5),
        sync.fetch_games_if_missing(season, 5),
        sync.fetch_games_if_missing(season, 5),
        sync.fetch_games_if_missing(season, 5),
        sync.fetch_games_if_missing(season, 5),
    );

    assert!(a?);
    assert!(b?);
    assert!(c?);
    assert!(d?);
    assert!(e?);

    scoreboard.assert_async().await;
    assert_eq!(GameRepository::new(&test.state.db).count().await?, 16);

    Ok(())
}

/// Tests that ineligible requests are declined without touching upstream.
///
/// Expected: Ok(false) for each, zero scoreboard requests
#[tokio::test]
async fn declines_ineligible_fetches_without_upstream_calls() -> Result<(), Error> {
    let mut test = test_setup().await;
    let scoreboard = mockito::mock_scoreboard_failure(&mut test.server, 0);

    let season = current_season();
    assert!(!test.state.sync.fetch_games_if_missing(season, 0).await?);
    assert!(!test.state.sync.fetch_games_if_missing(season, 19).await?);
    assert!(!test.state.sync.fetch_games_if_missing(season + 1, 5).await?);
    assert!(!test.state.sync.fetch_games_if_missing(season - 2, 5).await?);
    assert!(
        !test
            .state
            .sync
            .fetch_season_games_if_missing(season + 1)
            .await?
    );

    scoreboard.assert_async().await;
    assert_eq!(GameRepository::new(&test.state.db).count().await?, 0);

    Ok(())
}

/// Tests that a games fetch against an empty database pulls the team set
/// first.
///
/// Expected: one teams request, one scoreboard request, 32 teams, 16 games
#[tokio::test]
async fn fetches_teams_before_games() -> Result<(), Error> {
    let mut test = test_setup().await;
    let teams = mockito::mock_teams_endpoint(&mut test.server, &mock::mock_teams_response(), 1);

    let season = current_season();
    let scoreboard = mockito::mock_scoreboard_endpoint(
        &mut test.server,
        season,
        Some(3),
        &mock::mock_scoreboard(season, 3, 16),
        1,
    );

    assert!(test.state.sync.fetch_games_if_missing(season, 3).await?);

    teams.assert_async().await;
    scoreboard.assert_async().await;

    let db = &test.state.db;
    assert_eq!(TeamRepository::new(db).count().await?, EXPECTED_TEAM_COUNT);
    assert_eq!(GameRepository::new(db).count().await?, 16);

    Ok(())
}

/// Tests that a failed dependency fetch blocks the requested fetch and is
/// attributed to the requested key.
///
/// Expected: Err(Dependency) naming the games key, zero scoreboard requests
#[tokio::test]
async fn failed_team_fetch_blocks_games() -> Result<(), Error> {
    let mut test = test_setup().await;
    let teams = mockito::mock_teams_failure(&mut test.server, 1);
    let scoreboard = mockito::mock_scoreboard_failure(&mut test.server, 0);

    let season = current_season();
    let result = test.state.sync.fetch_games_if_missing(season, 5).await;

    match result.expect_err("games fetch should fail on team dependency") {
        Error::SyncError(SyncError::Dependency { key, .. }) => {
            assert_eq!(key, format!("games:{season}:5"));
        }
        other => panic!("unexpected error: {other}"),
    }

    teams.assert_async().await;
    scoreboard.assert_async().await;
    assert_eq!(GameRepository::new(&test.state.db).count().await?, 0);

    Ok(())
}

/// Tests that a failed fetch releases its key so a later call can retry.
///
/// Expected: first call Err, second call Ok(true) with persisted games
#[tokio::test]
async fn failed_fetch_releases_key_for_retry() -> Result<(), Error> {
    let mut test = test_setup().await;
    TeamRepository::new(&test.state.db)
        .upsert_many(mock::new_teams())
        .await?;

    let season = current_season();
    let failure = mockito::mock_scoreboard_failure(&mut test.server, 1);

    let result = test.state.sync.fetch_games_if_missing(season, 5).await;
    assert!(matches!(result, Err(Error::EspnError(_))));
    failure.assert_async().await;
    failure.remove_async().await;

    let success = mockito::mock_scoreboard_endpoint(
        &mut test.server,
        season,
        Some(5),
        &mock::mock_scoreboard(season, 5, 16),
        1,
    );

    assert!(test.state.sync.fetch_games_if_missing(season, 5).await?);
    success.assert_async().await;
    assert_eq!(GameRepository::new(&test.state.db).count().await?, 16);

    Ok(())
}

/// Tests that repeating a fetch upserts instead of duplicating rows.
///
/// Expected: two scoreboard requests, still 16 games
#[tokio::test]
async fn repeated_fetch_is_idempotent() -> Result<(), Error> {
    let mut test = test_setup().await;
    TeamRepository::new(&test.state.db)
        .upsert_many(mock::new_teams())
        .await?;

    let season = current_season();
    let scoreboard = mockito::mock_scoreboard_endpoint(
        &mut test.server,
        season,
        Some(5),
        &mock::mock_scoreboard(season, 5, 16),
        2,
    );

    assert!(test.state.sync.fetch_games_if_missing(season, 5).await?);
    assert!(test.state.sync.fetch_games_if_missing(season, 5).await?);

    scoreboard.assert_async().await;
    assert_eq!(GameRepository::new(&test.state.db).count().await?, 16);

    Ok(())
}

/// Tests the season-level games fetch.
#[tokio::test]
async fn fetches_whole_season_of_games() -> Result<(), Error> {
    let mut test = test_setup().await;
    TeamRepository::new(&test.state.db)
        .upsert_many(mock::new_teams())
        .await?;

    let season = current_season();
    let scoreboard = mockito::mock_scoreboard_endpoint(
        &mut test.server,
        season,
        None,
        &mock::mock_scoreboard(season, 1, 16),
        1,
    );

    assert!(test.state.sync.fetch_season_games_if_missing(season).await?);

    scoreboard.assert_async().await;
    assert_eq!(
        GameRepository::new(&test.state.db)
            .list_by_season(season, None)
            .await?
            .len(),
        16
    );

    Ok(())
}

/// Tests that game syncs invalidate exactly the affected cache patterns.
///
/// Teams are seeded directly so no team pattern should appear; a blanket
/// flush or a cross-family pattern is a regression.
///
/// Expected: week sync hits the week and season-aggregate patterns, season
/// sync hits the season-wide pattern, nothing else
#[tokio::test]
async fn game_syncs_invalidate_only_affected_patterns() -> Result<(), Error> {
    let (mut test, invalidations) = test_setup_with_recording_cache().await;
    TeamRepository::new(&test.state.db)
        .upsert_many(mock::new_teams())
        .await?;

    let season = current_season();
    let week_scoreboard = mockito::mock_scoreboard_endpoint(
        &mut test.server,
        season,
        Some(5),
        &mock::mock_scoreboard(season, 5, 16),
        1,
    );

    assert!(test.state.sync.fetch_games_if_missing(season, 5).await?);
    week_scoreboard.assert_async().await;
    week_scoreboard.remove_async().await;

    {
        let recorded = invalidations
            .lock()
            .expect("invalidation log lock poisoned")
            .clone();
        assert_eq!(
            recorded,
            vec![
                format!("games:{season}:5*"),
                format!("games:{season}:all*"),
            ]
        );
    }

    let season_scoreboard = mockito::mock_scoreboard_endpoint(
        &mut test.server,
        season,
        None,
        &mock::mock_scoreboard(season, 1, 16),
        1,
    );

    assert!(test.state.sync.fetch_season_games_if_missing(season).await?);
    season_scoreboard.assert_async().await;

    let recorded = invalidations
        .lock()
        .expect("invalidation log lock poisoned")
        .clone();
    assert_eq!(recorded.last(), Some(&format!("games:{season}:*")));
    assert_eq!(recorded.len(), 3);

    Ok(())
}

/// Tests that a missing team triggers a full team set refresh.
///
/// Expected: one teams request, all 32 teams present including the missed one
#[tokio::test]
async fn missing_team_refreshes_full_team_set() -> Result<(), Error> {
    let mut test = test_setup().await;
    let teams = mockito::mock_teams_endpoint(&mut test.server, &mock::mock_teams_response(), 1);

    assert!(test.state.sync.fetch_team_if_missing(7).await?);

    teams.assert_async().await;
    let repo = TeamRepository::new(&test.state.db);
    assert_eq!(repo.count().await?, EXPECTED_TEAM_COUNT);
    assert!(repo.find_by_team_id(7).await?.is_some());

    Ok(())
}

/// Tests that a missing player syncs every roster and persists the player.
///
/// Expected: one roster request per team, the player present afterwards
#[tokio::test]
async fn missing_player_syncs_all_rosters() -> Result<(), Error> {
    let mut test = test_setup().await;
    TeamRepository::new(&test.state.db)
        .upsert_many(mock::new_teams())
        .await?;

    let rosters = mockito::mock_all_rosters_endpoint(
        &mut test.server,
        &mock::mock_roster(&[501, 502]),
        EXPECTED_TEAM_COUNT as usize,
    );

    assert!(test.state.sync.fetch_player_if_missing(501).await?);

    rosters.assert_async().await;
    let repo = PlayerRepository::new(&test.state.db);
    assert!(repo.find_by_player_id(501).await?.is_some());
    assert!(repo.find_by_player_id(502).await?.is_some());

    Ok(())
}

/// Tests that stats for an unknown game fail as a dependency error without
/// an upstream call.
///
/// Expected: Err(Dependency) naming the stats key, zero summary requests
#[tokio::test]
async fn stats_require_an_existing_game_row() -> Result<(), Error> {
    let mut test = test_setup().await;
    let summary =
        mockito::mock_summary_endpoint(&mut test.server, 999, &mock::mock_summary(&[]), 0);

    let result = test.state.sync.fetch_stats_if_missing(999).await;

    match result.expect_err("stats fetch should fail for an unknown game") {
        Error::SyncError(SyncError::Dependency { key, .. }) => {
            assert_eq!(key, "stats:999");
        }
        other => panic!("unexpected error: {other}"),
    }

    summary.assert_async().await;

    Ok(())
}

/// Tests the stats happy path, including skipping stat lines for players
/// that are not in the database.
///
/// Expected: Ok(true) with two persisted stat lines, unknown player dropped
#[tokio::test]
async fn fetches_and_persists_game_stats() -> Result<(), Error> {
    let mut test = test_setup().await;
    let db = &test.state.db;
    let season = current_season();

    let mut teams = TeamRepository::new(db)
        .upsert_many(vec![mock::new_team(1), mock::new_team(2)])
        .await?;
    teams.sort_by_key(|team| team.team_id);
    let (home, away) = (&teams[0], &teams[1]);

    let game = GameRepository::new(db)
        .upsert_many(vec![mock::new_game(401, season, 1, home.id, away.id)])
        .await?
        .remove(0);

    PlayerRepository::new(db)
        .upsert_many(vec![
            mock::new_player(101, Some(home.id)),
            mock::new_player(102, Some(away.id)),
        ])
        .await?;

    let summary = mockito::mock_summary_endpoint(
        &mut test.server,
        401,
        &mock::mock_summary(&[(101, 312), (102, 245), (900, 50)]),
        1,
    );

    assert!(test.state.sync.fetch_stats_if_missing(401).await?);

    summary.assert_async().await;
    let stats = GameStatRepository::new(&test.state.db)
        .list_by_game(game.id)
        .await?;
    assert_eq!(stats.len(), 2);

    let mut yards: Vec<i32> = stats.iter().map(|stat| stat.passing_yards).collect();
    yards.sort_unstable();
    assert_eq!(yards, vec![245, 312]);
    assert!(stats.iter().all(|stat| stat.touchdowns == 2));

    Ok(())
}
