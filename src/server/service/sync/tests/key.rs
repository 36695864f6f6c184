//! Tests for ResourceKey rendering and identity.

use crate::server::service::sync::key::ResourceKey;

/// Tests the log/observability rendering of every key kind.
#[test]
fn renders_each_key_kind() {
    assert_eq!(
        ResourceKey::Games {
            season: 2025,
            week: 5
        }
        .to_string(),
        "games:2025:5"
    );
    assert_eq!(
        ResourceKey::SeasonGames { season: 2025 }.to_string(),
        "games:2025:all"
    );
    assert_eq!(ResourceKey::Teams.to_string(), "teams:all");
    assert_eq!(ResourceKey::Team { team_id: 12 }.to_string(), "team:12");
    assert_eq!(
        ResourceKey::Player { player_id: 4035 }.to_string(),
        "player:4035"
    );
    assert_eq!(
        ResourceKey::GameStats {
            game_id: 401_547_402
        }
        .to_string(),
        "stats:401547402"
    );
}

/// Tests that equality is structural, so deduplication distinguishes weeks
/// and seasons but not separately-constructed identical keys.
#[test]
fn equality_is_structural() {
    let key = ResourceKey::Games {
        season: 2025,
        week: 5,
    };

    assert_eq!(
        key,
        ResourceKey::Games {
            season: 2025,
            week: 5
        }
    );
    assert_ne!(
        key,
        ResourceKey::Games {
            season: 2025,
            week: 6
        }
    );
    assert_ne!(key, ResourceKey::SeasonGames { season: 2025 });
}
