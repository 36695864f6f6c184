//! Tests for the season calendar and fetch eligibility rules.

use chrono::{DateTime, TimeZone, Utc};

use crate::server::service::sync::season::{self, SeasonPeriod, SeasonPhase};

fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

/// Tests that the first days of September are preseason.
///
/// Expected: Preseason with week 0, attributed to the new season year
#[test]
fn classifies_early_september_as_preseason() {
    let period = season::period_for(at(2025, 9, 2));

    assert_eq!(period.year, 2025);
    assert_eq!(period.week, 0);
    assert_eq!(period.phase, SeasonPhase::Preseason);
}

/// Tests that the regular season opens in week 1.
///
/// The 2025 season starts Thursday September 4th, so the following Sunday
/// still falls in week 1.
#[test]
fn opens_regular_season_in_week_one() {
    let period = season::period_for(at(2025, 9, 7));

    assert_eq!(period.year, 2025);
    assert_eq!(period.week, 1);
    assert_eq!(period.phase, SeasonPhase::Regular);
}

/// Tests that weeks advance in seven-day steps from the season start.
#[test]
fn advances_weeks_in_seven_day_steps() {
    assert_eq!(season::period_for(at(2025, 9, 11)).week, 2);
    assert_eq!(season::period_for(at(2025, 12, 7)).week, 14);
}

/// Tests that January belongs to the previous calendar year's season.
///
/// Expected: season year 2025 in January 2026, in the postseason
#[test]
fn attributes_january_to_previous_season() {
    let period = season::period_for(at(2026, 1, 10));

    assert_eq!(period.year, 2025);
    assert_eq!(period.phase, SeasonPhase::Postseason);
}

/// Tests that early February is the Super Bowl window.
///
/// Expected: postseason at the final week number
#[test]
fn keeps_super_bowl_window_in_postseason() {
    let period = season::period_for(at(2026, 2, 10));

    assert_eq!(period.year, 2025);
    assert_eq!(period.week, 22);
    assert_eq!(period.phase, SeasonPhase::Postseason);
}

/// Tests the postseason/offseason boundary in mid-February.
#[test]
fn ends_postseason_mid_february() {
    assert_eq!(
        season::period_for(at(2026, 2, 15)).phase,
        SeasonPhase::Postseason
    );

    let after = season::period_for(at(2026, 2, 16));
    assert_eq!(after.phase, SeasonPhase::Offseason);
    assert_eq!(after.year, 2025);
}

/// Tests that March through August is the offseason of the calendar year.
#[test]
fn classifies_march_through_august_as_offseason() {
    let march = season::period_for(at(2026, 3, 1));
    assert_eq!(march.phase, SeasonPhase::Offseason);
    assert_eq!(march.year, 2026);
    assert_eq!(march.week, 0);

    let august = season::period_for(at(2026, 8, 31));
    assert_eq!(august.phase, SeasonPhase::Offseason);
    assert_eq!(august.year, 2026);
}

/// Tests that regular-season fetches outside weeks 1-18 are denied.
///
/// Expected: weeks 0 and 19 denied as out of range, weeks 1 and 18 allowed
#[test]
fn rejects_weeks_outside_regular_season() {
    let now = at(2025, 10, 1);
    let request = |week| SeasonPeriod {
        year: 2025,
        week,
        phase: SeasonPhase::Regular,
    };

    let too_low = season::is_fetch_allowed(&request(0), now);
    assert!(!too_low.allowed);
    assert_eq!(too_low.reason, Some("week out of range"));

    let too_high = season::is_fetch_allowed(&request(19), now);
    assert!(!too_high.allowed);
    assert_eq!(too_high.reason, Some("week out of range"));

    assert!(season::is_fetch_allowed(&request(1), now).allowed);
    assert!(season::is_fetch_allowed(&request(18), now).allowed);
}

/// Tests that only the current and immediately preceding seasons are
/// fetchable on demand.
///
/// Expected: 2025 and 2024 allowed mid-2025-season, 2023 and 2026 denied
#[test]
fn allows_only_current_and_previous_season() {
    let now = at(2025, 10, 1);

    assert!(season::is_season_in_window(2025, now).allowed);
    assert!(season::is_season_in_window(2024, now).allowed);

    let too_old = season::is_season_in_window(2023, now);
    assert!(!too_old.allowed);
    assert_eq!(too_old.reason, Some("season too far in the past"));

    let too_new = season::is_season_in_window(2026, now);
    assert!(!too_new.allowed);
    assert_eq!(too_new.reason, Some("season too far ahead"));
}

/// Tests that the season window follows the season year, not the calendar
/// year, across the January rollover.
#[test]
fn season_window_follows_season_year_in_january() {
    let now = at(2026, 1, 15);

    assert!(season::is_season_in_window(2025, now).allowed);
    assert!(season::is_season_in_window(2024, now).allowed);
    assert!(!season::is_season_in_window(2026, now).allowed);
}
