//! NFL season calendar and fetch eligibility.
//!
//! Pure functions over an injected `now` so every boundary is unit-testable.
//! The calendar rule: a season is named for the year it starts in, September
//! opens a season, January/February still belong to the previous calendar
//! year's season, and March through August are that year's offseason. The
//! anchors are business constants, not derived; treat schedule shifts as a
//! constant change plus a boundary test.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};

/// First month of a new season.
const SEASON_START_MONTH: u32 = 9;
/// September days before this are preseason.
const PRESEASON_CUTOFF_DAY: u32 = 5;
/// First month of the offseason.
const OFFSEASON_START_MONTH: u32 = 3;
/// February days after this are offseason rather than postseason.
const POSTSEASON_END_DAY: u32 = 15;
/// Weeks 1 through this are the regular season.
pub const REGULAR_SEASON_WEEKS: u8 = 18;
/// The Super Bowl lands around this week number.
const FINAL_WEEK: u8 = 22;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeasonPhase {
    Preseason,
    Regular,
    Postseason,
    Offseason,
}

/// A (season, week) pair with its phase. Week 0 means season-level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonPeriod {
    pub year: i32,
    pub week: u8,
    pub phase: SeasonPhase,
}

/// Pure eligibility verdict, consumed immediately by the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EligibilityDecision {
    pub allowed: bool,
    pub reason: Option<&'static str>,
}

impl EligibilityDecision {
    fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    fn deny(reason: &'static str) -> Self {
        Self {
            allowed: false,
            reason: Some(reason),
        }
    }
}

/// The season period that `now` falls in.
pub fn current_period(now: DateTime<Utc>) -> SeasonPeriod {
    period_for(now)
}

/// Classifies an arbitrary date into its season period.
pub fn period_for(date: DateTime<Utc>) -> SeasonPeriod {
    let year = date.year();
    let month = date.month();
    let day = date.day();

    // March-August: offseason of the current calendar year.
    if (OFFSEASON_START_MONTH..SEASON_START_MONTH).contains(&month) {
        return SeasonPeriod {
            year,
            week: 0,
            phase: SeasonPhase::Offseason,
        };
    }

    // January/February belong to the previous calendar year's season.
    let season_year = if month >= SEASON_START_MONTH {
        year
    } else {
        year - 1
    };

    if month == SEASON_START_MONTH && day < PRESEASON_CUTOFF_DAY {
        return SeasonPeriod {
            year: season_year,
            week: 0,
            phase: SeasonPhase::Preseason,
        };
    }

    if month == 2 && day > POSTSEASON_END_DAY {
        return SeasonPeriod {
            year: season_year,
            week: 0,
            phase: SeasonPhase::Offseason,
        };
    }

    if month == 2 {
        // Super Bowl window.
        return SeasonPeriod {
            year: season_year,
            week: FINAL_WEEK,
            phase: SeasonPhase::Postseason,
        };
    }

    let week = week_for(season_year, date);
    let phase = if week <= REGULAR_SEASON_WEEKS {
        SeasonPhase::Regular
    } else {
        SeasonPhase::Postseason
    };

    SeasonPeriod {
        year: season_year,
        week,
        phase,
    }
}

/// Decides whether an on-demand fetch for `requested` is permitted at `now`.
///
/// Only the current or immediately preceding season is fetchable on demand;
/// deeper history belongs to a bulk-import path. Regular-season weeks must be
/// in `[1, REGULAR_SEASON_WEEKS]`.
pub fn is_fetch_allowed(requested: &SeasonPeriod, now: DateTime<Utc>) -> EligibilityDecision {
    if requested.phase == SeasonPhase::Regular
        && !(1..=REGULAR_SEASON_WEEKS).contains(&requested.week)
    {
        return EligibilityDecision::deny("week out of range");
    }

    is_season_in_window(requested.year, now)
}

/// The season-year subset of the eligibility rule, for season-level fetches
/// that carry no week.
pub fn is_season_in_window(season: i32, now: DateTime<Utc>) -> EligibilityDecision {
    let current = current_period(now);

    if season > current.year {
        return EligibilityDecision::deny("season too far ahead");
    }

    if season < current.year - 1 {
        return EligibilityDecision::deny("season too far in the past");
    }

    EligibilityDecision::allow()
}

/// Week number within a season, counted in 7-day steps from the first
/// Thursday of September, clamped to `[1, FINAL_WEEK]`.
fn week_for(season_year: i32, date: DateTime<Utc>) -> u8 {
    let season_start = first_thursday_of_september(season_year);
    let days_since_start = (date.date_naive() - season_start).num_days();
    let week = days_since_start.div_euclid(7) + 1;

    week.clamp(1, FINAL_WEEK as i64) as u8
}

fn first_thursday_of_september(season_year: i32) -> NaiveDate {
    let mut day = NaiveDate::from_ymd_opt(season_year, SEASON_START_MONTH, 1)
        .unwrap_or_else(|| panic!("invalid season start date for year {season_year}"));

    while day.weekday() != Weekday::Thu {
        day += Duration::days(1);
    }

    day
}
