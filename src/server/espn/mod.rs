//! ESPN site API client.
//!
//! Thin reqwest wrapper over the handful of NFL endpoints the sync layer
//! consumes. The base URL is overridable so tests can point the client at a
//! mock server. Retry policy deliberately lives with callers; a failed request
//! surfaces as an [`EspnError`] and is made exactly once.

pub mod model;

use serde::de::DeserializeOwned;

use crate::server::error::espn::EspnError;

const NFL_SITE_PATH: &str = "/apis/site/v2/sports/football/nfl";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Regular season `seasontype` value in ESPN query parameters.
const SEASON_TYPE_REGULAR: u8 = 2;

#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

pub struct ClientBuilder {
    base_url: String,
    user_agent: String,
    timeout_secs: u64,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder {
            base_url: crate::server::config::DEFAULT_ESPN_BASE_URL.to_string(),
            user_agent: crate::server::config::DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Fetch the scoreboard for one regular-season week.
    pub async fn fetch_games(
        &self,
        season: i32,
        week: u8,
    ) -> Result<model::ScoreboardResponse, EspnError> {
        self.get_json(
            &format!("{NFL_SITE_PATH}/scoreboard"),
            &[
                ("dates", season.to_string()),
                ("seasontype", SEASON_TYPE_REGULAR.to_string()),
                ("week", week.to_string()),
            ],
        )
        .await
    }

    /// Fetch the scoreboard for a whole season.
    pub async fn fetch_season_games(
        &self,
        season: i32,
    ) -> Result<model::ScoreboardResponse, EspnError> {
        self.get_json(
            &format!("{NFL_SITE_PATH}/scoreboard"),
            &[
                ("dates", season.to_string()),
                ("seasontype", SEASON_TYPE_REGULAR.to_string()),
            ],
        )
        .await
    }

    pub async fn fetch_all_teams(&self) -> Result<model::TeamsResponse, EspnError> {
        self.get_json(&format!("{NFL_SITE_PATH}/teams"), &[]).await
    }

    pub async fn fetch_team_roster(
        &self,
        team_id: i64,
    ) -> Result<model::RosterResponse, EspnError> {
        self.get_json(&format!("{NFL_SITE_PATH}/teams/{team_id}/roster"), &[])
            .await
    }

    pub async fn fetch_game_stats(
        &self,
        game_id: i64,
    ) -> Result<model::SummaryResponse, EspnError> {
        self.get_json(
            &format!("{NFL_SITE_PATH}/summary"),
            &[("event", game_id.to_string())],
        )
        .await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, EspnError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|source| EspnError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(EspnError::Status { status, url });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| EspnError::Parse { url, source })
    }
}

impl ClientBuilder {
    pub fn base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    pub fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn build(self) -> Result<Client, EspnError> {
        let http = reqwest::Client::builder()
            .user_agent(&self.user_agent)
            .timeout(std::time::Duration::from_secs(self.timeout_secs))
            .build()
            .map_err(|source| EspnError::Request {
                url: self.base_url.clone(),
                source,
            })?;

        Ok(Client {
            http,
            base_url: self.base_url,
        })
    }
}
