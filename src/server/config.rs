use crate::server::error::config::ConfigError;

/// Default ESPN site API host, overridable for tests via `ESPN_BASE_URL`.
pub static DEFAULT_ESPN_BASE_URL: &str = "https://site.api.espn.com";
pub static DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub static DEFAULT_USER_AGENT: &str = "Gridiron/1.0";

pub struct Config {
    pub database_url: String,
    /// When unset the cache layer runs disabled and every cache call is a no-op.
    pub valkey_url: Option<String>,
    pub bind_addr: String,
    pub espn_base_url: String,
    pub user_agent: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_url: require_var("DATABASE_URL")?,
            valkey_url: std::env::var("VALKEY_URL").ok(),
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            espn_base_url: std::env::var("ESPN_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_ESPN_BASE_URL.to_string()),
            user_agent: std::env::var("USER_AGENT")
                .unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()),
        })
    }
}

fn require_var(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}
