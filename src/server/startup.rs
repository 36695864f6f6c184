use crate::server::{cache::Cache, config::Config, error::Error, espn};

/// Build and configure the ESPN client from config
pub fn build_espn_client(config: &Config) -> Result<espn::Client, Error> {
    let espn_client = espn::Client::builder()
        .base_url(&config.espn_base_url)
        .user_agent(&config.user_agent)
        .build()?;

    Ok(espn_client)
}

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Connect to Valkey for caching; a missing `VALKEY_URL` yields a disabled
/// cache rather than an error.
pub async fn connect_to_cache(config: &Config) -> Result<Cache, Error> {
    use fred::prelude::*;

    let Some(valkey_url) = config.valkey_url.as_deref() else {
        tracing::info!("VALKEY_URL not set, running with cache disabled");
        return Ok(Cache::disabled());
    };

    let valkey_config = fred::prelude::Config::from_url(valkey_url)?;
    let pool = Pool::new(valkey_config, None, None, None, 6)?;

    pool.connect();
    pool.wait_for_connect().await?;

    Ok(Cache::new(pool))
}
