use sea_orm::DatabaseConnection;

use crate::server::{cache::Cache, espn, service::sync::orchestrator::SyncOrchestrator};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub espn: espn::Client,
    pub cache: Cache,
    pub sync: SyncOrchestrator,
}
