use tracing_subscriber::EnvFilter;

use gridiron::server::{
    config::Config, model::app::AppState, router, service::sync::orchestrator::SyncOrchestrator,
    startup,
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let espn = startup::build_espn_client(&config).expect("Failed to build ESPN client");
    let db = startup::connect_to_database(&config)
        .await
        .expect("Failed to connect to database");
    let cache = startup::connect_to_cache(&config)
        .await
        .expect("Failed to connect to Valkey");

    let sync = SyncOrchestrator::new(db.clone(), espn.clone(), cache.clone());
    let state = AppState {
        db,
        espn,
        cache,
        sync,
    };

    tracing::info!("Starting server on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind listen address");

    let app = router::routes().with_state(state);

    axum::serve(listener, app)
        .await
        .expect("Server exited with an error");
}
