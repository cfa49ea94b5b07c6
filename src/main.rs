use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use verifypro::api::portal_router;
use verifypro::config;
use verifypro::state::AppState;
use verifypro::store;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    std::fs::create_dir_all(config::app_data_dir())?;
    let conn = store::open_store(&config::store_path())?;

    let state = Arc::new(AppState::with_simulators(conn));
    let router = portal_router(state);

    let listener = tokio::net::TcpListener::bind(config::DEFAULT_BIND_ADDR).await?;
    tracing::info!("Portal listening on http://{}", config::DEFAULT_BIND_ADDR);
    axum::serve(listener, router).await?;

    Ok(())
}
