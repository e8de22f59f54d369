use tracing_subscriber::EnvFilter;

use skinscope::api::{start_server, AppState};
use skinscope::config::{self, Config};

#[tokio::main]
async fn main() {
    // .env is optional; real environments set variables directly.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        strategy = %config.strategy,
        addr = %config.bind_addr,
        locale = %config.locale,
        "Configuration loaded"
    );

    let state = match AppState::from_config(&config) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    let mut server = match start_server(state, config.bind_addr).await {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
    server.shutdown();
}
