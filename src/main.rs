//! Stores API server

use stores_api::build_state;
use stores_api::config::{load_config, print_config, AppConfig};
use stores_api::infrastructure::auth::generate_secret;
use stores_api::infrastructure::http::HttpServer;
use stores_api::infrastructure::persistence::sqlite::{create_pool, run_migrations, DatabaseConfig};
use tracing_subscriber::EnvFilter;

fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},stores_api={},tower_http=debug,sqlx=warn",
        config.log.level, config.log.level
    );
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // env > config file > defaults
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Stores API");
    print_config(&config);

    let jwt_secret = if config.auth.jwt_secret.is_empty() {
        tracing::warn!("No JWT secret configured; tokens will not survive a restart");
        generate_secret()
    } else {
        config.auth.jwt_secret.clone()
    };

    let pool = create_pool(&DatabaseConfig::from(&config.database)).await?;
    run_migrations(&pool).await?;

    let state = build_state(&pool, &jwt_secret, config.auth.access_token_expiry_secs);
    let server = HttpServer::new(config.server.clone(), state);

    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    pool.close().await;
    tracing::info!("Server shutdown complete");

    Ok(())
}
