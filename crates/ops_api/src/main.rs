use sqlx::postgres::PgPoolOptions;

use ops_api::{routes::app_router, AppState};
use ops_service::config::Config;
use ops_service::OpsService;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("startup aborted: {err}");
            std::process::exit(1);
        }
    };

    let pool = match PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
    {
        Ok(pool) => pool,
        Err(err) => {
            tracing::error!("database connection failed: {err}");
            std::process::exit(1);
        }
    };

    let state = AppState {
        service: OpsService::new(pool),
        api_key: config.api_key,
    };

    let listener = match tokio::net::TcpListener::bind("0.0.0.0:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("bind failed: {err}");
            std::process::exit(1);
        }
    };
    tracing::info!("listening on 0.0.0.0:3000");

    if let Err(err) = axum::serve(listener, app_router(state)).await {
        tracing::error!("server exited: {err}");
        std::process::exit(1);
    }
}
