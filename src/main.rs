use sqlx::postgres::PgPoolOptions;

use retail_api::config::AppConfig;
use retail_api::repository::PgProductRepository;
use retail_api::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    retail_api::init_tracing();

    let config = AppConfig::load()?;

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("database migrations applied");

    let state = AppState::new(PgProductRepository::new(pool.clone()));
    let app = retail_api::app_router(state, retail_api::default_openapi_config());

    let addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("server running on http://{addr}");
    tracing::info!("api docs available at http://{addr}/api-docs");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to install ctrl-c handler");
        return;
    }
    tracing::info!("shutdown signal received");
}
