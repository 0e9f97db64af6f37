use meet::{AppState, Config, create_router, db::DatabaseConfig, get_db_pool, utils};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    utils::init_logging();

    let config = Config::from_env()?;
    let db_config = DatabaseConfig {
        database_url: config.database_url.clone(),
        max_connections: config.db_max_connections,
    };
    let pool = get_db_pool(&db_config).await?;

    // Run migrations
    meet::db::migrations::run_migrations(&pool).await?;

    let port = config.port;
    let app = create_router(AppState::new(pool, config));

    let listener = tokio::net::TcpListener::bind(&format!("0.0.0.0:{}", port)).await?;
    tracing::info!("Server running on port {}", port);

    axum::serve(listener, app).await?;

    Ok(())
}
