use clap::Parser;
use meet::db::{get_db_pool, DatabaseConfig};
use meet::utils;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "migrate", about = "Apply Meet database migrations")]
struct Args {
    /// Database to migrate; defaults to DATABASE_URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    utils::init_logging();
    let args = Args::parse();

    let database_url = match args.database_url {
        Some(database_url) => database_url,
        None => DatabaseConfig::from_env()?.database_url,
    };
    let db_config = DatabaseConfig {
        database_url,
        max_connections: 1,
    };
    let pool = get_db_pool(&db_config).await?;

    info!("Running database migrations...");
    meet::db::migrations::run_migrations(&pool).await?;
    info!("Migrations completed successfully!");

    Ok(())
}
