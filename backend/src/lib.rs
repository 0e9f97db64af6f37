pub mod models;
pub mod db;
pub mod services;
pub mod handlers;
pub mod utils;
pub mod constants;
pub mod error;
pub mod routes;

pub use utils::config::Config;
pub use db::connection::get_db_pool;
pub use error::{MeetError, MeetResult};
pub use routes::create_router;

// Re-export common types
pub use sqlx::SqlitePool;
pub use anyhow::Result;
pub use uuid::Uuid;
pub use chrono::{DateTime, Utc};

use services::MeetService;

#[derive(Clone)]
pub struct AppState {
    pub meet: MeetService,
    pub config: Config,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: Config) -> Self {
        Self {
            meet: MeetService::new(pool, config.swipe_rate_limit_per_minute),
            config,
        }
    }
}
