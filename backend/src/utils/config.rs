use anyhow::Result;
use std::env;
use crate::constants::{DEFAULT_DB_MAX_CONNECTIONS, DEFAULT_SERVER_PORT, SWIPE_RATE_LIMIT_PER_MINUTE};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub db_max_connections: u32,
    pub swipe_rate_limit_per_minute: u32,
    /// `None` means any origin is allowed.
    pub allowed_origins: Option<Vec<String>>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_SERVER_PORT.to_string())
                .parse()
                .unwrap_or(DEFAULT_SERVER_PORT),
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| DEFAULT_DB_MAX_CONNECTIONS.to_string())
                .parse()
                .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS),
            swipe_rate_limit_per_minute: env::var("SWIPE_RATE_LIMIT_PER_MINUTE")
                .unwrap_or_else(|_| SWIPE_RATE_LIMIT_PER_MINUTE.to_string())
                .parse()
                .unwrap_or(SWIPE_RATE_LIMIT_PER_MINUTE),
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .ok()
                .map(|origins| parse_origins(&origins))
                .filter(|origins| !origins.is_empty()),
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
