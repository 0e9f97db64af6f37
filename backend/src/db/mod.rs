pub mod browse;
pub mod cards;
pub mod connection;
pub mod matches;
pub mod migrations;
pub mod notifications;
pub mod requests;
pub mod social;

#[cfg(test)]
pub(crate) mod testing;

pub use connection::{get_db_pool, DatabaseConfig};
