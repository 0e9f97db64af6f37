use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use tempfile::TempDir;

use super::connection::{DatabaseConfig, get_db_pool};
use crate::models::{Card, Gender, LookingFor, NewCard};

pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    super::migrations::run_migrations(&pool).await.unwrap();
    pool
}

/// WAL database file with several connections, for tests that need
/// transactions to actually overlap.
pub async fn file_pool(dir: &TempDir, max_connections: u32) -> SqlitePool {
    let config = DatabaseConfig {
        database_url: format!("sqlite://{}", dir.path().join("meet.db").display()),
        max_connections,
    };
    let pool = get_db_pool(&config).await.unwrap();
    super::migrations::run_migrations(&pool).await.unwrap();
    pool
}

pub fn new_card(name: &str, age: i64, city: &str, gender: Gender, looking_for: LookingFor) -> NewCard {
    NewCard {
        display_name: name.to_string(),
        age,
        city: city.to_string(),
        gender,
        looking_for,
        intent_tags: vec!["coffee".to_string()],
        bio: None,
        image_url: format!("https://cdn.example/{}.jpg", name.to_lowercase()),
    }
}

pub async fn seed_card(
    pool: &SqlitePool,
    user_id: &str,
    gender: Gender,
    looking_for: LookingFor,
    city: &str,
) -> Card {
    let card = new_card(user_id, 25, city, gender, looking_for);
    super::cards::upsert_card(pool, user_id, &card).await.unwrap()
}

/// Writes an age directly, bypassing card validation.
pub async fn force_age(pool: &SqlitePool, user_id: &str, age: i64) {
    sqlx::query("UPDATE meet_cards SET age = ?1 WHERE user_id = ?2")
        .bind(age)
        .bind(user_id)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}
