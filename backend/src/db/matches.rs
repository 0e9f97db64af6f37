use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

use crate::error::MeetResult;
use crate::models::{Match, ordered_pair};

/// Returns the match for the unordered pair, creating it on first use.
pub async fn upsert_match(conn: &mut SqliteConnection, user_a: &str, user_b: &str) -> MeetResult<Match> {
    let (low, high) = ordered_pair(user_a, user_b);

    sqlx::query(
        r#"
        INSERT INTO meet_matches (id, user_low_id, user_high_id, created_at)
        VALUES (?1, ?2, ?3, ?4)
        ON CONFLICT (user_low_id, user_high_id) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(low)
    .bind(high)
    .bind(Utc::now())
    .execute(&mut *conn)
    .await?;

    let found = sqlx::query_as::<_, Match>(
        r#"
        SELECT id, user_low_id, user_high_id, created_at
        FROM meet_matches
        WHERE user_low_id = ?1 AND user_high_id = ?2
        "#,
    )
    .bind(low)
    .bind(high)
    .fetch_one(&mut *conn)
    .await?;

    Ok(found)
}

pub async fn list_matches_for_user(pool: &SqlitePool, user_id: &str) -> MeetResult<Vec<Match>> {
    let matches = sqlx::query_as::<_, Match>(
        r#"
        SELECT id, user_low_id, user_high_id, created_at
        FROM meet_matches
        WHERE user_low_id = ?1 OR user_high_id = ?1
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(matches)
}
