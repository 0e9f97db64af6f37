use chrono::Utc;
use sqlx::{SqliteExecutor, SqlitePool};
use uuid::Uuid;

use crate::error::MeetResult;
use crate::models::Report;

/// Records a block. Returns false when the block already existed.
pub async fn insert_block(pool: &SqlitePool, blocker_user_id: &str, blocked_user_id: &str) -> MeetResult<bool> {
    let result = sqlx::query(
        r#"
        INSERT INTO meet_blocks (blocker_user_id, blocked_user_id, created_at)
        VALUES (?1, ?2, ?3)
        ON CONFLICT (blocker_user_id, blocked_user_id) DO NOTHING
        "#,
    )
    .bind(blocker_user_id)
    .bind(blocked_user_id)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Whether either user has blocked the other.
pub async fn is_blocked_between<'e, E>(executor: E, user_a: &str, user_b: &str) -> MeetResult<bool>
where
    E: SqliteExecutor<'e>,
{
    let blocked = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM meet_blocks
            WHERE (blocker_user_id = ?1 AND blocked_user_id = ?2)
               OR (blocker_user_id = ?2 AND blocked_user_id = ?1)
        )
        "#,
    )
    .bind(user_a)
    .bind(user_b)
    .fetch_one(executor)
    .await?;

    Ok(blocked)
}

/// Records a pass. Returns false when the pass already existed.
pub async fn insert_pass(pool: &SqlitePool, from_user_id: &str, to_user_id: &str) -> MeetResult<bool> {
    let result = sqlx::query(
        r#"
        INSERT INTO meet_passes (from_user_id, to_user_id, created_at)
        VALUES (?1, ?2, ?3)
        ON CONFLICT (from_user_id, to_user_id) DO NOTHING
        "#,
    )
    .bind(from_user_id)
    .bind(to_user_id)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn insert_report(
    pool: &SqlitePool,
    reporter_user_id: &str,
    reported_user_id: &str,
    reason: &str,
) -> MeetResult<Report> {
    let report = sqlx::query_as::<_, Report>(
        r#"
        INSERT INTO meet_reports (id, reporter_user_id, reported_user_id, reason, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        RETURNING id, reporter_user_id, reported_user_id, reason, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(reporter_user_id)
    .bind(reported_user_id)
    .bind(reason)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(report)
}

/// Records a follow. Returns false when already following.
pub async fn insert_follow(pool: &SqlitePool, from_user_id: &str, to_user_id: &str) -> MeetResult<bool> {
    let result = sqlx::query(
        r#"
        INSERT INTO meet_follows (from_user_id, to_user_id, created_at)
        VALUES (?1, ?2, ?3)
        ON CONFLICT (from_user_id, to_user_id) DO NOTHING
        "#,
    )
    .bind(from_user_id)
    .bind(to_user_id)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_follow(pool: &SqlitePool, from_user_id: &str, to_user_id: &str) -> MeetResult<u64> {
    let result = sqlx::query(
        r#"
        DELETE FROM meet_follows
        WHERE from_user_id = ?1 AND to_user_id = ?2
        "#,
    )
    .bind(from_user_id)
    .bind(to_user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
