use chrono::Utc;
use sqlx::{SqliteExecutor, SqlitePool};
use uuid::Uuid;

use crate::error::MeetResult;
use crate::models::{LikeRequest, RequestStatus};

const REQUEST_COLUMNS: &str = "id, from_user_id, to_user_id, status, created_at, updated_at";

/// Inserts a pending request, or resets an existing one for the same
/// direction back to pending. The request id survives a reset.
pub async fn upsert_like_request<'e, E>(
    executor: E,
    from_user_id: &str,
    to_user_id: &str,
) -> MeetResult<LikeRequest>
where
    E: SqliteExecutor<'e>,
{
    let request = sqlx::query_as::<_, LikeRequest>(&format!(
        r#"
        INSERT INTO meet_like_requests (id, from_user_id, to_user_id, status, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?5)
        ON CONFLICT (from_user_id, to_user_id) DO UPDATE SET
            status = excluded.status,
            updated_at = excluded.updated_at
        RETURNING {REQUEST_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(from_user_id)
    .bind(to_user_id)
    .bind(RequestStatus::Pending)
    .bind(Utc::now())
    .fetch_one(executor)
    .await?;

    Ok(request)
}

/// Moves a pending request addressed to `recipient_id` into `status`.
/// Returns `None` when no such pending request exists, which is how the
/// loser of a concurrent transition finds out.
pub async fn claim_pending<'e, E>(
    executor: E,
    request_id: Uuid,
    recipient_id: &str,
    status: RequestStatus,
) -> MeetResult<Option<LikeRequest>>
where
    E: SqliteExecutor<'e>,
{
    let request = sqlx::query_as::<_, LikeRequest>(&format!(
        r#"
        UPDATE meet_like_requests
        SET status = ?1, updated_at = ?2
        WHERE id = ?3 AND to_user_id = ?4 AND status = ?5
        RETURNING {REQUEST_COLUMNS}
        "#
    ))
    .bind(status)
    .bind(Utc::now())
    .bind(request_id)
    .bind(recipient_id)
    .bind(RequestStatus::Pending)
    .fetch_optional(executor)
    .await?;

    Ok(request)
}

pub async fn find_request<'e, E>(executor: E, request_id: Uuid) -> MeetResult<Option<LikeRequest>>
where
    E: SqliteExecutor<'e>,
{
    let request = sqlx::query_as::<_, LikeRequest>(&format!(
        "SELECT {REQUEST_COLUMNS} FROM meet_like_requests WHERE id = ?1"
    ))
    .bind(request_id)
    .fetch_optional(executor)
    .await?;

    Ok(request)
}

pub async fn list_incoming_pending(pool: &SqlitePool, user_id: &str) -> MeetResult<Vec<LikeRequest>> {
    let requests = sqlx::query_as::<_, LikeRequest>(&format!(
        r#"
        SELECT {REQUEST_COLUMNS}
        FROM meet_like_requests
        WHERE to_user_id = ?1 AND status = ?2
        ORDER BY created_at DESC
        "#
    ))
    .bind(user_id)
    .bind(RequestStatus::Pending)
    .fetch_all(pool)
    .await?;

    Ok(requests)
}

pub async fn list_outgoing(pool: &SqlitePool, user_id: &str, limit: i64) -> MeetResult<Vec<LikeRequest>> {
    let requests = sqlx::query_as::<_, LikeRequest>(&format!(
        r#"
        SELECT {REQUEST_COLUMNS}
        FROM meet_like_requests
        WHERE from_user_id = ?1
        ORDER BY updated_at DESC
        LIMIT ?2
        "#
    ))
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(requests)
}
