use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool, types::Json};
use uuid::Uuid;

use crate::error::MeetResult;
use crate::models::{NewNotification, Notification};

const NOTIFICATION_COLUMNS: &str = "id, user_id, kind, payload, created_at";

pub async fn insert_notifications(
    conn: &mut SqliteConnection,
    notifications: &[NewNotification],
) -> MeetResult<Vec<Notification>> {
    let now = Utc::now();
    let mut inserted = Vec::with_capacity(notifications.len());

    for notification in notifications {
        let row = sqlx::query_as::<_, Notification>(&format!(
            r#"
            INSERT INTO meet_notifications (id, user_id, kind, payload, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING {NOTIFICATION_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&notification.user_id)
        .bind(notification.kind)
        .bind(Json(&notification.payload))
        .bind(now)
        .fetch_one(&mut *conn)
        .await?;

        inserted.push(row);
    }

    Ok(inserted)
}

pub async fn list_notifications(pool: &SqlitePool, user_id: &str, limit: i64) -> MeetResult<Vec<Notification>> {
    let notifications = sqlx::query_as::<_, Notification>(&format!(
        r#"
        SELECT {NOTIFICATION_COLUMNS}
        FROM meet_notifications
        WHERE user_id = ?1
        ORDER BY created_at DESC
        LIMIT ?2
        "#
    ))
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(notifications)
}
