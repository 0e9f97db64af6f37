use sqlx::SqlitePool;

use crate::constants::MIN_MEET_AGE;
use crate::db::cards::CARD_COLUMNS;
use crate::error::MeetResult;
use crate::models::Card;

/// Candidate cards for `viewer`, newest updates first.
///
/// Excluded: the viewer, anyone with a like request to or from the viewer,
/// anyone the viewer passed, anyone blocked in either direction, and cards
/// that are inactive, unconfirmed or underage. Gender preference must hold
/// both ways, with `other` matching any preference.
pub async fn browse_candidates(
    pool: &SqlitePool,
    viewer: &Card,
    city: Option<&str>,
    limit: i64,
) -> MeetResult<Vec<Card>> {
    let cards = sqlx::query_as::<_, Card>(&format!(
        r#"
        SELECT {CARD_COLUMNS}
        FROM meet_cards c
        WHERE c.user_id <> ?1
          AND c.is_active = TRUE
          AND c.is_adult_confirmed = TRUE
          AND c.age >= ?2
          AND NOT EXISTS (
              SELECT 1 FROM meet_like_requests r
              WHERE (r.from_user_id = ?1 AND r.to_user_id = c.user_id)
                 OR (r.from_user_id = c.user_id AND r.to_user_id = ?1)
          )
          AND NOT EXISTS (
              SELECT 1 FROM meet_passes p
              WHERE p.from_user_id = ?1 AND p.to_user_id = c.user_id
          )
          AND NOT EXISTS (
              SELECT 1 FROM meet_blocks b
              WHERE (b.blocker_user_id = ?1 AND b.blocked_user_id = c.user_id)
                 OR (b.blocker_user_id = c.user_id AND b.blocked_user_id = ?1)
          )
          AND (?3 = 'any' OR c.gender = ?3 OR c.gender = 'other')
          AND (c.looking_for = 'any' OR c.looking_for = ?4 OR ?4 = 'other')
          AND (?5 IS NULL OR instr(lower(c.city), lower(?5)) > 0)
        ORDER BY c.updated_at DESC
        LIMIT ?6
        "#
    ))
    .bind(&viewer.user_id)
    .bind(MIN_MEET_AGE)
    .bind(viewer.looking_for.as_str())
    .bind(viewer.gender.as_str())
    .bind(city)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(cards)
}
