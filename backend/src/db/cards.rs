use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqliteExecutor, SqlitePool, types::Json};
use std::collections::HashMap;

use crate::error::MeetResult;
use crate::models::{Card, CardPatch, CardSummary, NewCard};

pub(crate) const CARD_COLUMNS: &str = r#"
    user_id, display_name, age, city, gender, looking_for, intent_tags, bio, image_url,
    is_adult_confirmed, adult_confirmed_at, is_active, created_at, updated_at
"#;

pub async fn get_card<'e, E>(executor: E, user_id: &str) -> MeetResult<Option<Card>>
where
    E: SqliteExecutor<'e>,
{
    let card = sqlx::query_as::<_, Card>(&format!(
        "SELECT {CARD_COLUMNS} FROM meet_cards WHERE user_id = ?1"
    ))
    .bind(user_id)
    .fetch_optional(executor)
    .await?;

    Ok(card)
}

/// Creates or replaces the owner's card. Replacing re-activates the card and
/// keeps the original adult confirmation timestamp.
pub async fn upsert_card(pool: &SqlitePool, user_id: &str, card: &NewCard) -> MeetResult<Card> {
    let now = Utc::now();

    let card = sqlx::query_as::<_, Card>(&format!(
        r#"
        INSERT INTO meet_cards (
            user_id, display_name, age, city, gender, looking_for, intent_tags, bio, image_url,
            is_adult_confirmed, adult_confirmed_at, is_active, created_at, updated_at
        )
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, TRUE, ?10, TRUE, ?10, ?10)
        ON CONFLICT (user_id) DO UPDATE SET
            display_name = excluded.display_name,
            age = excluded.age,
            city = excluded.city,
            gender = excluded.gender,
            looking_for = excluded.looking_for,
            intent_tags = excluded.intent_tags,
            bio = excluded.bio,
            image_url = excluded.image_url,
            is_adult_confirmed = TRUE,
            adult_confirmed_at = COALESCE(meet_cards.adult_confirmed_at, excluded.adult_confirmed_at),
            is_active = TRUE,
            updated_at = excluded.updated_at
        RETURNING {CARD_COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(&card.display_name)
    .bind(card.age)
    .bind(&card.city)
    .bind(card.gender)
    .bind(card.looking_for)
    .bind(Json(&card.intent_tags))
    .bind(&card.bio)
    .bind(&card.image_url)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(card)
}

/// Applies an owner's patch. Returns `None` when the owner has no card.
pub async fn update_card(
    pool: &SqlitePool,
    user_id: &str,
    patch: &CardPatch,
) -> MeetResult<Option<Card>> {
    let (bio_supplied, bio) = match &patch.bio {
        Some(bio) => (true, bio.clone()),
        None => (false, None),
    };

    let card = sqlx::query_as::<_, Card>(&format!(
        r#"
        UPDATE meet_cards SET
            display_name = COALESCE(?2, display_name),
            age = COALESCE(?3, age),
            city = COALESCE(?4, city),
            gender = COALESCE(?5, gender),
            looking_for = COALESCE(?6, looking_for),
            intent_tags = COALESCE(?7, intent_tags),
            bio = CASE WHEN ?8 THEN ?9 ELSE bio END,
            image_url = COALESCE(?10, image_url),
            is_active = COALESCE(?11, is_active),
            updated_at = ?12
        WHERE user_id = ?1
        RETURNING {CARD_COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(&patch.display_name)
    .bind(patch.age)
    .bind(&patch.city)
    .bind(patch.gender)
    .bind(patch.looking_for)
    .bind(patch.intent_tags.as_ref().map(Json))
    .bind(bio_supplied)
    .bind(bio)
    .bind(&patch.image_url)
    .bind(patch.is_active)
    .bind(Utc::now())
    .fetch_optional(pool)
    .await?;

    Ok(card)
}

/// Summaries for the given users, keyed by user id. Users without a card are
/// absent from the map.
pub async fn get_card_summaries(
    pool: &SqlitePool,
    user_ids: &[String],
) -> MeetResult<HashMap<String, CardSummary>> {
    if user_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let mut builder = QueryBuilder::<Sqlite>::new(
        "SELECT user_id, display_name, age, city, image_url FROM meet_cards WHERE user_id IN (",
    );
    let mut separated = builder.separated(", ");
    for user_id in user_ids {
        separated.push_bind(user_id);
    }
    separated.push_unseparated(")");

    let summaries = builder
        .build_query_as::<CardSummary>()
        .fetch_all(pool)
        .await?;

    Ok(summaries
        .into_iter()
        .map(|summary| (summary.user_id.clone(), summary))
        .collect())
}
