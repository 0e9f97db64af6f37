use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: Uuid,
    pub user_low_id: String,
    pub user_high_id: String,
    pub created_at: DateTime<Utc>,
}

impl Match {
    /// The other party of the match, from `user_id`'s point of view.
    pub fn counterpart(&self, user_id: &str) -> &str {
        if self.user_low_id == user_id {
            &self.user_high_id
        } else {
            &self.user_low_id
        }
    }
}

/// Canonical (low, high) ordering of two user ids so that an undirected pair
/// always maps to the same stored row.
pub fn ordered_pair<'a>(first: &'a str, second: &'a str) -> (&'a str, &'a str) {
    if first < second {
        (first, second)
    } else {
        (second, first)
    }
}
