use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::MeetResult, models::Card, utils::{CallerId, QueryParams}};

#[derive(Debug, Deserialize)]
pub struct BrowseQuery {
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct BrowseResponse {
    pub cards: Vec<Card>,
}

pub async fn browse_cards(
    QueryParams(params): QueryParams<BrowseQuery>,
    State(state): State<AppState>,
    CallerId(user_id): CallerId,
) -> MeetResult<Json<BrowseResponse>> {
    let cards = state
        .meet
        .browse(&user_id, params.city.as_deref(), params.limit)
        .await?;

    Ok(Json(BrowseResponse { cards }))
}
