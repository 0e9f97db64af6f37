use axum::{extract::State, http::StatusCode, response::Json};
use serde::Serialize;

use crate::{AppState, error::MeetResult, models::{Card, CardPayload}, utils::{CallerId, JsonBody}};

#[derive(Debug, Serialize)]
pub struct CardResponse {
    pub card: Option<Card>,
}

pub async fn get_card(
    State(state): State<AppState>,
    CallerId(user_id): CallerId,
) -> MeetResult<Json<CardResponse>> {
    let card = state.meet.get_card(&user_id).await?;
    Ok(Json(CardResponse { card }))
}

/// Creates the caller's card, or replaces it wholesale.
pub async fn upsert_card(
    State(state): State<AppState>,
    CallerId(user_id): CallerId,
    JsonBody(payload): JsonBody<CardPayload>,
) -> MeetResult<(StatusCode, Json<CardResponse>)> {
    let write = state.meet.upsert_card(&user_id, &payload).await?;
    let status = if write.created { StatusCode::CREATED } else { StatusCode::OK };

    Ok((status, Json(CardResponse { card: Some(write.card) })))
}

pub async fn update_card(
    State(state): State<AppState>,
    CallerId(user_id): CallerId,
    JsonBody(payload): JsonBody<CardPayload>,
) -> MeetResult<Json<CardResponse>> {
    let card = state.meet.update_card(&user_id, &payload).await?;
    Ok(Json(CardResponse { card: Some(card) }))
}
