use axum::{extract::State, response::Json};

use crate::{AppState, error::MeetResult, models::Inbox, utils::CallerId};

pub async fn get_inbox(
    State(state): State<AppState>,
    CallerId(user_id): CallerId,
) -> MeetResult<Json<Inbox>> {
    Ok(Json(state.meet.inbox(&user_id).await?))
}
