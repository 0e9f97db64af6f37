use axum::{extract::{Path, State}, response::Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AppState, error::{MeetError, MeetResult}, models::{LikeRequest, Match}, utils::{CallerId, JsonBody}};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeBody {
    pub to_user_id: Option<String>,
}

/// Unknown and malformed ids are indistinguishable to the caller.
fn parse_request_id(raw: &str) -> MeetResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| MeetError::not_found("Request not found."))
}

#[derive(Debug, Serialize)]
pub struct RequestResponse {
    pub ok: bool,
    pub request: LikeRequest,
}

#[derive(Debug, Serialize)]
pub struct AcceptResponse {
    pub ok: bool,
    pub request: LikeRequest,
    #[serde(rename = "match")]
    pub matched: Match,
}

pub async fn like_user(
    State(state): State<AppState>,
    CallerId(user_id): CallerId,
    JsonBody(body): JsonBody<LikeBody>,
) -> MeetResult<Json<RequestResponse>> {
    let request = state.meet.like(&user_id, body.to_user_id.as_deref()).await?;
    Ok(Json(RequestResponse { ok: true, request }))
}

pub async fn accept_request(
    State(state): State<AppState>,
    CallerId(user_id): CallerId,
    Path(request_id): Path<String>,
) -> MeetResult<Json<AcceptResponse>> {
    let accepted = state.meet.accept(parse_request_id(&request_id)?, &user_id).await?;
    Ok(Json(AcceptResponse {
        ok: true,
        request: accepted.request,
        matched: accepted.matched,
    }))
}

pub async fn reject_request(
    State(state): State<AppState>,
    CallerId(user_id): CallerId,
    Path(request_id): Path<String>,
) -> MeetResult<Json<RequestResponse>> {
    let request = state.meet.reject(parse_request_id(&request_id)?, &user_id).await?;
    Ok(Json(RequestResponse { ok: true, request }))
}
