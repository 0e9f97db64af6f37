use axum::{extract::{Path, State}, response::Json};
use serde::Deserialize;

use super::OkResponse;
use crate::{AppState, error::MeetResult, utils::{CallerId, JsonBody}};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetBody {
    pub to_user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockBody {
    pub blocked_user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportBody {
    pub reported_user_id: Option<String>,
    pub reason: Option<String>,
}

pub async fn pass_user(
    State(state): State<AppState>,
    CallerId(user_id): CallerId,
    JsonBody(body): JsonBody<TargetBody>,
) -> MeetResult<Json<OkResponse>> {
    state.meet.pass(&user_id, body.to_user_id.as_deref()).await?;
    Ok(Json(OkResponse::ok()))
}

pub async fn block_user(
    State(state): State<AppState>,
    CallerId(user_id): CallerId,
    JsonBody(body): JsonBody<BlockBody>,
) -> MeetResult<Json<OkResponse>> {
    state.meet.block(&user_id, body.blocked_user_id.as_deref()).await?;
    Ok(Json(OkResponse::ok()))
}

pub async fn report_user(
    State(state): State<AppState>,
    CallerId(user_id): CallerId,
    JsonBody(body): JsonBody<ReportBody>,
) -> MeetResult<Json<OkResponse>> {
    state
        .meet
        .report(&user_id, body.reported_user_id.as_deref(), body.reason.as_deref())
        .await?;
    Ok(Json(OkResponse::ok()))
}

pub async fn follow_user(
    State(state): State<AppState>,
    CallerId(user_id): CallerId,
    JsonBody(body): JsonBody<TargetBody>,
) -> MeetResult<Json<OkResponse>> {
    state.meet.follow(&user_id, body.to_user_id.as_deref()).await?;
    Ok(Json(OkResponse::ok()))
}

pub async fn unfollow_user(
    State(state): State<AppState>,
    CallerId(user_id): CallerId,
    Path(to_user_id): Path<String>,
) -> MeetResult<Json<OkResponse>> {
    state.meet.unfollow(&user_id, &to_user_id).await?;
    Ok(Json(OkResponse::ok()))
}
