use serde::Serialize;
use std::collections::HashMap;

use super::{CardSummary, LikeRequest, Match, Notification};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Inbox {
    pub incoming: Vec<LikeRequest>,
    pub outgoing: Vec<LikeRequest>,
    pub matches: Vec<Match>,
    pub notifications: Vec<Notification>,
    pub card_by_user: HashMap<String, CardSummary>,
    pub current_user_id: String,
}
