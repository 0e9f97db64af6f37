use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::{MeetError, MeetResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Rejected,
}

impl RequestStatus {
    /// Moves a request to `target`. Only pending requests may move, and only
    /// to a terminal status.
    pub fn transition(self, target: RequestStatus) -> MeetResult<RequestStatus> {
        match (self, target) {
            (RequestStatus::Pending, RequestStatus::Accepted)
            | (RequestStatus::Pending, RequestStatus::Rejected) => Ok(target),
            (RequestStatus::Pending, RequestStatus::Pending) => {
                Err(MeetError::validation("Request is already pending."))
            }
            _ => Err(MeetError::conflict("Request is not pending.")),
        }
    }
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeRequest {
    pub id: Uuid,
    pub from_user_id: String,
    pub to_user_id: String,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_moves_to_terminal_states() {
        assert_eq!(
            RequestStatus::Pending.transition(RequestStatus::Accepted).unwrap(),
            RequestStatus::Accepted
        );
        assert_eq!(
            RequestStatus::Pending.transition(RequestStatus::Rejected).unwrap(),
            RequestStatus::Rejected
        );
    }

    #[test]
    fn test_terminal_states_are_final() {
        for from in [RequestStatus::Accepted, RequestStatus::Rejected] {
            for to in [RequestStatus::Pending, RequestStatus::Accepted, RequestStatus::Rejected] {
                assert!(matches!(from.transition(to), Err(MeetError::Conflict(_))));
            }
        }
    }

    #[test]
    fn test_pending_to_pending_is_not_a_transition() {
        assert!(matches!(
            RequestStatus::Pending.transition(RequestStatus::Pending),
            Err(MeetError::Validation(_))
        ));
    }
}
