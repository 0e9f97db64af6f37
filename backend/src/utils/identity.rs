use axum::{extract::FromRequestParts, http::request::Parts};

use crate::constants::USER_ID_HEADER;
use crate::error::MeetError;

/// The authenticated caller, as asserted by the auth gateway in front of the
/// service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerId(pub String);

impl<S> FromRequestParts<S> for CallerId
where
    S: Send + Sync,
{
    type Rejection = MeetError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| CallerId(id.to_string()))
            .ok_or(MeetError::Unauthorized)
    }
}
