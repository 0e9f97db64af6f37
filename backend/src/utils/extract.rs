use axum::extract::{FromRequest, FromRequestParts};

use crate::error::MeetError;

/// JSON request body whose parse failures surface as `MeetError::Validation`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(MeetError))]
pub struct JsonBody<T>(pub T);

/// Query string whose parse failures surface as `MeetError::Validation`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(MeetError))]
pub struct QueryParams<T>(pub T);
