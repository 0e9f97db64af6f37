use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use thiserror::Error;

pub type MeetResult<T> = std::result::Result<T, MeetError>;

/// Failures surfaced by Meet operations. Every variant is recovered at the
/// HTTP boundary and reported with a stable `kind`.
#[derive(Error, Debug)]
pub enum MeetError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Rate limit exceeded. Max {0} likes/passes per minute.")]
    RateLimited(u32),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub kind: &'static str,
}

impl MeetError {
    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            MeetError::Unauthorized => "unauthorized",
            MeetError::Forbidden(_) => "forbidden",
            MeetError::NotFound(_) => "not_found",
            MeetError::Validation(_) => "validation",
            MeetError::Conflict(_) => "conflict",
            MeetError::RateLimited(_) => "rate_limited",
            MeetError::Database(_) => "internal",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            MeetError::Unauthorized => StatusCode::UNAUTHORIZED,
            MeetError::Forbidden(_) => StatusCode::FORBIDDEN,
            MeetError::NotFound(_) => StatusCode::NOT_FOUND,
            MeetError::Validation(_) => StatusCode::BAD_REQUEST,
            MeetError::Conflict(_) => StatusCode::CONFLICT,
            MeetError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            MeetError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for MeetError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for MeetError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for MeetError {
    fn into_response(self) -> Response {
        let error = match &self {
            MeetError::Database(e) => {
                tracing::error!("Database error while handling meet request: {}", e);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = ErrorBody {
            error,
            kind: self.kind(),
        };

        (self.status(), Json(body)).into_response()
    }
}
