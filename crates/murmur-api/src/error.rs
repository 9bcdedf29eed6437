use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

/// Failure categories surfaced by the services.
///
/// The first three carry a human-readable reason that is returned to the
/// client unchanged as a plain-text body. Absent rows are not errors and never
/// appear here.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    DuplicateUsername(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    InvalidLogin(String),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::DuplicateUsername(_) => StatusCode::CONFLICT,
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::InvalidLogin(_) => StatusCode::UNAUTHORIZED,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Malformed, mistyped or `null` body fields are bad input like any other.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidInput(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Self::DuplicateUsername(reason)
            | Self::InvalidInput(reason)
            | Self::InvalidLogin(reason) => (status, reason).into_response(),
            Self::Storage(e) => {
                // Log the actual error, return generic message
                error!("Storage error: {:#}", e);
                (status, "Internal server error").into_response()
            }
        }
    }
}
