//! HTTP error responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rollcall_attendance::AttendanceError;
use serde::{Deserialize, Serialize};

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Error returned by a handler.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AttendanceError> for ApiError {
    fn from(err: AttendanceError) -> Self {
        match err {
            AttendanceError::Validation(message) => Self::BadRequest(message),
            AttendanceError::DayNotFound { .. } => Self::NotFound(err.to_string()),
            AttendanceError::Remote(_) | AttendanceError::Layout(_) => {
                tracing::error!(error = %err, "attendance request failed");
                Self::Internal(err.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (Self::BadRequest(error) | Self::NotFound(error) | Self::Internal(error)) = self;
        (status, Json(ErrorBody { error })).into_response()
    }
}
