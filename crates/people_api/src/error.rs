//! API error taxonomy and its HTTP rendering.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use people_core::ServiceError;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

pub const NOT_FOUND_MESSAGE: &str = "Person with this id wasn't found!";
const INTERNAL_MESSAGE: &str = "Internal server error";

/// Failure of a people request, mapped to one HTTP status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No person matches the requested id.
    NotFound,
    /// Payload failed validation; holds the `"field - message;"` detail.
    NotCreated(String),
    /// Request could not be decoded (body, path or query).
    BadRequest(String),
    /// Store failure; details are logged, not returned.
    Internal,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::NotCreated(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::NotFound => NOT_FOUND_MESSAGE,
            Self::NotCreated(detail) | Self::BadRequest(detail) => detail,
            Self::Internal => INTERNAL_MESSAGE,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        match value {
            ServiceError::NotFound(_) => Self::NotFound,
            ServiceError::Invalid(err) => Self::NotCreated(err.to_string()),
            ServiceError::Repo(err) => {
                error!("event=store_failure module=api status=error error={err}");
                Self::Internal
            }
        }
    }
}

/// Error body: `{message, timestamp}` with epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    pub timestamp: i64,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timestamp: now_epoch_ms(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse::new(self.message());
        (self.status_code(), Json(body)).into_response()
    }
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
        })
}

#[cfg(test)]
mod tests {
    use super::{ApiError, ErrorResponse, NOT_FOUND_MESSAGE};
    use axum::http::StatusCode;
    use people_core::{PersonInput, ServiceError};

    #[test]
    fn service_errors_map_to_statuses() {
        let not_found = ApiError::from(ServiceError::NotFound(1));
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(not_found.message(), NOT_FOUND_MESSAGE);

        let validation = PersonInput::new("", 30, "ivan@example.com", None)
            .validate()
            .unwrap_err();
        let not_created = ApiError::from(ServiceError::Invalid(validation));
        assert_eq!(not_created.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(not_created.message(), "fullName - Name should not be empty;");
    }

    #[test]
    fn error_response_carries_current_timestamp() {
        let body = ErrorResponse::new("boom");
        assert_eq!(body.message, "boom");
        assert!(body.timestamp > 1_600_000_000_000);
    }
}
