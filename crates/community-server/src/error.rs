//! HTTP error responses.

use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use community_auth::AuthError;
use community_service::ServiceError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Any failure a handler can return.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Session problems
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Domain failures
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// A request body the extractor could not read
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        let from_code =
            |code: u16| StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        match self {
            ApiError::Auth(e) => from_code(e.status_code()),
            ApiError::Service(e) => from_code(e.status_code()),
            ApiError::Rejected { status, .. } => *status,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::Auth(e) => e.error_code(),
            ApiError::Service(e) => e.error_code(),
            ApiError::Rejected { status, .. } => match *status {
                StatusCode::UNSUPPORTED_MEDIA_TYPE => "UNSUPPORTED_MEDIA_TYPE",
                StatusCode::UNPROCESSABLE_ENTITY => "VALIDATION_FAILED",
                _ => "BAD_REQUEST",
            },
        }
    }

    fn is_server_error(&self) -> bool {
        match self {
            ApiError::Auth(e) => e.is_server_error(),
            ApiError::Service(e) => e.is_server_error(),
            ApiError::Rejected { status, .. } => status.is_server_error(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // internals stay in the log
        let message = if self.is_server_error() {
            error!(error = %self, "request failed");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = json!({
            "error": {
                "code": self.code(),
                "message": message,
            }
        });
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use community_store::StoreError;

    #[test]
    fn test_status_mapping() {
        let insufficient = ApiError::from(ServiceError::InsufficientCredits {
            required: 1,
            available: 0,
        });
        assert_eq!(insufficient.status(), StatusCode::PAYMENT_REQUIRED);
        assert_eq!(insufficient.code(), "INSUFFICIENT_CREDITS");

        let missing = ApiError::from(AuthError::MissingToken);
        assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

        let backend = ApiError::from(ServiceError::from(StoreError::Backend("down".into())));
        assert_eq!(backend.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(backend.is_server_error());

        let unreadable = ApiError::Rejected {
            status: StatusCode::UNSUPPORTED_MEDIA_TYPE,
            message: "Expected request with `Content-Type: application/json`".to_string(),
        };
        assert_eq!(unreadable.code(), "UNSUPPORTED_MEDIA_TYPE");
        assert!(!unreadable.is_server_error());
    }
}
