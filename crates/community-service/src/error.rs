//! Application service errors
//!
//! Every failure a service operation can surface to its caller. Errors
//! inside best-effort side effects (chat-channel sync) are logged by the
//! service and never reach this type.

use community_listings::ListingError;
use community_org::OrgError;
use community_store::StoreError;
use thiserror::Error;
use uuid::Uuid;

/// Service error types.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Input failed validation
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A referenced record does not exist
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity name
        entity: &'static str,
        /// Requested ID
        id: Uuid,
    },

    /// A uniqueness constraint was violated
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The user cannot pay for the operation
    #[error("Not enough credits: {required} required, {available} available")]
    InsufficientCredits {
        /// Credits needed
        required: usize,
        /// Credits available
        available: usize,
    },

    /// Storage failure
    #[error("Storage error: {0}")]
    Store(StoreError),
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    /// Shorthand for [`ServiceError::NotFound`].
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        Self::NotFound { entity, id }
    }

    /// Check if this error should be logged at error level.
    pub fn is_server_error(&self) -> bool {
        matches!(self, ServiceError::Store(_))
    }

    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 422,
            ServiceError::NotFound { .. } => 404,
            ServiceError::Conflict(_) => 409,
            ServiceError::InsufficientCredits { .. } => 402,
            ServiceError::Store(_) => 500,
        }
    }

    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            ServiceError::Validation(_) => "VALIDATION_FAILED",
            ServiceError::NotFound { .. } => "NOT_FOUND",
            ServiceError::Conflict(_) => "CONFLICT",
            ServiceError::InsufficientCredits { .. } => "INSUFFICIENT_CREDITS",
            ServiceError::Store(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => Self::NotFound { entity, id },
            StoreError::Conflict { .. } => Self::Conflict(err.to_string()),
            StoreError::InsufficientCredits {
                required,
                available,
            } => Self::InsufficientCredits {
                required,
                available,
            },
            StoreError::Backend(_) => Self::Store(err),
        }
    }
}

impl From<OrgError> for ServiceError {
    fn from(err: OrgError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<ListingError> for ServiceError {
    fn from(err: ListingError) -> Self {
        Self::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_map_to_service_errors() {
        let id = Uuid::now_v7();

        assert!(matches!(
            ServiceError::from(StoreError::not_found("user", id)),
            ServiceError::NotFound { entity: "user", .. }
        ));
        assert_eq!(
            ServiceError::from(StoreError::conflict("organization membership", "x")).status_code(),
            409
        );
        assert_eq!(
            ServiceError::from(StoreError::InsufficientCredits {
                required: 1,
                available: 0
            })
            .error_code(),
            "INSUFFICIENT_CREDITS"
        );

        let backend = ServiceError::from(StoreError::Backend("disk".to_string()));
        assert!(backend.is_server_error());
        assert_eq!(backend.status_code(), 500);
    }

    #[test]
    fn test_validation_errors() {
        let err = ServiceError::from(OrgError::InvalidRole("owner".to_string()));
        assert_eq!(err.status_code(), 422);
        assert_eq!(err.to_string(), "Validation failed: Invalid membership role: owner");

        let err = ServiceError::from(ListingError::Blank("title"));
        assert_eq!(err.to_string(), "Validation failed: title can't be blank");
    }
}
