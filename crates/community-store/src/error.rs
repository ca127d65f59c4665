//! Storage error types

use thiserror::Error;
use uuid::Uuid;

/// Errors returned by repository operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No record with this ID
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity name
        entity: &'static str,
        /// Requested ID
        id: Uuid,
    },

    /// A uniqueness constraint would be violated
    #[error("{entity} already exists: {detail}")]
    Conflict {
        /// Entity name
        entity: &'static str,
        /// Which key collided
        detail: String,
    },

    /// Not enough unspent credits
    #[error("Not enough credits: {required} required, {available} available")]
    InsufficientCredits {
        /// Credits needed
        required: usize,
        /// Credits available
        available: usize,
    },

    /// Storage backend failure
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Result type for repository operations.
pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    /// Shorthand for [`StoreError::NotFound`].
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        Self::NotFound { entity, id }
    }

    /// Shorthand for [`StoreError::Conflict`].
    pub fn conflict(entity: &'static str, detail: impl Into<String>) -> Self {
        Self::Conflict {
            entity,
            detail: detail.into(),
        }
    }
}
