//! Validation errors for organization models

use thiserror::Error;

/// Errors raised while building or validating organization models.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrgError {
    /// Role outside the admin/member/guest enumeration
    #[error("Invalid membership role: {0}")]
    InvalidRole(String),

    /// Slug is empty or contains characters outside `[a-z0-9_-]`
    #[error("Invalid organization slug: {0:?}")]
    InvalidSlug(String),

    /// A required attribute is blank
    #[error("{0} can't be blank")]
    Blank(&'static str),
}

/// Result type for organization model operations.
pub type OrgResult<T> = Result<T, OrgError>;
