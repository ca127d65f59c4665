//! Listing validation errors

use thiserror::Error;

/// Errors raised while validating a listing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListingError {
    /// A required attribute is blank
    #[error("{0} can't be blank")]
    Blank(&'static str),

    /// An attribute exceeds its maximum length
    #[error("{field} is too long (maximum is {max} characters)")]
    TooLong {
        /// Attribute name
        field: &'static str,
        /// Maximum length in characters
        max: usize,
    },

    /// The tag list has more tags than allowed
    #[error("Tag list exceeds the maximum of {max} tags (got {count})")]
    TooManyTags {
        /// Maximum number of tags
        max: usize,
        /// Number of tags after normalization
        count: usize,
    },
}

/// Result type for listing validation.
pub type ListingResult<T> = Result<T, ListingError>;
