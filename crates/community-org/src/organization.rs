//! Organization domain models
//!
//! Organizations group users through memberships. The slug is the stable
//! key other subsystems derive names from (the private group chat channel,
//! for instance), so it is validated once at construction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{OrgError, OrgResult};

/// An organization on the community platform.
///
/// # Examples
///
/// ```
/// use community_org::Organization;
///
/// let org = Organization::new("Acme Corp", "acme-corp").unwrap();
/// assert_eq!(org.slug, "acme-corp");
///
/// assert!(Organization::new("Acme Corp", "Acme Corp").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    /// Unique identifier for the organization
    pub id: Uuid,

    /// Human-readable name
    pub name: String,

    /// URL-friendly slug (unique across platform)
    pub slug: String,

    /// When the organization was created
    pub created_at: DateTime<Utc>,

    /// When the organization was last updated
    pub updated_at: DateTime<Utc>,
}

impl Organization {
    /// Creates a new organization.
    ///
    /// # Errors
    ///
    /// - [`OrgError::Blank`] if the name is blank
    /// - [`OrgError::InvalidSlug`] if the slug is not a valid slug
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> OrgResult<Self> {
        let name = name.into();
        let slug = slug.into();

        if name.trim().is_empty() {
            return Err(OrgError::Blank("name"));
        }
        validate_slug(&slug)?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::now_v7(),
            name,
            slug,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Check that a slug only contains lowercase ASCII letters, digits, `-` and `_`.
pub fn validate_slug(slug: &str) -> OrgResult<()> {
    let valid = !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(OrgError::InvalidSlug(slug.to_string()))
    }
}
