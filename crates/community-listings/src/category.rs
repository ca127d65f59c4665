//! Listing categories

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A category listings are filed under and browsed by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingCategory {
    /// Unique category ID
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// URL segment used by `/listings/:category_slug`
    pub slug: String,

    /// Posting rules shown on the new listing form
    pub rules: Option<String>,
}

impl ListingCategory {
    /// Creates a category with no posting rules.
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            slug: slug.into(),
            rules: None,
        }
    }

    /// Set the posting rules.
    pub fn with_rules(mut self, rules: impl Into<String>) -> Self {
        self.rules = Some(rules.into());
        self
    }

    /// The categories a fresh install starts with.
    pub fn defaults() -> Vec<Self> {
        [
            ("Conference CFP", "cfp"),
            ("Education/Courses", "education"),
            ("Job Listings", "jobs"),
            ("Events", "events"),
            ("Products/Tools", "products"),
            ("Mentors", "mentors"),
            ("Mentees", "mentees"),
            ("Miscellaneous", "misc"),
        ]
        .into_iter()
        .map(|(name, slug)| Self::new(name, slug))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_have_unique_slugs() {
        let defaults = ListingCategory::defaults();
        let mut slugs: Vec<&str> = defaults.iter().map(|c| c.slug.as_str()).collect();
        slugs.sort_unstable();
        slugs.dedup();

        assert_eq!(slugs.len(), defaults.len());
        assert!(defaults.iter().all(|c| c.rules.is_none()));
    }
}
