//! Tag list normalization
//!
//! Users type tags as free text separated by commas. The stored tag set is
//! trimmed, lowercased and deduplicated, keeping first-seen order.

use serde::{Deserialize, Serialize};

/// Maximum number of tags on a listing.
pub const MAX_TAGS: usize = 8;

/// A normalized, ordered set of tags.
///
/// # Examples
///
/// ```
/// use community_listings::TagList;
///
/// let tags = TagList::parse("Ruby, rails,, go ,ruby");
/// assert_eq!(tags.as_slice(), ["ruby", "rails", "go"]);
/// assert_eq!(tags.to_string(), "ruby, rails, go");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagList(Vec<String>);

impl TagList {
    /// Parse a comma-separated tag list.
    pub fn parse(raw: &str) -> Self {
        let mut tags: Vec<String> = Vec::new();
        for tag in raw.split(',') {
            let tag = tag.trim().to_lowercase();
            if !tag.is_empty() && !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        Self(tags)
    }

    /// Check whether a tag is present (case-insensitive).
    pub fn contains(&self, tag: &str) -> bool {
        let tag = tag.trim().to_lowercase();
        self.0.iter().any(|t| *t == tag)
    }

    /// Number of tags.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no tags.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The tags in order.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl std::fmt::Display for TagList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes() {
        let tags = TagList::parse("ruby, rails, go");

        assert_eq!(tags.len(), 3);
        assert!(tags.contains("rails"));
        assert!(tags.contains(" RAILS "));
        assert!(!tags.contains("python"));
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(TagList::parse("").is_empty());
        assert!(TagList::parse(" , ,").is_empty());
        assert_eq!(TagList::parse("").to_string(), "");
    }

    #[test]
    fn test_parse_dedupes_case_insensitively() {
        let tags = TagList::parse("Go, go, GO, rust");
        assert_eq!(tags.as_slice(), ["go", "rust"]);
    }
}
