//! Classified listing domain model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ListingError, ListingResult};
use crate::markdown;
use crate::tags::{TagList, MAX_TAGS};

/// Maximum title length in characters.
pub const MAX_TITLE_LENGTH: usize = 128;

/// Maximum markdown body length in characters.
pub const MAX_BODY_LENGTH: usize = 400;

/// User input for a new listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingDraft {
    /// Listing title
    pub title: String,

    /// Category the listing is filed under
    pub category_id: Uuid,

    /// Markdown source of the body
    pub body_markdown: String,

    /// Comma-separated tags
    #[serde(default)]
    pub tag_list: Option<String>,
}

/// A classified listing.
///
/// A listing always has an author (`user_id`). It may additionally be posted
/// on behalf of an organization (`organization_id`); the service layer only
/// sets that when the author is a member of the organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedListing {
    /// Unique listing ID
    pub id: Uuid,

    /// Listing title
    pub title: String,

    /// Markdown source of the body
    pub body_markdown: String,

    /// Rendered body
    pub processed_html: String,

    /// Category the listing is filed under
    pub category_id: Uuid,

    /// Author
    pub user_id: Uuid,

    /// Organization the listing is posted for
    pub organization_id: Option<Uuid>,

    /// Normalized tags
    pub tags: TagList,

    /// Tags joined for display and search
    pub cached_tag_list: String,

    /// Whether the listing is visible on the board
    pub published: bool,

    /// Sort key on the board; bumping moves a listing to the top
    pub bumped_at: DateTime<Utc>,

    /// When the listing was created
    pub created_at: DateTime<Utc>,

    /// When the listing was last written
    pub updated_at: DateTime<Utc>,
}

impl ClassifiedListing {
    /// Validate a draft and build a published, user-owned listing from it.
    ///
    /// # Errors
    ///
    /// - [`ListingError::Blank`] for a blank title or body
    /// - [`ListingError::TooLong`] past [`MAX_TITLE_LENGTH`] or [`MAX_BODY_LENGTH`]
    /// - [`ListingError::TooManyTags`] past [`MAX_TAGS`]
    pub fn new(user_id: Uuid, draft: ListingDraft) -> ListingResult<Self> {
        let title = draft.title.trim().to_string();
        check_length("title", &title, MAX_TITLE_LENGTH)?;
        check_length("body_markdown", &draft.body_markdown, MAX_BODY_LENGTH)?;

        let tags = draft
            .tag_list
            .as_deref()
            .map(TagList::parse)
            .unwrap_or_default();
        if tags.len() > MAX_TAGS {
            return Err(ListingError::TooManyTags {
                max: MAX_TAGS,
                count: tags.len(),
            });
        }

        let now = Utc::now();
        Ok(Self {
            id: Uuid::now_v7(),
            processed_html: markdown::render(&draft.body_markdown),
            cached_tag_list: tags.to_string(),
            title,
            body_markdown: draft.body_markdown,
            category_id: draft.category_id,
            user_id,
            organization_id: None,
            tags,
            published: true,
            bumped_at: now,
            created_at: now,
            updated_at: now,
        })
    }

    /// Post the listing on behalf of an organization.
    pub fn with_organization(mut self, organization_id: Option<Uuid>) -> Self {
        self.organization_id = organization_id;
        self
    }

    /// Check if the listing is posted for an organization.
    pub fn is_organization_listing(&self) -> bool {
        self.organization_id.is_some()
    }
}

fn check_length(field: &'static str, value: &str, max: usize) -> ListingResult<()> {
    if value.trim().is_empty() {
        return Err(ListingError::Blank(field));
    }
    if value.chars().count() > max {
        return Err(ListingError::TooLong { field, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ListingDraft {
        ListingDraft {
            title: "Hey".to_string(),
            category_id: Uuid::now_v7(),
            body_markdown: "hey hey my my".to_string(),
            tag_list: None,
        }
    }

    #[test]
    fn test_listing_creation() {
        let user_id = Uuid::now_v7();
        let listing = ClassifiedListing::new(user_id, draft()).unwrap();

        assert_eq!(listing.user_id, user_id);
        assert!(listing.processed_html.contains("hey my"));
        assert!(listing.published);
        assert!(!listing.is_organization_listing());
        assert!(listing.tags.is_empty());
        assert_eq!(listing.cached_tag_list, "");
    }

    #[test]
    fn test_listing_tags() {
        let listing = ClassifiedListing::new(
            Uuid::now_v7(),
            ListingDraft {
                tag_list: Some("ruby, rails, go".to_string()),
                ..draft()
            },
        )
        .unwrap();

        assert!(listing.cached_tag_list.contains("rails"));
        assert_eq!(listing.tags.len(), 3);
    }

    #[test]
    fn test_listing_validation() {
        let blank_title = ListingDraft {
            title: "   ".to_string(),
            ..draft()
        };
        assert_eq!(
            ClassifiedListing::new(Uuid::now_v7(), blank_title).unwrap_err(),
            ListingError::Blank("title")
        );

        let long_body = ListingDraft {
            body_markdown: "a".repeat(MAX_BODY_LENGTH + 1),
            ..draft()
        };
        assert_eq!(
            ClassifiedListing::new(Uuid::now_v7(), long_body).unwrap_err(),
            ListingError::TooLong {
                field: "body_markdown",
                max: MAX_BODY_LENGTH
            }
        );

        let many_tags = ListingDraft {
            tag_list: Some("a, b, c, d, e, f, g, h, i".to_string()),
            ..draft()
        };
        assert_eq!(
            ClassifiedListing::new(Uuid::now_v7(), many_tags).unwrap_err(),
            ListingError::TooManyTags { max: 8, count: 9 }
        );
    }

    #[test]
    fn test_with_organization() {
        let org_id = Uuid::now_v7();
        let listing = ClassifiedListing::new(Uuid::now_v7(), draft())
            .unwrap()
            .with_organization(Some(org_id));

        assert_eq!(listing.organization_id, Some(org_id));
    }
}
