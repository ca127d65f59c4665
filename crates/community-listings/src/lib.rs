//! # Community Listings
//!
//! Classified listings ("listings") posted by users, optionally on behalf of
//! an organization they belong to. Posting a listing costs one credit.
//!
//! ## Overview
//!
//! - **Listings**: Title, markdown body rendered to HTML, tags, owner
//! - **Categories**: Buckets listings are filed and browsed under
//! - **Credits**: Consumable units, one spent per listing
//! - **Tags**: Comma-separated tag lists normalized into a tag set
//!
//! ## Usage
//!
//! ```rust
//! use community_listings::{ClassifiedListing, ListingCategory, ListingDraft};
//! use uuid::Uuid;
//!
//! let category = ListingCategory::new("Education", "education");
//! let draft = ListingDraft {
//!     title: "Rust workshop".to_string(),
//!     category_id: category.id,
//!     body_markdown: "Learn **ownership**".to_string(),
//!     tag_list: Some("Rust, workshops".to_string()),
//! };
//!
//! let listing = ClassifiedListing::new(Uuid::now_v7(), draft).unwrap();
//! assert!(listing.processed_html.contains("<strong>ownership</strong>"));
//! assert_eq!(listing.cached_tag_list, "rust, workshops");
//! ```

pub mod category;
pub mod credit;
pub mod error;
pub mod listing;
pub mod markdown;
pub mod tags;

pub use category::ListingCategory;
pub use credit::Credit;
pub use error::{ListingError, ListingResult};
pub use listing::{ClassifiedListing, ListingDraft, MAX_BODY_LENGTH, MAX_TITLE_LENGTH};
pub use tags::{TagList, MAX_TAGS};
