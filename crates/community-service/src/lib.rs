//! # Community Services
//!
//! Application services that sit between the HTTP layer and the repositories.
//!
//! - [`MembershipLifecycle`]: organization membership writes, keeping each
//!   organization's private group chat in sync and signalling membership
//!   changes on the user record
//! - [`ListingService`]: posting classified listings against credits, and
//!   browsing the listings board
//!
//! ## Usage
//!
//! ```rust,no_run
//! use community_org::{MembershipRole, Organization, User};
//! use community_service::MembershipLifecycle;
//! use community_store::Repositories;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let repos = Repositories::in_memory();
//!     let user = repos.users.insert_user(User::new("ben", "Ben")).await?;
//!     let org = repos.organizations.insert_organization(Organization::new("Acme", "acme")?).await?;
//!
//!     let lifecycle = MembershipLifecycle::new(repos.clone());
//!     lifecycle.create_membership(user.id, org.id, MembershipRole::Admin).await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod lifecycle;
pub mod listings;

pub use error::{ServiceError, ServiceResult};
pub use lifecycle::MembershipLifecycle;
pub use listings::{ListingBoard, ListingService, NewListing, LISTING_COST};
