//! # Community Store
//!
//! Repository traits for every community aggregate, plus an in-memory
//! backend.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use community_store::Repositories;
//! use community_org::User;
//!
//! async fn example() {
//!     let repos = Repositories::in_memory();
//!     let user = repos.users.insert_user(User::new("ben", "Ben")).await.unwrap();
//!     assert!(repos.users.get_user(user.id).await.unwrap().is_some());
//! }
//! ```

pub mod error;
pub mod memory;
pub mod repository;

use std::sync::Arc;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use repository::{
    CategoryRepository, ChannelMembershipRepository, ChannelRepository, CreditRepository,
    ListingRepository, MembershipRepository, OrganizationRepository, UserRepository,
};

/// Handles to every repository, cheap to clone.
#[derive(Clone)]
pub struct Repositories {
    /// Users
    pub users: Arc<dyn UserRepository>,
    /// Organizations
    pub organizations: Arc<dyn OrganizationRepository>,
    /// Organization memberships
    pub memberships: Arc<dyn MembershipRepository>,
    /// Chat channels
    pub channels: Arc<dyn ChannelRepository>,
    /// Chat channel memberships
    pub channel_memberships: Arc<dyn ChannelMembershipRepository>,
    /// Listing categories
    pub categories: Arc<dyn CategoryRepository>,
    /// Classified listings
    pub listings: Arc<dyn ListingRepository>,
    /// Credits
    pub credits: Arc<dyn CreditRepository>,
}

impl std::fmt::Debug for Repositories {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repositories").finish_non_exhaustive()
    }
}

impl Repositories {
    /// Use one backend for every repository.
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: UserRepository
            + OrganizationRepository
            + MembershipRepository
            + ChannelRepository
            + ChannelMembershipRepository
            + CategoryRepository
            + ListingRepository
            + CreditRepository
            + 'static,
    {
        Self {
            users: store.clone(),
            organizations: store.clone(),
            memberships: store.clone(),
            channels: store.clone(),
            channel_memberships: store.clone(),
            categories: store.clone(),
            listings: store.clone(),
            credits: store,
        }
    }

    /// Fresh in-memory repositories.
    pub fn in_memory() -> Self {
        Self::from_store(Arc::new(MemoryStore::new()))
    }
}
