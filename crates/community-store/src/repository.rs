//! Repository traits
//!
//! One trait per aggregate. Services hold them as `Arc<dyn ...>` so tests and
//! deployments can plug in different backends.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use community_chat::{ChannelRole, ChannelVisibility, ChatChannel, ChatChannelMembership};
use community_listings::{ClassifiedListing, Credit, ListingCategory};
use community_org::{Organization, OrganizationMembership, User};
use uuid::Uuid;

use crate::error::StoreResult;

/// Users.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user. Fails with `Conflict` on a duplicate username.
    async fn insert_user(&self, user: User) -> StoreResult<User>;

    /// Fetch a user by ID.
    async fn get_user(&self, id: Uuid) -> StoreResult<Option<User>>;

    /// Bump the user's organization-info timestamp to `at` (or just past the
    /// current value) and return the updated user.
    async fn touch_organization_info(&self, id: Uuid, at: DateTime<Utc>) -> StoreResult<User>;
}

/// Organizations.
#[async_trait]
pub trait OrganizationRepository: Send + Sync {
    /// Insert a new organization. Fails with `Conflict` on a duplicate slug.
    async fn insert_organization(&self, org: Organization) -> StoreResult<Organization>;

    /// Fetch an organization by ID.
    async fn get_organization(&self, id: Uuid) -> StoreResult<Option<Organization>>;
}

/// Organization memberships.
#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Insert a membership. Fails with `Conflict` if the (user, organization)
    /// pair already has one.
    async fn insert_membership(
        &self,
        membership: OrganizationMembership,
    ) -> StoreResult<OrganizationMembership>;

    /// Fetch a membership by ID.
    async fn get_membership(&self, id: Uuid) -> StoreResult<Option<OrganizationMembership>>;

    /// Replace a stored membership. Fails with `NotFound` if it was never inserted.
    async fn update_membership(
        &self,
        membership: OrganizationMembership,
    ) -> StoreResult<OrganizationMembership>;

    /// Delete a membership, returning the removed record.
    async fn delete_membership(&self, id: Uuid) -> StoreResult<OrganizationMembership>;

    /// Fetch the membership for a (user, organization) pair.
    async fn find_membership(
        &self,
        user_id: Uuid,
        organization_id: Uuid,
    ) -> StoreResult<Option<OrganizationMembership>>;

    /// All memberships of a user, oldest first.
    async fn memberships_for_user(&self, user_id: Uuid) -> StoreResult<Vec<OrganizationMembership>>;
}

/// Chat channels.
#[async_trait]
pub trait ChannelRepository: Send + Sync {
    /// Fetch a channel by exact display name.
    async fn find_channel_by_name(&self, channel_name: &str) -> StoreResult<Option<ChatChannel>>;

    /// Return the channel with `slug`, creating it with `visibility` and
    /// `channel_name` if there is none.
    async fn find_or_create_channel(
        &self,
        visibility: ChannelVisibility,
        slug: &str,
        channel_name: &str,
    ) -> StoreResult<ChatChannel>;

    /// Fetch a channel by ID.
    async fn get_channel(&self, id: Uuid) -> StoreResult<Option<ChatChannel>>;

    /// Number of channels.
    async fn count_channels(&self) -> StoreResult<usize>;
}

/// Chat channel memberships.
#[async_trait]
pub trait ChannelMembershipRepository: Send + Sync {
    /// Return the stored membership for (user, channel), or a new unsaved one
    /// with `role`.
    async fn find_or_initialize_channel_membership(
        &self,
        user_id: Uuid,
        chat_channel_id: Uuid,
        role: ChannelRole,
    ) -> StoreResult<ChatChannelMembership>;

    /// Insert or replace a channel membership. Fails with `Conflict` if a
    /// different record already holds the (user, channel) pair.
    async fn save_channel_membership(
        &self,
        membership: ChatChannelMembership,
    ) -> StoreResult<ChatChannelMembership>;

    /// Fetch the membership for (user, channel).
    async fn find_channel_membership(
        &self,
        user_id: Uuid,
        chat_channel_id: Uuid,
    ) -> StoreResult<Option<ChatChannelMembership>>;

    /// All memberships of a channel.
    async fn channel_members(&self, chat_channel_id: Uuid) -> StoreResult<Vec<ChatChannelMembership>>;
}

/// Listing categories.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Insert a category. Fails with `Conflict` on a duplicate slug.
    async fn insert_category(&self, category: ListingCategory) -> StoreResult<ListingCategory>;

    /// Fetch a category by ID.
    async fn get_category(&self, id: Uuid) -> StoreResult<Option<ListingCategory>>;

    /// Fetch a category by slug.
    async fn find_category_by_slug(&self, slug: &str) -> StoreResult<Option<ListingCategory>>;

    /// All categories ordered by name.
    async fn list_categories(&self) -> StoreResult<Vec<ListingCategory>>;
}

/// Classified listings.
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// Insert a listing.
    async fn insert_listing(&self, listing: ClassifiedListing) -> StoreResult<ClassifiedListing>;

    /// Fetch a listing by ID.
    async fn get_listing(&self, id: Uuid) -> StoreResult<Option<ClassifiedListing>>;

    /// Published listings, most recently bumped first, optionally limited to
    /// one category.
    async fn list_listings(&self, category_id: Option<Uuid>) -> StoreResult<Vec<ClassifiedListing>>;

    /// The most recently created listing.
    async fn last_listing(&self) -> StoreResult<Option<ClassifiedListing>>;

    /// Number of listings.
    async fn count_listings(&self) -> StoreResult<usize>;
}

/// Credits.
#[async_trait]
pub trait CreditRepository: Send + Sync {
    /// Issue credits.
    async fn insert_credits(&self, credits: Vec<Credit>) -> StoreResult<usize>;

    /// Number of unspent credits a user owns.
    async fn available_credits(&self, user_id: Uuid) -> StoreResult<usize>;

    /// Atomically spend `count` of the user's oldest unspent credits on
    /// `purchase_id`. Fails with `InsufficientCredits` without spending
    /// anything if the user has fewer than `count`.
    async fn spend_credits(
        &self,
        user_id: Uuid,
        count: usize,
        purchase_id: Uuid,
    ) -> StoreResult<Vec<Credit>>;

    /// Return every credit spent on `purchase_id`. Returns how many were refunded.
    async fn refund_purchase(&self, purchase_id: Uuid) -> StoreResult<usize>;

    /// Number of spent credits across all users.
    async fn count_spent_credits(&self) -> StoreResult<usize>;
}
