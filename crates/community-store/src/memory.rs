//! In-memory repository implementation.
//!
//! Suitable for single-process deployments and testing. Each table sits
//! behind its own `RwLock`; every uniqueness check and multi-record update
//! happens under a single write guard, so it is atomic with respect to other
//! callers of the same table.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use community_chat::{ChannelRole, ChannelVisibility, ChatChannel, ChatChannelMembership};
use community_listings::{ClassifiedListing, Credit, ListingCategory};
use community_org::{Organization, OrganizationMembership, User};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::repository::{
    CategoryRepository, ChannelMembershipRepository, ChannelRepository, CreditRepository,
    ListingRepository, MembershipRepository, OrganizationRepository, UserRepository,
};

type Table<T> = Arc<RwLock<HashMap<Uuid, T>>>;

/// In-memory store implementing every repository trait.
#[derive(Default)]
pub struct MemoryStore {
    users: Table<User>,
    organizations: Table<Organization>,
    memberships: Table<OrganizationMembership>,
    channels: Table<ChatChannel>,
    channel_memberships: Table<ChatChannelMembership>,
    categories: Table<ListingCategory>,
    listings: Table<ClassifiedListing>,
    credits: Table<Credit>,
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore").finish_non_exhaustive()
    }
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn insert_user(&self, user: User) -> StoreResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.username == user.username) {
            return Err(StoreError::conflict("user", format!("username {}", user.username)));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn touch_organization_info(&self, id: Uuid, at: DateTime<Utc>) -> StoreResult<User> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("user", id))?;
        user.touch_organization_info(at);
        Ok(user.clone())
    }
}

#[async_trait]
impl OrganizationRepository for MemoryStore {
    async fn insert_organization(&self, org: Organization) -> StoreResult<Organization> {
        let mut organizations = self.organizations.write().await;
        if organizations.values().any(|o| o.slug == org.slug) {
            return Err(StoreError::conflict("organization", format!("slug {}", org.slug)));
        }
        organizations.insert(org.id, org.clone());
        Ok(org)
    }

    async fn get_organization(&self, id: Uuid) -> StoreResult<Option<Organization>> {
        Ok(self.organizations.read().await.get(&id).cloned())
    }
}

#[async_trait]
impl MembershipRepository for MemoryStore {
    async fn insert_membership(
        &self,
        membership: OrganizationMembership,
    ) -> StoreResult<OrganizationMembership> {
        let mut memberships = self.memberships.write().await;
        if memberships.values().any(|m| m.key() == membership.key()) {
            return Err(StoreError::conflict(
                "organization membership",
                format!(
                    "user {} in organization {}",
                    membership.user_id, membership.organization_id
                ),
            ));
        }
        memberships.insert(membership.id, membership.clone());
        Ok(membership)
    }

    async fn get_membership(&self, id: Uuid) -> StoreResult<Option<OrganizationMembership>> {
        Ok(self.memberships.read().await.get(&id).cloned())
    }

    async fn update_membership(
        &self,
        membership: OrganizationMembership,
    ) -> StoreResult<OrganizationMembership> {
        let mut memberships = self.memberships.write().await;
        if memberships
            .values()
            .any(|m| m.id != membership.id && m.key() == membership.key())
        {
            return Err(StoreError::conflict(
                "organization membership",
                format!(
                    "user {} in organization {}",
                    membership.user_id, membership.organization_id
                ),
            ));
        }
        let stored = memberships
            .get_mut(&membership.id)
            .ok_or_else(|| StoreError::not_found("organization membership", membership.id))?;
        *stored = membership.clone();
        Ok(membership)
    }

    async fn delete_membership(&self, id: Uuid) -> StoreResult<OrganizationMembership> {
        self.memberships
            .write()
            .await
            .remove(&id)
            .ok_or_else(|| StoreError::not_found("organization membership", id))
    }

    async fn find_membership(
        &self,
        user_id: Uuid,
        organization_id: Uuid,
    ) -> StoreResult<Option<OrganizationMembership>> {
        let memberships = self.memberships.read().await;
        Ok(memberships
            .values()
            .find(|m| m.key() == (user_id, organization_id))
            .cloned())
    }

    async fn memberships_for_user(&self, user_id: Uuid) -> StoreResult<Vec<OrganizationMembership>> {
        let memberships = self.memberships.read().await;
        let mut found: Vec<OrganizationMembership> = memberships
            .values()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect();
        found.sort_by_key(|m| (m.created_at, m.id));
        Ok(found)
    }
}

#[async_trait]
impl ChannelRepository for MemoryStore {
    async fn find_channel_by_name(&self, channel_name: &str) -> StoreResult<Option<ChatChannel>> {
        let channels = self.channels.read().await;
        Ok(channels
            .values()
            .find(|c| c.channel_name == channel_name)
            .cloned())
    }

    async fn find_or_create_channel(
        &self,
        visibility: ChannelVisibility,
        slug: &str,
        channel_name: &str,
    ) -> StoreResult<ChatChannel> {
        let mut channels = self.channels.write().await;
        if let Some(existing) = channels.values().find(|c| c.slug == slug) {
            return Ok(existing.clone());
        }

        let channel = ChatChannel::new(visibility, slug, channel_name);
        tracing::debug!(channel_id = %channel.id, slug, "created chat channel");
        channels.insert(channel.id, channel.clone());
        Ok(channel)
    }

    async fn get_channel(&self, id: Uuid) -> StoreResult<Option<ChatChannel>> {
        Ok(self.channels.read().await.get(&id).cloned())
    }

    async fn count_channels(&self) -> StoreResult<usize> {
        Ok(self.channels.read().await.len())
    }
}

#[async_trait]
impl ChannelMembershipRepository for MemoryStore {
    async fn find_or_initialize_channel_membership(
        &self,
        user_id: Uuid,
        chat_channel_id: Uuid,
        role: ChannelRole,
    ) -> StoreResult<ChatChannelMembership> {
        let existing = self
            .find_channel_membership(user_id, chat_channel_id)
            .await?;
        Ok(existing.unwrap_or_else(|| ChatChannelMembership::new(user_id, chat_channel_id, role)))
    }

    async fn save_channel_membership(
        &self,
        mut membership: ChatChannelMembership,
    ) -> StoreResult<ChatChannelMembership> {
        if self.get_channel(membership.chat_channel_id).await?.is_none() {
            return Err(StoreError::not_found("chat channel", membership.chat_channel_id));
        }

        let mut memberships = self.channel_memberships.write().await;
        if memberships
            .values()
            .any(|m| m.id != membership.id && m.key() == membership.key())
        {
            return Err(StoreError::conflict(
                "chat channel membership",
                format!(
                    "user {} in channel {}",
                    membership.user_id, membership.chat_channel_id
                ),
            ));
        }
        membership.updated_at = Utc::now();
        memberships.insert(membership.id, membership.clone());
        Ok(membership)
    }

    async fn find_channel_membership(
        &self,
        user_id: Uuid,
        chat_channel_id: Uuid,
    ) -> StoreResult<Option<ChatChannelMembership>> {
        let memberships = self.channel_memberships.read().await;
        Ok(memberships
            .values()
            .find(|m| m.key() == (user_id, chat_channel_id))
            .cloned())
    }

    async fn channel_members(&self, chat_channel_id: Uuid) -> StoreResult<Vec<ChatChannelMembership>> {
        let memberships = self.channel_memberships.read().await;
        let mut found: Vec<ChatChannelMembership> = memberships
            .values()
            .filter(|m| m.chat_channel_id == chat_channel_id)
            .cloned()
            .collect();
        found.sort_by_key(|m| (m.created_at, m.id));
        Ok(found)
    }
}

#[async_trait]
impl CategoryRepository for MemoryStore {
    async fn insert_category(&self, category: ListingCategory) -> StoreResult<ListingCategory> {
        let mut categories = self.categories.write().await;
        if categories.values().any(|c| c.slug == category.slug) {
            return Err(StoreError::conflict(
                "listing category",
                format!("slug {}", category.slug),
            ));
        }
        categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn get_category(&self, id: Uuid) -> StoreResult<Option<ListingCategory>> {
        Ok(self.categories.read().await.get(&id).cloned())
    }

    async fn find_category_by_slug(&self, slug: &str) -> StoreResult<Option<ListingCategory>> {
        let categories = self.categories.read().await;
        Ok(categories.values().find(|c| c.slug == slug).cloned())
    }

    async fn list_categories(&self) -> StoreResult<Vec<ListingCategory>> {
        let mut categories: Vec<ListingCategory> =
            self.categories.read().await.values().cloned().collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }
}

#[async_trait]
impl ListingRepository for MemoryStore {
    async fn insert_listing(&self, listing: ClassifiedListing) -> StoreResult<ClassifiedListing> {
        let mut listings = self.listings.write().await;
        if listings.contains_key(&listing.id) {
            return Err(StoreError::conflict("listing", listing.id.to_string()));
        }
        listings.insert(listing.id, listing.clone());
        Ok(listing)
    }

    async fn get_listing(&self, id: Uuid) -> StoreResult<Option<ClassifiedListing>> {
        Ok(self.listings.read().await.get(&id).cloned())
    }

    async fn list_listings(&self, category_id: Option<Uuid>) -> StoreResult<Vec<ClassifiedListing>> {
        let listings = self.listings.read().await;
        let mut found: Vec<ClassifiedListing> = listings
            .values()
            .filter(|l| l.published)
            .filter(|l| category_id.map_or(true, |id| l.category_id == id))
            .cloned()
            .collect();
        found.sort_by(|a, b| (b.bumped_at, b.id).cmp(&(a.bumped_at, a.id)));
        Ok(found)
    }

    async fn last_listing(&self) -> StoreResult<Option<ClassifiedListing>> {
        let listings = self.listings.read().await;
        Ok(listings
            .values()
            .max_by_key(|l| (l.created_at, l.id))
            .cloned())
    }

    async fn count_listings(&self) -> StoreResult<usize> {
        Ok(self.listings.read().await.len())
    }
}

#[async_trait]
impl CreditRepository for MemoryStore {
    async fn insert_credits(&self, credits: Vec<Credit>) -> StoreResult<usize> {
        let mut table = self.credits.write().await;
        let count = credits.len();
        for credit in credits {
            table.insert(credit.id, credit);
        }
        Ok(count)
    }

    async fn available_credits(&self, user_id: Uuid) -> StoreResult<usize> {
        let credits = self.credits.read().await;
        Ok(credits
            .values()
            .filter(|c| c.user_id == user_id && !c.spent)
            .count())
    }

    async fn spend_credits(
        &self,
        user_id: Uuid,
        count: usize,
        purchase_id: Uuid,
    ) -> StoreResult<Vec<Credit>> {
        let mut credits = self.credits.write().await;

        let mut candidates: Vec<(DateTime<Utc>, Uuid)> = credits
            .values()
            .filter(|c| c.user_id == user_id && !c.spent)
            .map(|c| (c.created_at, c.id))
            .collect();
        if candidates.len() < count {
            return Err(StoreError::InsufficientCredits {
                required: count,
                available: candidates.len(),
            });
        }
        candidates.sort_unstable();

        let mut spent = Vec::with_capacity(count);
        for (_, id) in candidates.into_iter().take(count) {
            if let Some(credit) = credits.get_mut(&id) {
                credit.spend(purchase_id);
                spent.push(credit.clone());
            }
        }
        Ok(spent)
    }

    async fn refund_purchase(&self, purchase_id: Uuid) -> StoreResult<usize> {
        let mut credits = self.credits.write().await;
        let mut refunded = 0;
        for credit in credits
            .values_mut()
            .filter(|c| c.purchase_id == Some(purchase_id))
        {
            credit.refund();
            refunded += 1;
        }
        Ok(refunded)
    }

    async fn count_spent_credits(&self) -> StoreResult<usize> {
        Ok(self.credits.read().await.values().filter(|c| c.spent).count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use community_listings::ListingDraft;
    use community_org::MembershipRole;

    #[tokio::test]
    async fn test_membership_pair_is_unique() {
        let store = MemoryStore::new();
        let user_id = Uuid::now_v7();
        let org_id = Uuid::now_v7();

        store
            .insert_membership(OrganizationMembership::new(user_id, org_id, MembershipRole::Member))
            .await
            .unwrap();
        let duplicate = store
            .insert_membership(OrganizationMembership::new(user_id, org_id, MembershipRole::Admin))
            .await;

        assert!(matches!(duplicate, Err(StoreError::Conflict { .. })));
        assert_eq!(store.memberships_for_user(user_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_and_delete_membership() {
        let store = MemoryStore::new();
        let mut membership =
            OrganizationMembership::new(Uuid::now_v7(), Uuid::now_v7(), MembershipRole::Member);
        store.insert_membership(membership.clone()).await.unwrap();

        membership.set_role(MembershipRole::Admin);
        store.update_membership(membership.clone()).await.unwrap();
        let stored = store.get_membership(membership.id).await.unwrap().unwrap();
        assert_eq!(stored.role, MembershipRole::Admin);

        store.delete_membership(membership.id).await.unwrap();
        assert!(store.get_membership(membership.id).await.unwrap().is_none());
        assert!(matches!(
            store.delete_membership(membership.id).await,
            Err(StoreError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_find_or_create_channel_is_keyed_by_slug() {
        let store = MemoryStore::new();

        let first = store
            .find_or_create_channel(ChannelVisibility::InviteOnly, "acme-private-group-chat", "@acme private group chat")
            .await
            .unwrap();
        let second = store
            .find_or_create_channel(ChannelVisibility::Open, "acme-private-group-chat", "other name")
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.visibility, ChannelVisibility::InviteOnly);
        assert_eq!(store.count_channels().await.unwrap(), 1);
        assert!(store
            .find_channel_by_name("@acme private group chat")
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_channel_membership_find_or_initialize() {
        let store = MemoryStore::new();
        let channel = store
            .find_or_create_channel(ChannelVisibility::InviteOnly, "c", "c")
            .await
            .unwrap();
        let user_id = Uuid::now_v7();

        let fresh = store
            .find_or_initialize_channel_membership(user_id, channel.id, ChannelRole::Member)
            .await
            .unwrap();
        assert!(store
            .find_channel_membership(user_id, channel.id)
            .await
            .unwrap()
            .is_none());

        store.save_channel_membership(fresh.clone()).await.unwrap();
        let found = store
            .find_or_initialize_channel_membership(user_id, channel.id, ChannelRole::Mod)
            .await
            .unwrap();
        assert_eq!(found.id, fresh.id);
        assert_eq!(found.role, ChannelRole::Member);
    }

    #[tokio::test]
    async fn test_save_channel_membership_requires_channel() {
        let store = MemoryStore::new();
        let orphan = ChatChannelMembership::new(Uuid::now_v7(), Uuid::now_v7(), ChannelRole::Member);

        assert!(matches!(
            store.save_channel_membership(orphan).await,
            Err(StoreError::NotFound { entity: "chat channel", .. })
        ));
    }

    #[tokio::test]
    async fn test_spend_credits_is_all_or_nothing() {
        let store = MemoryStore::new();
        let user_id = Uuid::now_v7();
        store.insert_credits(Credit::batch(user_id, 2)).await.unwrap();

        let too_many = store.spend_credits(user_id, 3, Uuid::now_v7()).await;
        assert_eq!(
            too_many.unwrap_err(),
            StoreError::InsufficientCredits {
                required: 3,
                available: 2
            }
        );
        assert_eq!(store.available_credits(user_id).await.unwrap(), 2);

        let purchase_id = Uuid::now_v7();
        let spent = store.spend_credits(user_id, 1, purchase_id).await.unwrap();
        assert_eq!(spent.len(), 1);
        assert_eq!(store.available_credits(user_id).await.unwrap(), 1);
        assert_eq!(store.count_spent_credits().await.unwrap(), 1);

        assert_eq!(store.refund_purchase(purchase_id).await.unwrap(), 1);
        assert_eq!(store.available_credits(user_id).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_list_listings_filters_by_category() {
        let store = MemoryStore::new();
        let jobs = ListingCategory::new("Jobs", "jobs");
        let events = ListingCategory::new("Events", "events");
        let user_id = Uuid::now_v7();

        for category in [&jobs, &events, &jobs] {
            let draft = ListingDraft {
                title: "Hey".to_string(),
                category_id: category.id,
                body_markdown: "hey".to_string(),
                tag_list: None,
            };
            store
                .insert_listing(ClassifiedListing::new(user_id, draft).unwrap())
                .await
                .unwrap();
        }

        assert_eq!(store.list_listings(None).await.unwrap().len(), 3);
        assert_eq!(store.list_listings(Some(jobs.id)).await.unwrap().len(), 2);
        assert_eq!(store.count_listings().await.unwrap(), 3);
    }
}
