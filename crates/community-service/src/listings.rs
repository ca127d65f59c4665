//! Listing creation and browsing.

use community_listings::{ClassifiedListing, ListingCategory, ListingDraft};
use community_org::Organization;
use community_store::{Repositories, StoreError};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};

/// Credits spent per listing.
pub const LISTING_COST: usize = 1;

/// A listing submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewListing {
    /// Title, body, category and tags
    #[serde(flatten)]
    pub draft: ListingDraft,

    /// Organization to post on behalf of
    #[serde(default)]
    pub organization_id: Option<Uuid>,
}

/// What the listings board shows for one request.
#[derive(Debug, Clone, Serialize)]
pub struct ListingBoard {
    /// Every category, for the filter bar
    pub categories: Vec<ListingCategory>,

    /// The category being browsed, if one was requested and exists
    pub selected: Option<ListingCategory>,

    /// Listings to display
    pub listings: Vec<ClassifiedListing>,
}

/// Creates and lists classified listings.
#[derive(Debug, Clone)]
pub struct ListingService {
    repos: Repositories,
}

impl ListingService {
    /// Create a listing service over the given repositories.
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    /// Post a listing as `user_id`, spending one of their credits.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the user does not exist
    /// - `Validation` for an invalid draft or unknown category
    /// - `InsufficientCredits` if the user has no unspent credit; nothing is
    ///   stored in that case
    pub async fn create_listing(
        &self,
        user_id: Uuid,
        new: NewListing,
    ) -> ServiceResult<ClassifiedListing> {
        if self.repos.users.get_user(user_id).await?.is_none() {
            return Err(ServiceError::not_found("user", user_id));
        }
        if self
            .repos
            .categories
            .get_category(new.draft.category_id)
            .await?
            .is_none()
        {
            return Err(ServiceError::Validation(
                "classified listing category must exist".to_string(),
            ));
        }

        let organization_id = self
            .resolve_organization(user_id, new.organization_id)
            .await?;
        let listing = ClassifiedListing::new(user_id, new.draft)?.with_organization(organization_id);

        let listing_id = listing.id;
        self.repos
            .credits
            .spend_credits(user_id, LISTING_COST, listing_id)
            .await?;

        match self.repos.listings.insert_listing(listing).await {
            Ok(listing) => {
                info!(
                    listing_id = %listing.id,
                    user_id = %user_id,
                    organization_id = ?listing.organization_id,
                    tags = %listing.cached_tag_list,
                    "classified listing created"
                );
                Ok(listing)
            }
            Err(e) => {
                self.refund(listing_id, &e).await;
                Err(e.into())
            }
        }
    }

    /// Decide which organization, if any, a listing is posted for.
    ///
    /// - nothing requested: the user's own listing
    /// - an organization the user belongs to: that organization
    /// - any other organization: the organization of the user's oldest
    ///   membership, or none if the user has no memberships
    pub async fn resolve_organization(
        &self,
        user_id: Uuid,
        requested: Option<Uuid>,
    ) -> ServiceResult<Option<Uuid>> {
        let Some(requested) = requested else {
            return Ok(None);
        };

        if self
            .repos
            .memberships
            .find_membership(user_id, requested)
            .await?
            .is_some()
        {
            return Ok(Some(requested));
        }

        let fallback = self
            .repos
            .memberships
            .memberships_for_user(user_id)
            .await?
            .first()
            .map(|m| m.organization_id);
        warn!(
            user_id = %user_id,
            requested = %requested,
            fallback = ?fallback,
            "user is not a member of the requested organization"
        );
        Ok(fallback)
    }

    /// Organizations `user_id` may post listings for, in membership order.
    pub async fn postable_organizations(&self, user_id: Uuid) -> ServiceResult<Vec<Organization>> {
        let memberships = self.repos.memberships.memberships_for_user(user_id).await?;

        let mut organizations = Vec::with_capacity(memberships.len());
        for membership in memberships {
            if let Some(org) = self
                .repos
                .organizations
                .get_organization(membership.organization_id)
                .await?
            {
                organizations.push(org);
            }
        }
        Ok(organizations)
    }

    /// Listings for the board, optionally narrowed to one category.
    ///
    /// An unknown category slug yields an empty board rather than an error.
    pub async fn browse(&self, category_slug: Option<&str>) -> ServiceResult<ListingBoard> {
        let categories = self.repos.categories.list_categories().await?;

        let (selected, listings) = match category_slug {
            None => (None, self.repos.listings.list_listings(None).await?),
            Some(slug) => match categories.iter().find(|c| c.slug == slug).cloned() {
                Some(category) => {
                    let listings = self.repos.listings.list_listings(Some(category.id)).await?;
                    (Some(category), listings)
                }
                None => (None, Vec::new()),
            },
        };

        Ok(ListingBoard {
            categories,
            selected,
            listings,
        })
    }

    /// Insert the categories whose slugs are not taken yet.
    ///
    /// Returns how many were inserted.
    pub async fn seed_categories(&self, categories: Vec<ListingCategory>) -> ServiceResult<usize> {
        let mut inserted = 0;
        for category in categories {
            if self
                .repos
                .categories
                .find_category_by_slug(&category.slug)
                .await?
                .is_some()
            {
                continue;
            }
            self.repos.categories.insert_category(category).await?;
            inserted += 1;
        }
        if inserted > 0 {
            info!(inserted, "listing categories seeded");
        }
        Ok(inserted)
    }

    async fn refund(&self, listing_id: Uuid, cause: &StoreError) {
        warn!(listing_id = %listing_id, error = %cause, "listing insert failed, refunding credits");
        if let Err(e) = self.repos.credits.refund_purchase(listing_id).await {
            warn!(listing_id = %listing_id, error = %e, "credit refund failed");
        }
    }
}
