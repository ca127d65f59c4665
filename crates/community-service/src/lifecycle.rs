//! Organization membership lifecycle
//!
//! Every membership write goes through [`MembershipLifecycle`], which runs the
//! follow-up work synchronously once the write has been stored:
//!
//! ```text
//! create ─→ insert ─→ sync private group chat ─→ touch user
//! update ─→ update ─→ sync private group chat
//! destroy ─→ delete ─────────────────────────────→ touch user
//! ```
//!
//! The chat sync is best-effort: its failures are logged and the membership
//! write still succeeds. Touching the user is part of the operation and its
//! failure is returned.

use chrono::Utc;
use community_chat::{ChannelRole, ChannelVisibility, ChatChannel, ChatChannelMembership};
use community_org::{MembershipRole, OrganizationMembership, User};
use community_store::Repositories;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};

/// Runs membership writes and their side effects.
#[derive(Debug, Clone)]
pub struct MembershipLifecycle {
    repos: Repositories,
}

impl MembershipLifecycle {
    /// Create a lifecycle service over the given repositories.
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    /// Add a user to an organization.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the user or organization does not exist
    /// - `Conflict` if the user already has a membership in the organization
    pub async fn create_membership(
        &self,
        user_id: Uuid,
        organization_id: Uuid,
        role: MembershipRole,
    ) -> ServiceResult<OrganizationMembership> {
        if self.repos.users.get_user(user_id).await?.is_none() {
            return Err(ServiceError::not_found("user", user_id));
        }
        if self
            .repos
            .organizations
            .get_organization(organization_id)
            .await?
            .is_none()
        {
            return Err(ServiceError::not_found("organization", organization_id));
        }

        let membership = self
            .repos
            .memberships
            .insert_membership(OrganizationMembership::new(user_id, organization_id, role))
            .await?;
        info!(
            membership_id = %membership.id,
            user_id = %user_id,
            organization_id = %organization_id,
            role = %role,
            "organization membership created"
        );

        self.after_save(&membership).await;
        self.touch_user(user_id).await?;
        Ok(membership)
    }

    /// Change a member's role.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the membership does not exist
    pub async fn update_membership_role(
        &self,
        membership_id: Uuid,
        role: MembershipRole,
    ) -> ServiceResult<OrganizationMembership> {
        let mut membership = self
            .repos
            .memberships
            .get_membership(membership_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("organization membership", membership_id))?;

        let previous = membership.role;
        membership.set_role(role);
        let membership = self.repos.memberships.update_membership(membership).await?;
        info!(
            membership_id = %membership.id,
            from = %previous,
            to = %role,
            "organization membership updated"
        );

        self.after_save(&membership).await;
        Ok(membership)
    }

    /// Remove a user from an organization.
    ///
    /// The user's private group chat membership is left as it is.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the membership does not exist
    pub async fn destroy_membership(
        &self,
        membership_id: Uuid,
    ) -> ServiceResult<OrganizationMembership> {
        let membership = self
            .repos
            .memberships
            .delete_membership(membership_id)
            .await?;
        info!(
            membership_id = %membership.id,
            user_id = %membership.user_id,
            organization_id = %membership.organization_id,
            "organization membership destroyed"
        );

        self.touch_user(membership.user_id).await?;
        Ok(membership)
    }

    /// Upsert the member's seat in the organization's private group chat.
    ///
    /// Returns `None` without touching any channel for guest memberships.
    /// Otherwise the channel named `@{slug} private group chat` is reused or
    /// created (invite-only, slug `{slug}-private-group-chat`) and the user's
    /// channel membership is created or has its role overwritten.
    pub async fn sync_chat_channel(
        &self,
        membership: &OrganizationMembership,
    ) -> ServiceResult<Option<ChatChannelMembership>> {
        let Some(role) = ChannelRole::for_membership(membership.role) else {
            debug!(membership_id = %membership.id, "guest membership, skipping chat sync");
            return Ok(None);
        };

        let organization = self
            .repos
            .organizations
            .get_organization(membership.organization_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("organization", membership.organization_id))?;

        let name = ChatChannel::private_group_name(&organization.slug);
        let channel = match self.repos.channels.find_channel_by_name(&name).await? {
            Some(channel) => channel,
            None => {
                self.repos
                    .channels
                    .find_or_create_channel(
                        ChannelVisibility::InviteOnly,
                        &ChatChannel::private_group_slug(&organization.slug),
                        &name,
                    )
                    .await?
            }
        };

        let mut seat = self
            .repos
            .channel_memberships
            .find_or_initialize_channel_membership(membership.user_id, channel.id, role)
            .await?;
        seat.role = role;
        let seat = self
            .repos
            .channel_memberships
            .save_channel_membership(seat)
            .await?;
        debug!(
            chat_channel_id = %channel.id,
            user_id = %seat.user_id,
            role = seat.role.as_str(),
            "chat channel membership upserted"
        );
        Ok(Some(seat))
    }

    async fn after_save(&self, membership: &OrganizationMembership) {
        if let Err(e) = self.sync_chat_channel(membership).await {
            warn!(
                membership_id = %membership.id,
                error = %e,
                "failed to sync private group chat membership"
            );
        }
    }

    async fn touch_user(&self, user_id: Uuid) -> ServiceResult<User> {
        let user = self
            .repos
            .users
            .touch_organization_info(user_id, Utc::now())
            .await?;
        debug!(user_id = %user_id, "organization info touched");
        Ok(user)
    }
}
