//! Membership domain models
//!
//! This module provides the membership entity that links a user to an
//! organization with a role. A user holds at most one membership per
//! organization; the store enforces that pair's uniqueness.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::roles::MembershipRole;

/// Organization membership linking a user to an organization.
///
/// # Examples
///
/// ```
/// use uuid::Uuid;
/// use community_org::{MembershipRole, OrganizationMembership};
///
/// let user_id = Uuid::now_v7();
/// let org_id = Uuid::now_v7();
/// let membership = OrganizationMembership::new(user_id, org_id, MembershipRole::Member);
/// assert_eq!(membership.key(), (user_id, org_id));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationMembership {
    /// Unique membership ID
    pub id: Uuid,

    /// User ID
    pub user_id: Uuid,

    /// Organization ID
    pub organization_id: Uuid,

    /// Role within the organization
    pub role: MembershipRole,

    /// When the membership was created
    pub created_at: DateTime<Utc>,

    /// When the membership was last written
    pub updated_at: DateTime<Utc>,
}

impl OrganizationMembership {
    /// Creates a new organization membership.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user ID
    /// * `organization_id` - The organization ID
    /// * `role` - The user's role in the organization
    pub fn new(user_id: Uuid, organization_id: Uuid, role: MembershipRole) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            user_id,
            organization_id,
            role,
            created_at: now,
            updated_at: now,
        }
    }

    /// The (user, organization) pair this membership is unique on.
    pub fn key(&self) -> (Uuid, Uuid) {
        (self.user_id, self.organization_id)
    }

    /// Change the role, bumping `updated_at`.
    ///
    /// Returns `true` if the role actually changed.
    pub fn set_role(&mut self, role: MembershipRole) -> bool {
        self.updated_at = Utc::now();
        let changed = self.role != role;
        self.role = role;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_organization_membership_creation() {
        let org_id = Uuid::now_v7();
        let user_id = Uuid::now_v7();
        let membership = OrganizationMembership::new(user_id, org_id, MembershipRole::Admin);

        assert_eq!(membership.organization_id, org_id);
        assert_eq!(membership.user_id, user_id);
        assert_eq!(membership.role, MembershipRole::Admin);
        assert_eq!(membership.created_at, membership.updated_at);
    }

    #[test]
    fn test_set_role() {
        let mut membership =
            OrganizationMembership::new(Uuid::now_v7(), Uuid::now_v7(), MembershipRole::Guest);

        assert!(membership.set_role(MembershipRole::Member));
        assert_eq!(membership.role, MembershipRole::Member);
        assert!(!membership.set_role(MembershipRole::Member));
        assert!(membership.updated_at >= membership.created_at);
    }
}
