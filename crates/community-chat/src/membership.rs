//! Chat channel memberships
//!
//! A channel membership grants one user access to one channel. The pair
//! (user, channel) is unique; its role is overwritten every time the owning
//! organization membership is saved.

use chrono::{DateTime, Utc};
use community_org::MembershipRole;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of a user inside a chat channel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ChannelRole {
    /// Regular participant
    Member,

    /// Moderator
    Mod,
}

impl ChannelRole {
    /// Map an organization role onto the private group chat role.
    ///
    /// Admins moderate, members participate, guests are not added at all.
    pub fn for_membership(role: MembershipRole) -> Option<Self> {
        match role {
            MembershipRole::Guest => None,
            MembershipRole::Admin => Some(Self::Mod),
            MembershipRole::Member => Some(Self::Member),
        }
    }

    /// Get string representation of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Mod => "mod",
        }
    }
}

impl Default for ChannelRole {
    fn default() -> Self {
        Self::Member
    }
}

/// Membership of a user in a chat channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatChannelMembership {
    /// Unique membership ID
    pub id: Uuid,

    /// User ID
    pub user_id: Uuid,

    /// Channel ID
    pub chat_channel_id: Uuid,

    /// Role in the channel
    pub role: ChannelRole,

    /// When the user was added
    pub created_at: DateTime<Utc>,

    /// When the membership was last written
    pub updated_at: DateTime<Utc>,
}

impl ChatChannelMembership {
    /// Creates a new, unsaved channel membership.
    pub fn new(user_id: Uuid, chat_channel_id: Uuid, role: ChannelRole) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            user_id,
            chat_channel_id,
            role,
            created_at: now,
            updated_at: now,
        }
    }

    /// The (user, channel) pair this membership is unique on.
    pub fn key(&self) -> (Uuid, Uuid) {
        (self.user_id, self.chat_channel_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_mapping() {
        assert_eq!(
            ChannelRole::for_membership(MembershipRole::Admin),
            Some(ChannelRole::Mod)
        );
        assert_eq!(
            ChannelRole::for_membership(MembershipRole::Member),
            Some(ChannelRole::Member)
        );
        assert_eq!(ChannelRole::for_membership(MembershipRole::Guest), None);
    }

    #[test]
    fn test_channel_membership_creation() {
        let user_id = Uuid::now_v7();
        let channel_id = Uuid::now_v7();
        let membership = ChatChannelMembership::new(user_id, channel_id, ChannelRole::Mod);

        assert_eq!(membership.key(), (user_id, channel_id));
        assert_eq!(membership.role.as_str(), "mod");
    }
}
