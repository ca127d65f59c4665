//! Chat channel domain model

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who may join a channel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ChannelVisibility {
    /// Anyone may join
    Open,

    /// Members are added explicitly
    InviteOnly,

    /// One-to-one conversation
    Direct,
}

impl ChannelVisibility {
    /// Get string representation of the visibility.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InviteOnly => "invite_only",
            Self::Direct => "direct",
        }
    }
}

impl Default for ChannelVisibility {
    fn default() -> Self {
        Self::Open
    }
}

/// Lifecycle status of a channel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChannelStatus {
    /// Accepting messages
    #[default]
    Active,

    /// Closed to new messages
    Inactive,
}

/// A named messaging space.
///
/// # Examples
///
/// ```
/// use community_chat::{ChannelVisibility, ChatChannel};
///
/// let channel = ChatChannel::private_group("acme");
/// assert_eq!(channel.channel_name, "@acme private group chat");
/// assert_eq!(channel.slug, "acme-private-group-chat");
/// assert_eq!(channel.visibility, ChannelVisibility::InviteOnly);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatChannel {
    /// Unique channel ID
    pub id: Uuid,

    /// Display name, matched exactly on lookup
    pub channel_name: String,

    /// Internal slug, unique across channels
    pub slug: String,

    /// Who may join
    pub visibility: ChannelVisibility,

    /// Channel status
    pub status: ChannelStatus,

    /// Last message time, used to order channel lists
    pub last_message_at: DateTime<Utc>,

    /// When the channel was created
    pub created_at: DateTime<Utc>,
}

impl ChatChannel {
    /// Creates a new active channel.
    ///
    /// `last_message_at` starts a week in the past so fresh channels sort
    /// below channels with real traffic.
    pub fn new(
        visibility: ChannelVisibility,
        slug: impl Into<String>,
        channel_name: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            channel_name: channel_name.into(),
            slug: slug.into(),
            visibility,
            status: ChannelStatus::Active,
            last_message_at: now - Duration::weeks(1),
            created_at: now,
        }
    }

    /// Creates the invite-only private group chat for an organization.
    pub fn private_group(org_slug: &str) -> Self {
        Self::new(
            ChannelVisibility::InviteOnly,
            Self::private_group_slug(org_slug),
            Self::private_group_name(org_slug),
        )
    }

    /// Display name of an organization's private group chat.
    pub fn private_group_name(org_slug: &str) -> String {
        format!("@{org_slug} private group chat")
    }

    /// Internal slug of an organization's private group chat.
    pub fn private_group_slug(org_slug: &str) -> String {
        format!("{org_slug}-private-group-chat")
    }

    /// Check if members must be added explicitly.
    pub fn is_invite_only(&self) -> bool {
        self.visibility == ChannelVisibility::InviteOnly
    }
}
