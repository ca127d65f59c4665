//! # Community Chat
//!
//! Chat channels and the memberships that grant users access to them.
//!
//! Every organization gets a private group chat. Its name and slug are derived
//! from the organization slug, and a membership's role in the channel is
//! derived from the user's organization role:
//!
//! ```text
//! OrganizationMembership (admin)  ─→ ChatChannelMembership (mod)
//! OrganizationMembership (member) ─→ ChatChannelMembership (member)
//! OrganizationMembership (guest)  ─→ (no channel membership)
//! ```
//!
//! ```rust
//! use community_chat::{ChannelRole, ChatChannel};
//! use community_org::MembershipRole;
//!
//! assert_eq!(ChatChannel::private_group_name("acme"), "@acme private group chat");
//! assert_eq!(ChannelRole::for_membership(MembershipRole::Admin), Some(ChannelRole::Mod));
//! assert_eq!(ChannelRole::for_membership(MembershipRole::Guest), None);
//! ```

pub mod channel;
pub mod membership;

pub use channel::{ChannelStatus, ChannelVisibility, ChatChannel};
pub use membership::{ChannelRole, ChatChannelMembership};
