//! Organization membership roles
//!
//! This module defines the closed role enumeration for organization
//! memberships. The role controls both organizational privilege and the
//! derived chat-channel role.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OrgError;

/// User role within an organization.
///
/// The hierarchy is: Guest < Member < Admin
///
/// # Permission Model
///
/// - **Guest**: Listed on the organization but excluded from its private chat
/// - **Member**: Regular member, joins the private chat as a member
/// - **Admin**: Manages the organization, moderates the private chat
///
/// # Examples
///
/// ```
/// use community_org::MembershipRole;
///
/// assert!(MembershipRole::Admin.is_admin());
/// assert!(MembershipRole::Guest.is_guest());
/// assert!(MembershipRole::Member > MembershipRole::Guest);
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MembershipRole {
    /// Limited visibility, no private chat
    Guest = 0,

    /// Regular organization member
    Member = 1,

    /// Organization administrator
    Admin = 2,
}

impl MembershipRole {
    /// All roles, lowest first.
    pub const ALL: [MembershipRole; 3] = [Self::Guest, Self::Member, Self::Admin];

    /// Check if this role has admin privileges.
    pub fn is_admin(&self) -> bool {
        *self >= MembershipRole::Admin
    }

    /// Check if this is a guest membership.
    ///
    /// Guests never receive a chat-channel membership.
    pub fn is_guest(&self) -> bool {
        matches!(self, Self::Guest)
    }

    /// Parse role from string representation.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`OrgError::InvalidRole`] for anything outside admin/member/guest.
    ///
    /// # Examples
    ///
    /// ```
    /// use community_org::MembershipRole;
    ///
    /// assert_eq!(MembershipRole::parse("admin").unwrap(), MembershipRole::Admin);
    /// assert_eq!(MembershipRole::parse(" Member ").unwrap(), MembershipRole::Member);
    /// assert!(MembershipRole::parse("owner").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, OrgError> {
        match s.trim().to_lowercase().as_str() {
            "guest" => Ok(Self::Guest),
            "member" => Ok(Self::Member),
            "admin" => Ok(Self::Admin),
            _ => Err(OrgError::InvalidRole(s.to_string())),
        }
    }

    /// Get string representation of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Guest => "guest",
            Self::Member => "member",
            Self::Admin => "admin",
        }
    }
}

impl Default for MembershipRole {
    fn default() -> Self {
        Self::Member
    }
}

impl fmt::Display for MembershipRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MembershipRole {
    type Err = OrgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_hierarchy() {
        assert!(MembershipRole::Admin > MembershipRole::Member);
        assert!(MembershipRole::Member > MembershipRole::Guest);
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(MembershipRole::parse("ADMIN"), Ok(MembershipRole::Admin));
        assert_eq!(MembershipRole::parse("guest"), Ok(MembershipRole::Guest));
        assert_eq!(
            MembershipRole::parse("moderator"),
            Err(OrgError::InvalidRole("moderator".to_string()))
        );
        assert!(MembershipRole::parse("").is_err());
    }

    #[test]
    fn test_role_round_trips_through_as_str() {
        for role in MembershipRole::ALL {
            assert_eq!(role.as_str().parse::<MembershipRole>(), Ok(role));
        }
    }

    #[test]
    fn test_role_serde_is_snake_case() {
        let json = serde_json::to_string(&MembershipRole::Admin).unwrap();
        assert_eq!(json, "\"admin\"");

        let parsed: Result<MembershipRole, _> = serde_json::from_str("\"owner\"");
        assert!(parsed.is_err());
    }
}
