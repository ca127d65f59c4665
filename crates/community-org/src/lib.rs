//! # Community Organization Management
//!
//! This crate provides the user, organization and membership models for the
//! community platform.
//!
//! ## Overview
//!
//! The community-org crate handles:
//! - **Users**: Community members, including the organization-info timestamp
//!   downstream caches key on
//! - **Organizations**: Groups identified by a stable slug
//! - **Memberships**: User-organization relationships with a role
//! - **Roles**: The closed admin/member/guest enumeration
//!
//! ## Architecture
//!
//! ```text
//! User
//!   └─ OrganizationMembership (role) ─→ Organization (slug)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use community_org::{MembershipRole, Organization, OrganizationMembership, User};
//!
//! let user = User::new("ben", "Ben Halpern");
//! let org = Organization::new("Dev Community", "devcommunity").unwrap();
//! let membership = OrganizationMembership::new(user.id, org.id, MembershipRole::Admin);
//! assert!(!membership.role.is_guest());
//! ```
//!
//! ## Cross-Crate Integration
//!
//! - `community-chat`: Maps membership roles onto chat-channel roles
//! - `community-service`: Runs the membership lifecycle on top of these models

pub mod error;
pub mod membership;
pub mod organization;
pub mod roles;
pub mod user;

// Re-export main types for convenience
pub use error::{OrgError, OrgResult};
pub use membership::OrganizationMembership;
pub use organization::Organization;
pub use roles::MembershipRole;
pub use user::User;
