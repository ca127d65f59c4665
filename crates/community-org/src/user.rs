//! User domain model

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A community member.
///
/// `organization_info_updated_at` is bumped every time the user's set of
/// organization memberships changes. Downstream caches compare it against
/// their own timestamps to decide when to refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID
    pub id: Uuid,

    /// Unique handle
    pub username: String,

    /// Display name
    pub name: String,

    /// Last time the user's organization memberships changed
    pub organization_info_updated_at: Option<DateTime<Utc>>,

    /// When the user signed up
    pub created_at: DateTime<Utc>,

    /// When the user record was last written
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user with no organization history.
    pub fn new(username: impl Into<String>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            username: username.into(),
            name: name.into(),
            organization_info_updated_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Record that the user's organization memberships changed at `at`.
    ///
    /// The stored timestamp always moves strictly forward: if `at` is not
    /// later than the current value (clock skew, or two touches inside the
    /// clock's resolution) it is advanced by one microsecond past it.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::Utc;
    /// use community_org::User;
    ///
    /// let mut user = User::new("ben", "Ben");
    /// let now = Utc::now();
    /// let first = user.touch_organization_info(now);
    /// let second = user.touch_organization_info(now);
    /// assert!(second > first);
    /// ```
    pub fn touch_organization_info(&mut self, at: DateTime<Utc>) -> DateTime<Utc> {
        let next = match self.organization_info_updated_at {
            Some(previous) if previous >= at => previous + Duration::microseconds(1),
            _ => at,
        };
        self.organization_info_updated_at = Some(next);
        if next > self.updated_at {
            self.updated_at = next;
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let user = User::new("jess", "Jess Lee");

        assert_eq!(user.username, "jess");
        assert_eq!(user.name, "Jess Lee");
        assert!(user.organization_info_updated_at.is_none());
    }

    #[test]
    fn test_touch_sets_timestamp() {
        let mut user = User::new("jess", "Jess Lee");
        let at = Utc::now() + Duration::seconds(5);

        assert_eq!(user.touch_organization_info(at), at);
        assert_eq!(user.organization_info_updated_at, Some(at));
        assert_eq!(user.updated_at, at);
    }

    #[test]
    fn test_touch_is_strictly_monotonic() {
        let mut user = User::new("jess", "Jess Lee");
        let at = Utc::now();

        let first = user.touch_organization_info(at);
        let earlier = user.touch_organization_info(at - Duration::seconds(10));

        assert!(earlier > first);
    }
}
