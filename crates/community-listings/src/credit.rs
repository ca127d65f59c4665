//! Credits
//!
//! A credit entitles its owner to post one listing. Spending marks it spent
//! and records what it paid for.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A consumable credit owned by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credit {
    /// Unique credit ID
    pub id: Uuid,

    /// Owning user
    pub user_id: Uuid,

    /// Whether the credit has been used
    pub spent: bool,

    /// When the credit was used
    pub spent_at: Option<DateTime<Utc>>,

    /// What the credit paid for (a listing ID)
    pub purchase_id: Option<Uuid>,

    /// When the credit was issued
    pub created_at: DateTime<Utc>,
}

impl Credit {
    /// Issues an unspent credit to a user.
    pub fn new(user_id: Uuid) -> Self {
        Self {
            id: Uuid::now_v7(),
            user_id,
            spent: false,
            spent_at: None,
            purchase_id: None,
            created_at: Utc::now(),
        }
    }

    /// Issues `count` unspent credits to a user.
    pub fn batch(user_id: Uuid, count: usize) -> Vec<Self> {
        (0..count).map(|_| Self::new(user_id)).collect()
    }

    /// Mark the credit spent on `purchase_id`.
    pub fn spend(&mut self, purchase_id: Uuid) {
        self.spent = true;
        self.spent_at = Some(Utc::now());
        self.purchase_id = Some(purchase_id);
    }

    /// Return a spent credit to the owner.
    pub fn refund(&mut self) {
        self.spent = false;
        self.spent_at = None;
        self.purchase_id = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spend_and_refund() {
        let mut credit = Credit::new(Uuid::now_v7());
        let listing_id = Uuid::now_v7();

        credit.spend(listing_id);
        assert!(credit.spent);
        assert_eq!(credit.purchase_id, Some(listing_id));
        assert!(credit.spent_at.is_some());

        credit.refund();
        assert!(!credit.spent);
        assert!(credit.purchase_id.is_none());
    }

    #[test]
    fn test_batch() {
        let user_id = Uuid::now_v7();
        let credits = Credit::batch(user_id, 20);

        assert_eq!(credits.len(), 20);
        assert!(credits.iter().all(|c| c.user_id == user_id && !c.spent));
    }
}
