//! Account model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AccountId, Currency, UserId};

/// A currency-denominated account. Owned by exactly one user (or by the
/// system principal for clearing accounts). The currency is fixed for the
/// account's lifetime; every ledger entry against it shares that currency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub owner_user_id: UserId,
    pub display_name: String,
    pub currency: Currency,
    pub created_at: DateTime<Utc>,
}

impl Account {
    #[must_use]
    pub fn new(owner_user_id: UserId, currency: Currency, display_name: impl Into<String>) -> Self {
        Self {
            id: AccountId::new(),
            owner_user_id,
            display_name: display_name.into(),
            currency,
            created_at: Utc::now(),
        }
    }

    /// Whether this account belongs to the reserved system principal
    /// (clearing accounts).
    #[must_use]
    pub fn is_system_owned(&self) -> bool {
        self.owner_user_id.is_system()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_account_is_not_system_owned() {
        let account = Account::new(UserId::new(), Currency::Usd, "Checking");
        assert!(!account.is_system_owned());
    }

    #[test]
    fn clearing_account_is_system_owned() {
        let account = Account::new(UserId::SYSTEM, Currency::Eur, "EUR clearing");
        assert!(account.is_system_owned());
    }

    #[test]
    fn serde_roundtrip() {
        let account = Account::new(UserId::new(), Currency::Gbp, "Savings");
        let json = serde_json::to_string(&account).unwrap();
        let back: Account = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, account.id);
        assert_eq!(back.currency, Currency::Gbp);
    }
}
