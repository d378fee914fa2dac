//! Account directory — owns the set of accounts and their static attributes.
//!
//! The directory knows nothing about balances; it hands out account rows and
//! lazily provisions the per-currency clearing accounts owned by the system
//! principal.

use std::collections::HashMap;

use openledger_types::{
    Account, AccountId, Currency, OpenledgerError, Result, UserId, constants,
};

/// Owner of all [`Account`] rows. Accounts are never deleted; iteration is
/// in creation order.
#[derive(Debug, Default)]
pub struct AccountDirectory {
    /// All accounts, in creation order.
    accounts: Vec<Account>,
    /// Index into `accounts` by id.
    by_id: HashMap<AccountId, usize>,
    /// Lazily created clearing account per currency.
    clearing: HashMap<Currency, AccountId>,
}

impl AccountDirectory {
    /// Create an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new account owned by `owner`.
    pub fn create_account(
        &mut self,
        owner: UserId,
        currency: Currency,
        display_name: impl Into<String>,
    ) -> Account {
        let account = Account::new(owner, currency, display_name);
        tracing::info!(
            account = %account.id,
            owner = %owner,
            currency = %currency,
            "account created"
        );
        self.by_id.insert(account.id, self.accounts.len());
        self.accounts.push(account.clone());
        account
    }

    /// Look up an account by id.
    ///
    /// # Errors
    /// [`OpenledgerError::AccountNotFound`] if the id is unknown.
    pub fn get(&self, id: AccountId) -> Result<&Account> {
        self.by_id
            .get(&id)
            .map(|&idx| &self.accounts[idx])
            .ok_or(OpenledgerError::AccountNotFound(id))
    }

    /// All accounts owned by `owner`, in creation order. Clearing accounts
    /// only show up for the system principal.
    #[must_use]
    pub fn list_owned(&self, owner: UserId) -> Vec<Account> {
        self.accounts
            .iter()
            .filter(|a| a.owner_user_id == owner)
            .cloned()
            .collect()
    }

    /// The clearing account for `currency`, created on first use. Idempotent:
    /// repeated calls return the same account.
    pub fn get_or_create_clearing_account(&mut self, currency: Currency) -> AccountId {
        if let Some(&id) = self.clearing.get(&currency) {
            return id;
        }
        let account = self.create_account(
            UserId::SYSTEM,
            currency,
            constants::clearing_account_name(currency.code()),
        );
        self.clearing.insert(currency, account.id);
        account.id
    }

    /// The clearing account for `currency`, if it has been created.
    #[must_use]
    pub fn clearing_account(&self, currency: Currency) -> Option<AccountId> {
        self.clearing.get(&currency).copied()
    }

    /// Number of accounts in the directory (clearing accounts included).
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
