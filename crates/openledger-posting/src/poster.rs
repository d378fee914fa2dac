//! The transaction poster.
//!
//! Turns a business intent (top-up, transfer) into a balanced, atomic ledger
//! write while enforcing ownership and sufficiency. Validation order per
//! operation:
//!
//! 1. resolve the account (`AccountNotFound`)
//! 2. ownership (`Forbidden`)
//! 3. minor-unit conversion (`InvalidAmount`)
//! 4. transfers only: funds check (`InsufficientFunds`)
//!
//! The poster owns the directory and the store behind one `RwLock`; every
//! posting holds the write lock from the first validation through the
//! append, so the funds check and the commit form a single critical section.
//! Two transfers racing on the same account can therefore never jointly
//! overdraw it. Reads take the read lock and never block each other.

use std::collections::HashSet;
use std::sync::RwLock;

use chrono::Utc;
use openledger_ledger::{AccountDirectory, LedgerStore};
use openledger_types::{
    Account, AccountId, Currency, EntryDraft, LedgerEntry, OpenledgerError, Result, Transaction,
    TransactionId, TransactionKind, UserId, money,
};
use rust_decimal::Decimal;

/// The directory and store, composed under one lock by [`Poster`].
#[derive(Debug, Default)]
struct Books {
    directory: AccountDirectory,
    store: LedgerStore,
}

/// Thread-safe posting engine over the books plane.
#[derive(Debug, Default)]
pub struct Poster {
    books: RwLock<Books>,
}

impl Poster {
    /// Create a poster over empty books.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =================================================================
    // Account operations
    // =================================================================

    /// Create an account owned by `owner`.
    pub fn create_account(
        &self,
        owner: UserId,
        currency: Currency,
        display_name: impl Into<String>,
    ) -> Account {
        let mut books = self.books.write().unwrap();
        books.directory.create_account(owner, currency, display_name)
    }

    /// Resolve an account by id.
    ///
    /// # Errors
    /// [`OpenledgerError::AccountNotFound`] if the id is unknown.
    pub fn account(&self, id: AccountId) -> Result<Account> {
        let books = self.books.read().unwrap();
        books.directory.get(id).cloned()
    }

    /// Accounts owned by `owner`, in creation order.
    #[must_use]
    pub fn list_accounts(&self, owner: UserId) -> Vec<Account> {
        let books = self.books.read().unwrap();
        books.directory.list_owned(owner)
    }

    /// The clearing account for `currency`, if one has been provisioned.
    #[must_use]
    pub fn clearing_account_id(&self, currency: Currency) -> Option<AccountId> {
        let books = self.books.read().unwrap();
        books.directory.clearing_account(currency)
    }

    // =================================================================
    // Ledger reads
    // =================================================================

    /// Current balance of an account in minor units.
    ///
    /// # Errors
    /// [`OpenledgerError::AccountNotFound`] if the account does not exist.
    pub fn balance_minor(&self, account_id: AccountId) -> Result<i64> {
        let books = self.books.read().unwrap();
        books.directory.get(account_id)?;
        Ok(books.store.balance_minor(account_id))
    }

    /// Snapshot of an account's entries, ascending by creation order.
    ///
    /// # Errors
    /// [`OpenledgerError::AccountNotFound`] if the account does not exist.
    pub fn list_entries(&self, account_id: AccountId) -> Result<Vec<LedgerEntry>> {
        let books = self.books.read().unwrap();
        books.directory.get(account_id)?;
        Ok(books.store.list_entries(account_id).cloned().collect())
    }

    /// Transactions touching any of the user's accounts, newest first,
    /// capped at `limit`.
    #[must_use]
    pub fn list_transactions_for_user(&self, user: UserId, limit: usize) -> Vec<Transaction> {
        let books = self.books.read().unwrap();
        let accounts: HashSet<AccountId> = books
            .directory
            .list_owned(user)
            .iter()
            .map(|a| a.id)
            .collect();
        books.store.transactions_for_accounts(&accounts, limit)
    }

    /// Verify every cached balance against the entry fold.
    pub fn reconcile(&self) -> Result<()> {
        let books = self.books.read().unwrap();
        books.store.reconcile()
    }

    // =================================================================
    // Postings
    // =================================================================

    /// Post an external top-up into one of the acting user's accounts.
    ///
    /// Single credit leg, no counter-leg: the money enters from outside the
    /// modeled system.
    pub fn post_topup(
        &self,
        acting_user: UserId,
        to_account: AccountId,
        amount_major: Decimal,
        memo: Option<String>,
        counterparty: Option<String>,
    ) -> Result<Transaction> {
        let mut books = self.books.write().unwrap();

        let account = books.directory.get(to_account)?;
        let currency = account.currency;
        if account.owner_user_id != acting_user {
            return Err(OpenledgerError::Forbidden {
                account: to_account,
                user: acting_user,
            });
        }
        let amount_minor = money::minor_from_major(currency, amount_major)?;

        let transaction = Transaction {
            id: TransactionId::new(),
            kind: TransactionKind::Topup,
            created_at: Utc::now(),
            currency,
            absolute_amount_minor: amount_minor,
            from_account_id: None,
            to_account_id: Some(to_account),
            memo: memo.clone(),
            counterparty_label: counterparty.clone(),
        };
        books.store.append(
            transaction.clone(),
            vec![
                EntryDraft::new(to_account, amount_minor)
                    .with_memo(memo)
                    .with_counterparty(counterparty),
            ],
        )?;

        tracing::info!(
            transaction = %transaction.id,
            account = %to_account,
            amount_minor,
            %currency,
            "topup posted"
        );
        Ok(transaction)
    }

    /// Post an outbound transfer from one of the acting user's accounts.
    ///
    /// Debits the source and credits the currency's clearing account in the
    /// same batch, so the transaction nets to zero. The funds check and the
    /// append happen under one write lock.
    pub fn post_transfer(
        &self,
        acting_user: UserId,
        from_account: AccountId,
        counterparty_label: impl Into<String>,
        amount_major: Decimal,
        memo: Option<String>,
    ) -> Result<Transaction> {
        let counterparty = counterparty_label.into();
        let mut books = self.books.write().unwrap();

        let account = books.directory.get(from_account)?;
        let currency = account.currency;
        if account.owner_user_id != acting_user {
            return Err(OpenledgerError::Forbidden {
                account: from_account,
                user: acting_user,
            });
        }
        let amount_minor = money::minor_from_major(currency, amount_major)?;

        let available = books.store.balance_minor(from_account);
        if available < amount_minor {
            tracing::warn!(
                account = %from_account,
                needed_minor = amount_minor,
                available_minor = available,
                "transfer rejected: insufficient funds"
            );
            return Err(OpenledgerError::InsufficientFunds {
                needed_minor: amount_minor,
                available_minor: available,
            });
        }

        let clearing = books.directory.get_or_create_clearing_account(currency);
        let transaction = Transaction {
            id: TransactionId::new(),
            kind: TransactionKind::Transfer,
            created_at: Utc::now(),
            currency,
            absolute_amount_minor: amount_minor,
            from_account_id: Some(from_account),
            to_account_id: Some(clearing),
            memo: memo.clone(),
            counterparty_label: Some(counterparty.clone()),
        };
        books.store.append(
            transaction.clone(),
            vec![
                EntryDraft::new(from_account, -amount_minor)
                    .with_memo(memo.clone())
                    .with_counterparty(Some(counterparty.clone())),
                EntryDraft::new(clearing, amount_minor)
                    .with_memo(memo)
                    .with_counterparty(Some(counterparty)),
            ],
        )?;

        tracing::info!(
            transaction = %transaction.id,
            from = %from_account,
            to = %clearing,
            amount_minor,
            %currency,
            "transfer posted"
        );
        Ok(transaction)
    }
}
