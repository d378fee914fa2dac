//! Append-only ledger store — the sole source of truth for balances.
//!
//! The store owns every [`LedgerEntry`] and [`Transaction`] row. Committed
//! entries are never mutated or deleted. Balances are derived: the fold of
//! `signed_amount_minor` over an account's entries is the truth, and the
//! cached running balance maintained alongside every append must always
//! agree with it — [`LedgerStore::reconcile`] verifies that.
//!
//! Batch validation happens here, not in callers:
//! - a `TRANSFER` batch must net to zero minor units
//! - a `TOPUP` batch is exactly one positive credit matching the recorded
//!   amount (money entering from outside the modeled system)
//! - a `TransactionId` commits at most once
//!
//! `append` is the atomicity unit of the whole system: either every entry in
//! the batch is recorded or none is.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use openledger_types::{
    AccountId, EntryDraft, EntryId, LedgerEntry, OpenledgerError, Result, Transaction,
    TransactionId, TransactionKind,
};

/// Owner of all ledger entries and transaction records.
#[derive(Debug, Default)]
pub struct LedgerStore {
    /// All committed entries, in commit order.
    entries: Vec<LedgerEntry>,
    /// Index into `entries` per account, ascending by creation order.
    by_account: HashMap<AccountId, Vec<usize>>,
    /// Cached running balance per account. Updated transactionally with
    /// every append; `reconcile` proves it equal to the fold.
    cached_balances: HashMap<AccountId, i64>,
    /// All transaction records, in commit order.
    transactions: Vec<Transaction>,
    /// Transaction ids that have committed (duplicate-append guard).
    committed: HashSet<TransactionId>,
}

impl LedgerStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current balance of an account in minor units. Missing accounts fold
    /// to zero. Reads the cached running balance, which `append` keeps in
    /// lockstep with the entry log.
    #[must_use]
    pub fn balance_minor(&self, account_id: AccountId) -> i64 {
        self.cached_balances.get(&account_id).copied().unwrap_or(0)
    }

    /// Balance computed directly as the fold over the entry log. This is the
    /// source of truth the cache is measured against.
    #[must_use]
    pub fn fold_balance_minor(&self, account_id: AccountId) -> i64 {
        self.list_entries(account_id)
            .map(|e| e.signed_amount_minor)
            .sum()
    }

    /// Verify every cached balance against the fold.
    ///
    /// # Errors
    /// [`OpenledgerError::BalanceReconciliationFailed`] on the first account
    /// whose cache and fold disagree. Divergence means the books can no
    /// longer be trusted.
    pub fn reconcile(&self) -> Result<()> {
        for (&account, &cached) in &self.cached_balances {
            let fold = self.fold_balance_minor(account);
            if cached != fold {
                tracing::warn!(
                    %account,
                    cached_minor = cached,
                    fold_minor = fold,
                    "cached balance diverged from entry fold"
                );
                return Err(OpenledgerError::BalanceReconciliationFailed {
                    account,
                    cached_minor: cached,
                    fold_minor: fold,
                });
            }
        }
        Ok(())
    }

    /// Atomically commit a transaction record and its entry batch.
    ///
    /// Validates the whole batch first; on any failure nothing is recorded.
    /// Entry ids and timestamps are assigned here, at commit time.
    ///
    /// # Errors
    /// - [`OpenledgerError::DuplicateTransaction`] if the id already committed
    /// - [`OpenledgerError::EmptyBatch`] if the batch has no entries
    /// - [`OpenledgerError::MalformedBatch`] if the shape does not match the
    ///   transaction kind, or a balance would leave `i64` range
    /// - [`OpenledgerError::UnbalancedBatch`] if a transfer does not net to zero
    pub fn append(
        &mut self,
        transaction: Transaction,
        drafts: Vec<EntryDraft>,
    ) -> Result<Vec<LedgerEntry>> {
        self.validate_batch(&transaction, &drafts)?;

        let now = Utc::now();
        let mut committed = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let entry = LedgerEntry {
                id: EntryId::new(),
                transaction_id: transaction.id,
                account_id: draft.account_id,
                signed_amount_minor: draft.signed_amount_minor,
                created_at: now,
                memo: draft.memo,
                counterparty_label: draft.counterparty_label,
            };
            self.by_account
                .entry(entry.account_id)
                .or_default()
                .push(self.entries.len());
            *self.cached_balances.entry(entry.account_id).or_insert(0) +=
                entry.signed_amount_minor;
            self.entries.push(entry.clone());
            committed.push(entry);
        }

        tracing::debug!(
            transaction = %transaction.id,
            kind = %transaction.kind,
            entries = committed.len(),
            "batch committed"
        );
        self.committed.insert(transaction.id);
        self.transactions.push(transaction);
        Ok(committed)
    }

    /// Entries for one account: lazy, ascending by creation order, and
    /// restartable — every call starts a fresh pass.
    pub fn list_entries(&self, account_id: AccountId) -> impl Iterator<Item = &LedgerEntry> + '_ {
        self.by_account
            .get(&account_id)
            .into_iter()
            .flatten()
            .map(|&idx| &self.entries[idx])
    }

    /// All committed entries sharing a transaction id.
    #[must_use]
    pub fn entries_for_transaction(&self, id: TransactionId) -> Vec<&LedgerEntry> {
        self.entries
            .iter()
            .filter(|e| e.transaction_id == id)
            .collect()
    }

    /// Transactions touching any of `accounts`, newest first, capped at
    /// `limit`.
    #[must_use]
    pub fn transactions_for_accounts(
        &self,
        accounts: &HashSet<AccountId>,
        limit: usize,
    ) -> Vec<Transaction> {
        self.transactions
            .iter()
            .rev()
            .filter(|tx| accounts.iter().any(|&a| tx.touches(a)))
            .take(limit)
            .cloned()
            .collect()
    }

    /// Number of committed entries.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of committed transactions.
    #[must_use]
    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    fn validate_batch(&self, transaction: &Transaction, drafts: &[EntryDraft]) -> Result<()> {
        if self.committed.contains(&transaction.id) {
            return Err(OpenledgerError::DuplicateTransaction(transaction.id));
        }
        if drafts.is_empty() {
            return Err(OpenledgerError::EmptyBatch(transaction.id));
        }

        match transaction.kind {
            TransactionKind::Topup => {
                let [draft] = drafts else {
                    return Err(OpenledgerError::MalformedBatch {
                        transaction: transaction.id,
                        reason: format!("topup must have exactly one leg, got {}", drafts.len()),
                    });
                };
                if draft.signed_amount_minor != transaction.absolute_amount_minor
                    || draft.signed_amount_minor <= 0
                {
                    return Err(OpenledgerError::MalformedBatch {
                        transaction: transaction.id,
                        reason: format!(
                            "topup leg of {} does not match recorded amount {}",
                            draft.signed_amount_minor, transaction.absolute_amount_minor
                        ),
                    });
                }
            }
            TransactionKind::Transfer => {
                let net: i128 = drafts
                    .iter()
                    .map(|d| i128::from(d.signed_amount_minor))
                    .sum();
                if net != 0 {
                    let net_minor = i64::try_from(net).unwrap_or(i64::MAX);
                    return Err(OpenledgerError::UnbalancedBatch {
                        transaction: transaction.id,
                        net_minor,
                    });
                }
            }
        }

        // Per-account deltas must keep every balance within i64 range, so the
        // commit loop below cannot fail halfway through.
        let mut deltas: HashMap<AccountId, i128> = HashMap::new();
        for draft in drafts {
            *deltas.entry(draft.account_id).or_insert(0) += i128::from(draft.signed_amount_minor);
        }
        for (account, delta) in deltas {
            let next = i128::from(self.balance_minor(account)) + delta;
            if i64::try_from(next).is_err() {
                return Err(OpenledgerError::MalformedBatch {
                    transaction: transaction.id,
                    reason: format!("balance of account {account} would leave i64 range"),
                });
            }
        }
        Ok(())
    }
}
