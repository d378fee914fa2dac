//! Ledger entries — the ground truth of the books.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AccountId, EntryId, TransactionId};

/// One signed movement against exactly one account. Append-only: once
/// committed, an entry is never mutated or deleted. Positive = credit,
/// negative = debit, always in the owning account's currency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: EntryId,
    pub transaction_id: TransactionId,
    pub account_id: AccountId,
    pub signed_amount_minor: i64,
    pub created_at: DateTime<Utc>,
    pub memo: Option<String>,
    pub counterparty_label: Option<String>,
}

impl LedgerEntry {
    /// Whether this entry credits its account.
    #[must_use]
    pub fn is_credit(&self) -> bool {
        self.signed_amount_minor > 0
    }
}

/// An entry as handed to the store for committing: everything but the id and
/// timestamp, which the store assigns at append time.
#[derive(Debug, Clone)]
pub struct EntryDraft {
    pub account_id: AccountId,
    pub signed_amount_minor: i64,
    pub memo: Option<String>,
    pub counterparty_label: Option<String>,
}

impl EntryDraft {
    #[must_use]
    pub fn new(account_id: AccountId, signed_amount_minor: i64) -> Self {
        Self {
            account_id,
            signed_amount_minor,
            memo: None,
            counterparty_label: None,
        }
    }

    #[must_use]
    pub fn with_memo(mut self, memo: Option<String>) -> Self {
        self.memo = memo;
        self
    }

    #[must_use]
    pub fn with_counterparty(mut self, label: Option<String>) -> Self {
        self.counterparty_label = label;
        self
    }
}
