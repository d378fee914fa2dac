//! Transaction records — human-readable summaries of balanced entry groups.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AccountId, Currency, TransactionId};

/// The business intent behind a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    /// External money entering a user account. Single credit leg, no
    /// counter-leg — the source is outside the modeled system.
    Topup,
    /// Outbound transfer. Debit on the source account, credit on the
    /// currency's clearing account; nets to zero.
    Transfer,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Topup => write!(f, "TOPUP"),
            Self::Transfer => write!(f, "TRANSFER"),
        }
    }
}

/// Summary record for one business event. The ledger entries sharing this
/// record's id are the ground truth; the record exists for listings and
/// display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub kind: TransactionKind,
    pub created_at: DateTime<Utc>,
    pub currency: Currency,
    /// Magnitude of the movement, always positive.
    pub absolute_amount_minor: i64,
    pub from_account_id: Option<AccountId>,
    pub to_account_id: Option<AccountId>,
    pub memo: Option<String>,
    pub counterparty_label: Option<String>,
}

impl Transaction {
    /// Whether this transaction touches the given account on either side.
    #[must_use]
    pub fn touches(&self, account_id: AccountId) -> bool {
        self.from_account_id == Some(account_id) || self.to_account_id == Some(account_id)
    }
}
