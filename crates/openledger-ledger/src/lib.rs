//! # openledger-ledger
//!
//! **Books plane**: the account directory and the append-only ledger store.
//!
//! ## Architecture
//!
//! - [`AccountDirectory`] owns account rows and their static attributes,
//!   including the lazily provisioned per-currency clearing accounts.
//! - [`LedgerStore`] owns every ledger entry and transaction record. Balances
//!   are derived from the entry log; the cached running balance is an
//!   optimization kept in lockstep with every append and proven against the
//!   fold by [`LedgerStore::reconcile`].
//!
//! Neither type synchronizes: the posting plane composes them under one lock
//! so that balance checks and appends form a single critical section.

pub mod directory;
pub mod store;

pub use directory::AccountDirectory;
pub use store::LedgerStore;
