//! # openledger-types
//!
//! Shared types, errors, and configuration for the **OpenLedger** banking core.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`UserId`], [`AccountId`], [`EntryId`], [`TransactionId`]
//! - **Money**: [`Currency`], minor-unit conversion in [`money`]
//! - **User model**: [`User`], [`KycStatus`]
//! - **Account model**: [`Account`]
//! - **Ledger model**: [`LedgerEntry`], [`EntryDraft`]
//! - **Transaction model**: [`Transaction`], [`TransactionKind`]
//! - **Session model**: [`Session`], [`SessionToken`]
//! - **Configuration**: [`GatewayConfig`]
//! - **Errors**: [`OpenledgerError`] with `OL_ERR_` prefix codes
//! - **Constants**: system-wide limits and defaults

pub mod account;
pub mod config;
pub mod constants;
pub mod currency;
pub mod entry;
pub mod error;
pub mod ids;
pub mod money;
pub mod session;
pub mod transaction;
pub mod user;

// Re-export all primary types at crate root for ergonomic imports:
//   use openledger_types::{Account, LedgerEntry, Transaction, ...};

pub use account::*;
pub use config::*;
pub use currency::*;
pub use entry::*;
pub use error::*;
pub use ids::*;
pub use session::*;
pub use transaction::*;
pub use user::*;

// Constants are accessed via `openledger_types::constants::FOO` and money
// helpers via `openledger_types::money::*` (not re-exported to keep the
// crate root to nouns).
