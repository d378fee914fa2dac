//! Error types for the OpenLedger core.
//!
//! All errors use the `OL_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Session / credential errors
//! - 2xx: Account errors
//! - 3xx: Amount errors
//! - 4xx: Funds errors
//! - 5xx: Ledger / batch errors
//! - 6xx: User / KYC errors
//! - 9xx: General / internal errors
//!
//! Every error is terminal and synchronous: the core never retries, and a
//! failed posting leaves zero new entries behind.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{AccountId, KycStatus, TransactionId, UserId};

/// Central error enum for all OpenLedger operations.
#[derive(Debug, Error)]
pub enum OpenledgerError {
    // =================================================================
    // Session / Credential Errors (1xx)
    // =================================================================
    /// The presented token is missing, revoked, or expired.
    #[error("OL_ERR_100: Unauthorized: unknown or expired session token")]
    Unauthorized,

    // =================================================================
    // Account Errors (2xx)
    // =================================================================
    /// The referenced account does not exist.
    #[error("OL_ERR_200: Account not found: {0}")]
    AccountNotFound(AccountId),

    /// The authenticated principal does not own the referenced account.
    #[error("OL_ERR_201: Forbidden: account {account} is not owned by user {user}")]
    Forbidden { account: AccountId, user: UserId },

    /// The currency code is not in the supported set.
    #[error("OL_ERR_202: Unknown currency code: {code}")]
    UnknownCurrency { code: String },

    // =================================================================
    // Amount Errors (3xx)
    // =================================================================
    /// The amount is non-positive after minor-unit conversion.
    #[error("OL_ERR_300: Invalid amount: {amount}")]
    InvalidAmount { amount: Decimal },

    /// The amount does not fit in 64-bit minor units.
    #[error("OL_ERR_301: Amount out of range: {amount}")]
    AmountOverflow { amount: Decimal },

    // =================================================================
    // Funds Errors (4xx)
    // =================================================================
    /// The source account's balance does not cover the debit.
    #[error(
        "OL_ERR_400: Insufficient funds: need {needed_minor} minor units, have {available_minor}"
    )]
    InsufficientFunds {
        needed_minor: i64,
        available_minor: i64,
    },

    // =================================================================
    // Ledger / Batch Errors (5xx)
    // =================================================================
    /// A transfer batch does not net to zero minor units.
    #[error("OL_ERR_500: Unbalanced batch for {transaction}: nets to {net_minor}")]
    UnbalancedBatch {
        transaction: TransactionId,
        net_minor: i64,
    },

    /// An append was attempted with no entries.
    #[error("OL_ERR_501: Empty entry batch for {0}")]
    EmptyBatch(TransactionId),

    /// A transaction with this ID has already been committed.
    #[error("OL_ERR_502: Duplicate transaction: {0}")]
    DuplicateTransaction(TransactionId),

    /// The batch shape does not match the transaction kind.
    #[error("OL_ERR_503: Malformed batch for {transaction}: {reason}")]
    MalformedBatch {
        transaction: TransactionId,
        reason: String,
    },

    /// The cached running balance diverged from the entry fold — the books
    /// can no longer be trusted and the process should halt.
    #[error(
        "OL_ERR_504: Balance reconciliation failed for account {account}: \
         cached {cached_minor} != fold {fold_minor}"
    )]
    BalanceReconciliationFailed {
        account: AccountId,
        cached_minor: i64,
        fold_minor: i64,
    },

    // =================================================================
    // User / KYC Errors (6xx)
    // =================================================================
    /// The referenced user does not exist.
    #[error("OL_ERR_600: User not found: {0}")]
    UserNotFound(UserId),

    /// No user is registered under this email.
    #[error("OL_ERR_601: No user registered for email: {0}")]
    EmailNotRegistered(String),

    /// The email is already registered (emails are unique, case-insensitive).
    #[error("OL_ERR_602: Email already registered: {0}")]
    EmailTaken(String),

    /// The requested KYC transition is not allowed from the current state.
    #[error("OL_ERR_603: Invalid KYC transition: {from} -> {attempted}")]
    InvalidKycTransition {
        from: KycStatus,
        attempted: KycStatus,
    },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("OL_ERR_900: Internal error: {0}")]
    Internal(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, OpenledgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_contains_prefix() {
        let err = OpenledgerError::AccountNotFound(AccountId::new());
        let msg = format!("{err}");
        assert!(msg.starts_with("OL_ERR_200"), "Got: {msg}");
    }

    #[test]
    fn insufficient_funds_display() {
        let err = OpenledgerError::InsufficientFunds {
            needed_minor: 10_000,
            available_minor: 7_000,
        };
        let msg = format!("{err}");
        assert!(msg.contains("OL_ERR_400"));
        assert!(msg.contains("10000"));
        assert!(msg.contains("7000"));
    }

    #[test]
    fn kyc_transition_display() {
        let err = OpenledgerError::InvalidKycTransition {
            from: KycStatus::Pending,
            attempted: KycStatus::Pending,
        };
        let msg = format!("{err}");
        assert!(msg.contains("OL_ERR_603"));
        assert!(msg.contains("PENDING"));
    }

    #[test]
    fn all_errors_have_ol_err_prefix() {
        let errors: Vec<Box<dyn std::error::Error>> = vec![
            Box::new(OpenledgerError::Unauthorized),
            Box::new(OpenledgerError::UnknownCurrency {
                code: "XXX".into(),
            }),
            Box::new(OpenledgerError::EmptyBatch(TransactionId::new())),
            Box::new(OpenledgerError::EmailTaken("a@b.example".into())),
            Box::new(OpenledgerError::Internal("test".into())),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(
                msg.starts_with("OL_ERR_"),
                "Error missing OL_ERR_ prefix: {msg}"
            );
        }
    }
}
