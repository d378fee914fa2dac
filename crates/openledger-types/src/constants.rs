//! System-wide constants for the OpenLedger core.

/// Default cap on `list_transactions` results.
pub const DEFAULT_TRANSACTION_LIMIT: usize = 50;

/// Random bytes in a session token (hex-encoded to twice this length).
pub const SESSION_TOKEN_BYTES: usize = 32;

/// Display name given to lazily created clearing accounts, per currency.
#[must_use]
pub fn clearing_account_name(code: &str) -> String {
    format!("{code} clearing")
}

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "OpenLedger";
