//! Configuration for the gateway facade.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Runtime knobs for the gateway. Everything here has a sensible default;
/// deployments override what they need.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Cap applied to `list_transactions` when the caller passes no limit.
    pub default_transaction_limit: usize,
    /// Session lifetime in seconds. `None` means sessions live until
    /// explicit logout.
    pub session_ttl_secs: Option<u64>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            default_transaction_limit: constants::DEFAULT_TRANSACTION_LIMIT,
            session_ttl_secs: None,
        }
    }
}
