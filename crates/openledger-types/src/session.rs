//! Session credentials.

use std::fmt;

use chrono::{DateTime, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::{UserId, constants};

/// Opaque bearer credential. 32 bytes of OS randomness, hex-encoded —
/// unguessable, carrying no embedded claims. How the token travels (cookie,
/// header, bot chat) is a transport concern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionToken(String);

impl SessionToken {
    /// Generate a fresh random token.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0u8; constants::SESSION_TOKEN_BYTES];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionToken {
    /// Redacted: tokens are credentials and must not end up in logs whole.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session:{}…", &self.0[..8])
    }
}

/// A live session binding a token to a user. Never mutated; removed on
/// logout or TTL expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: SessionToken,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl Session {
    #[must_use]
    pub fn open(user_id: UserId) -> Self {
        Self {
            token: SessionToken::generate(),
            user_id,
            created_at: Utc::now(),
        }
    }
}
