//! Session gate — maps opaque credentials to user identities.
//!
//! Two states per credential: *valid* (present in the session set) and
//! *revoked* (absent — never issued, logged out, or expired past the
//! configured TTL). Sessions are never mutated after issue.

use chrono::{Duration, Utc};
use std::collections::HashMap;

use openledger_types::{OpenledgerError, Result, Session, SessionToken, UserId};

/// Owner of all live sessions.
#[derive(Debug)]
pub struct SessionGate {
    /// Token string → session.
    sessions: HashMap<String, Session>,
    /// Lifetime of a session; `None` means until explicit logout.
    ttl: Option<Duration>,
}

impl SessionGate {
    /// Create a gate. `ttl_secs = None` keeps sessions alive until logout.
    #[must_use]
    pub fn new(ttl_secs: Option<u64>) -> Self {
        Self {
            sessions: HashMap::new(),
            ttl: ttl_secs.map(|secs| Duration::seconds(i64::try_from(secs).unwrap_or(i64::MAX))),
        }
    }

    /// Open a session for `user_id` and return it.
    pub fn issue(&mut self, user_id: UserId) -> Session {
        let session = Session::open(user_id);
        tracing::debug!(user = %user_id, token = %session.token, "session issued");
        self.sessions
            .insert(session.token.as_str().to_string(), session.clone());
        session
    }

    /// Resolve a token to the user it was issued to.
    ///
    /// # Errors
    /// [`OpenledgerError::Unauthorized`] if the token was never issued, was
    /// revoked, or has outlived the TTL.
    pub fn resolve(&self, token: &SessionToken) -> Result<UserId> {
        let session = self
            .sessions
            .get(token.as_str())
            .ok_or(OpenledgerError::Unauthorized)?;
        if let Some(ttl) = self.ttl {
            if Utc::now() - session.created_at > ttl {
                return Err(OpenledgerError::Unauthorized);
            }
        }
        Ok(session.user_id)
    }

    /// Revoke a token (logout). Returns whether a live session was removed.
    pub fn revoke(&mut self, token: &SessionToken) -> bool {
        let removed = self.sessions.remove(token.as_str()).is_some();
        if removed {
            tracing::debug!(token = %token, "session revoked");
        }
        removed
    }

    /// Drop sessions past the TTL. Housekeeping; resolution already treats
    /// them as revoked.
    pub fn purge_expired(&mut self) -> usize {
        let Some(ttl) = self.ttl else { return 0 };
        let now = Utc::now();
        let before = self.sessions.len();
        self.sessions.retain(|_, s| now - s.created_at <= ttl);
        before - self.sessions.len()
    }

    /// Number of live sessions.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.sessions.len()
    }
}

impl Default for SessionGate {
    fn default() -> Self {
        Self::new(None)
    }
}
