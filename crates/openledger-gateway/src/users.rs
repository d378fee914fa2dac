//! User registry and the KYC lifecycle applied to it.
//!
//! Emails are unique across the system and compared case-insensitively;
//! the stored row keeps the email as the user typed it.

use std::collections::HashMap;

use openledger_types::{OpenledgerError, Result, User, UserId};

/// Owner of all [`User`] rows. Users are never deleted; the only mutations
/// are the KYC transitions.
#[derive(Debug, Default)]
pub struct UserRegistry {
    users: Vec<User>,
    by_id: HashMap<UserId, usize>,
    /// Lowercased email → user id.
    by_email: HashMap<String, UserId>,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl UserRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new user.
    ///
    /// # Errors
    /// [`OpenledgerError::EmailTaken`] if the email is already registered
    /// (in any casing).
    pub fn register(
        &mut self,
        email: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Result<User> {
        let email = email.into();
        let key = normalize_email(&email);
        if self.by_email.contains_key(&key) {
            return Err(OpenledgerError::EmailTaken(email));
        }

        let user = User::new(email, display_name);
        tracing::info!(user = %user.id, "user registered");
        self.by_email.insert(key, user.id);
        self.by_id.insert(user.id, self.users.len());
        self.users.push(user.clone());
        Ok(user)
    }

    /// Look up a user by id.
    ///
    /// # Errors
    /// [`OpenledgerError::UserNotFound`] if the id is unknown.
    pub fn get(&self, id: UserId) -> Result<&User> {
        self.by_id
            .get(&id)
            .map(|&idx| &self.users[idx])
            .ok_or(OpenledgerError::UserNotFound(id))
    }

    /// Look up a user by email, case-insensitively.
    ///
    /// # Errors
    /// [`OpenledgerError::EmailNotRegistered`] if no user has this email.
    pub fn find_by_email(&self, email: &str) -> Result<&User> {
        self.by_email
            .get(&normalize_email(email))
            .and_then(|id| self.by_id.get(id))
            .map(|&idx| &self.users[idx])
            .ok_or_else(|| OpenledgerError::EmailNotRegistered(email.to_string()))
    }

    /// Apply a KYC submission: moves the status to `PENDING` and records the
    /// submitted legal name as the display name.
    ///
    /// # Errors
    /// - [`OpenledgerError::UserNotFound`] for an unknown id
    /// - [`OpenledgerError::InvalidKycTransition`] if a submission is
    ///   already pending review
    pub fn submit_kyc(&mut self, id: UserId, full_name: impl Into<String>) -> Result<User> {
        let idx = *self
            .by_id
            .get(&id)
            .ok_or(OpenledgerError::UserNotFound(id))?;
        let user = &mut self.users[idx];
        user.kyc_status = user.kyc_status.submitted()?;
        user.display_name = full_name.into();
        tracing::info!(user = %id, status = %user.kyc_status, "kyc submitted");
        Ok(user.clone())
    }

    /// Approve a pending KYC submission.
    ///
    /// # Errors
    /// - [`OpenledgerError::UserNotFound`] for an unknown id
    /// - [`OpenledgerError::InvalidKycTransition`] unless a submission is
    ///   pending review
    pub fn approve_kyc(&mut self, id: UserId) -> Result<User> {
        let idx = *self
            .by_id
            .get(&id)
            .ok_or(OpenledgerError::UserNotFound(id))?;
        let user = &mut self.users[idx];
        user.kyc_status = user.kyc_status.approved()?;
        tracing::info!(user = %id, status = %user.kyc_status, "kyc approved");
        Ok(user.clone())
    }

    /// Number of registered users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
