//! User model and the KYC status lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{OpenledgerError, Result, UserId};

/// KYC verification status attached to a user.
///
/// Lifecycle: `NOT_STARTED → PENDING → APPROVED`. Submission re-enters
/// `PENDING` from `APPROVED` (document re-verification); nothing ever moves
/// back to `NOT_STARTED`. The poster does not consult this status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KycStatus {
    NotStarted,
    Pending,
    Approved,
}

impl KycStatus {
    /// Transition taken when the user submits KYC documents.
    ///
    /// # Errors
    /// [`OpenledgerError::InvalidKycTransition`] if a submission is already
    /// pending review.
    pub fn submitted(self) -> Result<Self> {
        match self {
            Self::NotStarted | Self::Approved => Ok(Self::Pending),
            Self::Pending => Err(OpenledgerError::InvalidKycTransition {
                from: self,
                attempted: Self::Pending,
            }),
        }
    }

    /// Transition taken when a pending submission is approved.
    ///
    /// # Errors
    /// [`OpenledgerError::InvalidKycTransition`] unless a submission is
    /// pending review.
    pub fn approved(self) -> Result<Self> {
        match self {
            Self::Pending => Ok(Self::Approved),
            Self::NotStarted | Self::Approved => Err(OpenledgerError::InvalidKycTransition {
                from: self,
                attempted: Self::Approved,
            }),
        }
    }
}

impl std::fmt::Display for KycStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotStarted => write!(f, "NOT_STARTED"),
            Self::Pending => write!(f, "PENDING"),
            Self::Approved => write!(f, "APPROVED"),
        }
    }
}

/// A registered bank user. Never deleted; mutated only by the KYC lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// Unique across the system, compared case-insensitively.
    pub email: String,
    pub display_name: String,
    pub kyc_status: KycStatus,
    pub created_at: DateTime<Utc>,
}

impl User {
    #[must_use]
    pub fn new(email: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            email: email.into(),
            display_name: display_name.into(),
            kyc_status: KycStatus::NotStarted,
            created_at: Utc::now(),
        }
    }
}
