//! Currency codes supported by the ledger.
//!
//! The set is closed on purpose: every account is denominated in exactly one
//! of these for its whole lifetime, and all of them carry two decimal places
//! (100 minor units per major unit). Display formatting with locale symbols
//! is a collaborator concern.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{OpenledgerError, Result};

/// A supported currency. All entries against an account are denominated in
/// the account's currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
}

impl Currency {
    /// All supported currencies, in a stable order.
    pub const ALL: [Self; 3] = [Self::Usd, Self::Eur, Self::Gbp];

    /// ISO 4217 code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
        }
    }

    /// Minor units per major unit (cents per dollar). Two decimal places
    /// for every supported currency.
    #[must_use]
    pub fn minor_per_major(&self) -> i64 {
        100
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = OpenledgerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "USD" => Ok(Self::Usd),
            "EUR" => Ok(Self::Eur),
            "GBP" => Ok(Self::Gbp),
            other => Err(OpenledgerError::UnknownCurrency {
                code: other.to_string(),
            }),
        }
    }
}
