//! Minor-unit money arithmetic.
//!
//! Inside the core every amount is an `i64` in minor units (cents). Callers
//! hand in "major" amounts as [`Decimal`] — never floating point — and the
//! conversion rounds to the nearest cent before anything else looks at the
//! value. The core never coerces a bad amount (no clamping); it rejects.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::{Currency, OpenledgerError, Result};

/// Convert a caller-facing major-unit amount into minor units, rounding to
/// the nearest cent (midpoint away from zero, so `0.005` becomes `1`).
///
/// # Errors
/// - [`OpenledgerError::InvalidAmount`] if the rounded result is `<= 0`
/// - [`OpenledgerError::AmountOverflow`] if it does not fit in `i64`
pub fn minor_from_major(currency: Currency, major: Decimal) -> Result<i64> {
    let scaled = major
        .checked_mul(Decimal::from(currency.minor_per_major()))
        .ok_or(OpenledgerError::AmountOverflow { amount: major })?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    let minor = scaled
        .to_i64()
        .ok_or(OpenledgerError::AmountOverflow { amount: major })?;

    if minor <= 0 {
        return Err(OpenledgerError::InvalidAmount { amount: major });
    }
    Ok(minor)
}

/// Render a signed minor-unit amount as a major-unit decimal, for logs and
/// test assertions. Locale formatting is a collaborator concern.
#[must_use]
pub fn major_from_minor(currency: Currency, minor: i64) -> Decimal {
    Decimal::from(minor) / Decimal::from(currency.minor_per_major())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn whole_amount_converts_exactly() {
        let minor = minor_from_major(Currency::Usd, usd("500.00")).unwrap();
        assert_eq!(minor, 50_000);
    }

    #[test]
    fn cents_convert_exactly() {
        let minor = minor_from_major(Currency::Eur, usd("30.07")).unwrap();
        assert_eq!(minor, 3_007);
    }

    #[test]
    fn sub_cent_rounds_to_nearest() {
        assert_eq!(minor_from_major(Currency::Usd, usd("1.004")).unwrap(), 100);
        assert_eq!(minor_from_major(Currency::Usd, usd("1.005")).unwrap(), 101);
        assert_eq!(minor_from_major(Currency::Usd, usd("1.006")).unwrap(), 101);
    }

    #[test]
    fn zero_rejected() {
        let err = minor_from_major(Currency::Usd, Decimal::ZERO).unwrap_err();
        assert!(matches!(err, OpenledgerError::InvalidAmount { .. }));
    }

    #[test]
    fn negative_rejected() {
        let err = minor_from_major(Currency::Usd, usd("-10.00")).unwrap_err();
        assert!(matches!(err, OpenledgerError::InvalidAmount { .. }));
    }

    #[test]
    fn amount_rounding_to_zero_rejected() {
        // 0.004 rounds to 0 cents, which is not a postable amount.
        let err = minor_from_major(Currency::Usd, usd("0.004")).unwrap_err();
        assert!(matches!(err, OpenledgerError::InvalidAmount { .. }));
    }

    #[test]
    fn overflow_rejected() {
        let huge = Decimal::MAX;
        let err = minor_from_major(Currency::Usd, huge).unwrap_err();
        assert!(matches!(err, OpenledgerError::AmountOverflow { .. }));
    }

    #[test]
    fn major_from_minor_roundtrip() {
        let major = major_from_minor(Currency::Gbp, 12_345);
        assert_eq!(major, usd("123.45"));
    }
}
