//! Money amounts live in the database as integer cents.
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::errors::ModelError;

/// Exclusive bound on the magnitude of a NUMERIC(10,2) amount.
pub const LIMIT: i64 = 100_000_000;

pub fn in_range(value: &Decimal) -> bool {
    value.abs() < Decimal::from(LIMIT)
}

/// Exact conversion of a validated amount.
pub fn to_cents(value: &Decimal) -> Result<i64, ModelError> {
    let scaled = value
        .checked_mul(Decimal::ONE_HUNDRED)
        .ok_or_else(|| ModelError::Db(format!("amount {value} out of range")))?;
    if scaled.fract() != Decimal::ZERO {
        return Err(ModelError::Db(format!("amount {value} has more than 2 decimal places")));
    }
    scaled
        .to_i64()
        .ok_or_else(|| ModelError::Db(format!("amount {value} out of range")))
}

pub fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// Largest cent value `c` with `c <= value * 100`.
///
/// `amount > t` is equivalent to `cents > cents_floor(t)` and
/// `amount <= t` to `cents <= cents_floor(t)`.
pub fn cents_floor(value: &Decimal) -> i64 {
    scaled(value, RoundingStrategy::ToNegativeInfinity)
}

/// Smallest cent value `c` with `c >= value * 100`, for inclusive lower bounds.
pub fn cents_ceil(value: &Decimal) -> i64 {
    scaled(value, RoundingStrategy::ToPositiveInfinity)
}

fn scaled(value: &Decimal, strategy: RoundingStrategy) -> i64 {
    let saturated = if value.is_sign_negative() { i64::MIN } else { i64::MAX };
    value
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|v| v.round_dp_with_strategy(0, strategy).to_i64())
        .unwrap_or(saturated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn cents_are_exact() {
        assert_eq!(to_cents(&d("95000.00")).unwrap(), 9_500_000);
        assert_eq!(to_cents(&d("0.1")).unwrap(), 10);
        assert_eq!(from_cents(3_120_000), d("31200.00"));
        assert!(to_cents(&d("1.001")).is_err());
    }

    #[test]
    fn thresholds_round_toward_the_right_side() {
        assert_eq!(cents_floor(&d("4000.005")), 400_000);
        assert_eq!(cents_ceil(&d("4000.005")), 400_001);
        assert_eq!(cents_floor(&d("-0.005")), -1);
        assert_eq!(cents_ceil(&d("5000")), 500_000);
    }

    #[test]
    fn range_is_numeric_10_2() {
        assert!(in_range(&d("99999999.99")));
        assert!(!in_range(&d("100000000")));
        assert!(!in_range(&d("-100000000.00")));
    }
}
