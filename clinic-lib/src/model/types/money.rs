//! Money type

use std::iter::Sum;
use std::ops::Add;

use rust_decimal::Decimal;
use serde::Deserialize;
use serde::Serialize;
use trellis::Value;

/// A monetary amount in the clinic's currency.
///
/// # Example
///
/// ```
/// use clinic_lib::model::types::Money;
///
/// let fee = Money::from_cents(12_550);
/// assert_eq!(fee.to_string(), "$125.50");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(pub Decimal);

impl Money {
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Returns the inner decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Creates a Money value from whole units.
    pub fn from_int(value: i64) -> Self {
        Self(Decimal::new(value, 0))
    }

    /// Creates a Money value from cents.
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl From<Money> for Value {
    fn from(money: Money) -> Self {
        Value::Decimal(money.0)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money(self.0 + other.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::default(), Add::add)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_sign_negative() {
            write!(f, "-${:.2}", self.0.abs())
        } else {
            write!(f, "${:.2}", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_two_places() {
        assert_eq!(Money::from_int(80).to_string(), "$80.00");
        assert_eq!(Money::from_cents(-505).to_string(), "-$5.05");
    }

    #[test]
    fn test_sum() {
        let total: Money = [Money::from_cents(150), Money::from_int(2)].into_iter().sum();
        assert_eq!(total, Money::from_cents(350));
    }

    #[test]
    fn test_sorts_as_decimal() {
        let a: Value = Money::from_int(9).into();
        let b: Value = Money::from_cents(1050).into();
        assert_eq!(a.compare(&b), std::cmp::Ordering::Less);
    }
}
