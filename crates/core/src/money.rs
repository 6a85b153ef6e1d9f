//! Monetary amounts.
//!
//! Prices are kept in their natural decimal form (e.g. `5.00`), not as cents,
//! and map onto Postgres `NUMERIC` columns without rounding.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// Non-negative decimal amount (menu prices, order totals).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl ValueObject for Money {}

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Wrap a decimal amount, rejecting negative values.
    pub fn new(amount: Decimal) -> DomainResult<Self> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(DomainError::validation(format!(
                "amount cannot be negative: {amount}"
            )));
        }
        Ok(Self(amount))
    }

    /// Build from an integer number of minor units, e.g. `from_minor(500, 2)` is `5.00`.
    pub fn from_minor(units: i64, scale: u32) -> DomainResult<Self> {
        Self::new(Decimal::new(units, scale))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// `self × quantity`. Fails if the result is negative or overflows.
    pub fn times(&self, quantity: i64) -> DomainResult<Self> {
        let total = self
            .0
            .checked_mul(Decimal::from(quantity))
            .ok_or_else(|| DomainError::validation("amount overflow"))?;
        Self::new(total)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Money {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = Decimal::from_str(s)
            .map_err(|e| DomainError::validation(format!("invalid amount {s:?}: {e}")))?;
        Self::new(amount)
    }
}

impl TryFrom<Decimal> for Money {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Money> for Decimal {
    fn from(value: Money) -> Self {
        value.0
    }
}

// JSON clients expect plain numbers (`5.0`), not decimal strings.
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = rust_decimal::serde::float::deserialize(deserializer)?;
        Self::new(amount).map_err(serde::de::Error::custom)
    }
}
