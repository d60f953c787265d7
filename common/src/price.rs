//! [`Price`]-related definitions.

use std::{fmt, str::FromStr};

#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::{prelude::ToPrimitive as _, Decimal};

/// Non-negative price in the business' currency.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(transparent)
)]
pub struct Price(Decimal);

impl Price {
    /// Zero [`Price`].
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a new [`Price`] if the provided `amount` is non-negative.
    #[must_use]
    pub fn new(amount: Decimal) -> Option<Self> {
        (amount >= Decimal::ZERO).then_some(Self(amount.normalize()))
    }

    /// Returns the amount of this [`Price`].
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Adds the provided [`Price`] to this one.
    ///
    /// [`None`] is returned on overflow.
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Sums up the provided [`Price`]s.
    ///
    /// [`None`] is returned on overflow.
    #[must_use]
    pub fn checked_sum(prices: impl IntoIterator<Item = Self>) -> Option<Self> {
        prices.into_iter().try_fold(Self::ZERO, Self::checked_add)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(int) = self.0.is_integer().then(|| self.0.to_i128()).flatten()
        {
            write!(f, "{int}")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl FromStr for Price {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = Decimal::from_str(s.trim()).map_err(|_| "invalid amount")?;
        Self::new(amount).ok_or("negative amount")
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::Price;

    fn price(s: &str) -> Price {
        Price::from_str(s).unwrap()
    }

    #[test]
    fn from_str() {
        assert_eq!(
            price("123.45").amount(),
            Decimal::from_str("123.45").unwrap(),
        );
        assert_eq!(price(" 15000 ").amount(), Decimal::from(15000));
        assert_eq!(price("0"), Price::ZERO);

        assert!(Price::from_str("-1").is_err());
        assert!(Price::from_str("ten").is_err());
        assert!(Price::from_str("").is_err());
    }

    #[test]
    fn display() {
        assert_eq!(price("15000").to_string(), "15000");
        assert_eq!(price("15000.00").to_string(), "15000");
        assert_eq!(price("99.5").to_string(), "99.5");
    }

    #[test]
    fn sum() {
        let total =
            Price::checked_sum([price("100"), price("250.25"), price("0")]);

        assert_eq!(total, Some(price("350.25")));
        assert_eq!(Price::checked_sum([]), Some(Price::ZERO));
    }

    #[test]
    fn sum_overflow_is_none() {
        let huge = Price::new(Decimal::MAX).unwrap();

        assert_eq!(huge.checked_add(Price::ZERO), Some(huge));
        assert_eq!(huge.checked_add(price("1")), None);
        assert_eq!(Price::checked_sum([price("1"), huge, price("1")]), None);
    }
}
