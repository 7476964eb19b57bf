//! [`Money`]-related definitions.

use std::{fmt, str::FromStr};

#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::{prelude::ToPrimitive as _, Decimal};

/// Amount of money in New Taiwan dollars.
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Money(Decimal);

impl Money {
    /// Number of New Taiwan dollars in one 萬 (ten thousand).
    const WAN: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

    /// Creates a new [`Money`] amount if the given `amount` is non-negative.
    #[must_use]
    pub fn new(amount: Decimal) -> Option<Self> {
        (amount >= Decimal::ZERO).then_some(Self(amount))
    }

    /// Creates a new [`Money`] amount from a value expressed in 萬
    /// (ten thousands of New Taiwan dollars), as contract documents
    /// conventionally quote it.
    #[must_use]
    pub fn from_wan(wan: Decimal) -> Option<Self> {
        Self::new(wan * Self::WAN)
    }

    /// Returns this amount expressed in 萬 (ten thousands).
    #[must_use]
    pub fn to_wan(self) -> Decimal {
        self.0 / Self::WAN
    }

    /// Returns the raw decimal amount in New Taiwan dollars.
    #[must_use]
    pub fn amount(self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self(amount) = self;
        if amount.is_integer() {
            write!(f, "{}", amount.to_i128().expect("integer"))
        } else {
            write!(f, "{amount}")
        }
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = Decimal::from_str(s).map_err(|_| "invalid amount")?;
        Self::new(amount).ok_or("negative amount")
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use std::str::FromStr as _;

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Non-negative amount of money in New Taiwan dollars, as a decimal
    /// string.
    #[graphql_scalar(with = Self, parse_token(String))]
    type Money = super::Money;

    impl Money {
        fn to_output<S: ScalarValue>(m: &Money) -> Value<S> {
            Value::scalar(m.to_string())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `Money` input scalar from \
                         non-string value: {input}",
                    )
                })
                .and_then(|s| {
                    Self::from_str(s).map_err(|e| {
                        format!("Cannot parse `Money` input scalar: {e}")
                    })
                })
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::Money;

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn from_str() {
        assert_eq!(
            Money::from_str("1250000").unwrap(),
            Money::new(decimal("1250000")).unwrap(),
        );
        assert_eq!(
            Money::from_str("123.45").unwrap(),
            Money::new(decimal("123.45")).unwrap(),
        );

        assert!(Money::from_str("-1").is_err());
        assert!(Money::from_str("12,5").is_err());
        assert!(Money::from_str("NT$100").is_err());
    }

    #[test]
    fn to_string() {
        assert_eq!(
            Money::new(decimal("1250000")).unwrap().to_string(),
            "1250000",
        );
        assert_eq!(Money::new(decimal("123.00")).unwrap().to_string(), "123");
        assert_eq!(Money::new(decimal("123.5")).unwrap().to_string(), "123.5");
    }

    #[test]
    fn wan_conversion() {
        let m = Money::from_wan(decimal("100")).unwrap();
        assert_eq!(m.to_string(), "1000000");
        assert_eq!(m.to_wan(), decimal("100"));
    }
}
