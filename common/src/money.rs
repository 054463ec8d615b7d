//! [`Money`]-related definitions.

use std::{fmt, iter, ops, str::FromStr};

use rust_decimal::Decimal;

/// Non-negative amount of money.
///
/// Currency-agnostic: the platform operates in a single currency, so only
/// the amount is tracked. Arithmetic saturates at [`Money::MAX`].
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Money(Decimal);

impl Money {
    /// Zero amount of [`Money`].
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Largest representable amount of [`Money`].
    pub const MAX: Self = Self(Decimal::MAX);

    /// Creates a new [`Money`] if the given `amount` is not negative.
    #[must_use]
    pub fn new(amount: Decimal) -> Option<Self> {
        let non_negative = !amount.is_sign_negative() || amount.is_zero();
        non_negative.then_some(Self(amount))
    }

    /// Parses [`Money`] out of loosely formatted input (`"Rs. 1,250.00"`),
    /// skipping any prefix before the first digit and any separators, and
    /// stopping at a second decimal point.
    ///
    /// Unparseable input results in [`Money::ZERO`].
    #[must_use]
    pub fn parse_lenient(input: &str) -> Self {
        Self::try_parse_lenient(input).unwrap_or(Self::ZERO)
    }

    /// Parses [`Money`] the same way [`Money::parse_lenient()`] does, but
    /// returns [`None`] if the `input` has no digits or overflows.
    #[must_use]
    pub fn try_parse_lenient(input: &str) -> Option<Self> {
        let start = input.find(|c: char| c.is_ascii_digit())?;
        let mut seen_point = false;
        let digits = input[start..]
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .take_while(|c| {
                let second_point = *c == '.' && seen_point;
                seen_point |= *c == '.';
                !second_point
            })
            .collect::<String>();
        Decimal::from_str(&digits).ok().and_then(Self::new)
    }

    /// Returns the amount of this [`Money`].
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount =
            Decimal::from_str(s.trim()).map_err(|_| "invalid amount")?;
        Self::new(amount).ok_or("negative amount")
    }
}

impl ops::Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl ops::Mul<u32> for Money {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self::Output {
        Self(self.0.saturating_mul(Decimal::from(rhs)))
    }
}

impl iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, ops::Add::add)
    }
}

mod serde {
    //! Module providing integration with [`serde`] crate.
    //!
    //! [`Money`] travels as a string (`"500"`), though plain numbers are
    //! accepted on input as well.

    use rust_decimal::Decimal;
    use serde::{
        de::Error as _, Deserialize, Deserializer, Serialize, Serializer,
    };
    use tracing as log;

    use super::Money;

    /// Raw representation of [`Money`] on the wire.
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        /// Amount as a string.
        Str(String),

        /// Amount as a number.
        Num(f64),
    }

    impl Serialize for Money {
        fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
            s.collect_str(&self.0.normalize())
        }
    }

    impl<'de> Deserialize<'de> for Money {
        fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
            match Raw::deserialize(d)? {
                Raw::Str(s) => {
                    Ok(Self::try_parse_lenient(&s).unwrap_or_else(|| {
                        log::warn!("unreadable amount `{s}` taken as zero");
                        Self::ZERO
                    }))
                }
                Raw::Num(n) => Decimal::try_from(n)
                    .ok()
                    .and_then(Self::new)
                    .ok_or_else(|| {
                        D::Error::custom("invalid `Money` amount")
                    }),
            }
        }
    }
}

#[cfg(test)]
mod spec {
    use std::{iter, str::FromStr as _};

    use super::Money;

    fn money(s: &str) -> Money {
        Money::from_str(s).unwrap()
    }

    #[test]
    fn from_str() {
        assert_eq!(money("500").to_string(), "500.00");
        assert_eq!(money(" 12.5 ").to_string(), "12.50");
        assert!(Money::from_str("-1").is_err());
        assert!(Money::from_str("abc").is_err());
        assert!(Money::from_str("").is_err());
    }

    #[test]
    fn parse_lenient() {
        assert_eq!(Money::parse_lenient("Rs. 1,250.00"), money("1250"));
        assert_eq!(Money::parse_lenient("12.5.0"), money("12.5"));
        assert_eq!(Money::parse_lenient("450"), money("450"));
        assert_eq!(Money::parse_lenient("free"), Money::ZERO);
        assert_eq!(Money::parse_lenient(""), Money::ZERO);
        assert_eq!(Money::try_parse_lenient("free"), None);
        assert_eq!(Money::try_parse_lenient("0"), Some(Money::ZERO));
        assert_eq!(
            Money::try_parse_lenient("9".repeat(40).as_str()),
            None,
        );
    }

    #[test]
    fn arithmetic() {
        assert_eq!(money("500") * 3, money("1500"));
        assert_eq!(money("0.10") + money("0.20"), money("0.3"));
        assert_eq!(
            [money("1"), money("2.5"), money("3")]
                .into_iter()
                .sum::<Money>(),
            money("6.5"),
        );
        assert_eq!(iter::empty::<Money>().sum::<Money>(), Money::ZERO);
    }

    #[test]
    fn saturates_on_overflow() {
        let huge = Money::parse_lenient("100000000000000000000");

        assert_eq!(huge * u32::MAX, Money::MAX);
        assert_eq!(Money::MAX + money("1"), Money::MAX);
        assert_eq!(
            [huge * u32::MAX, huge].into_iter().sum::<Money>(),
            Money::MAX,
        );
    }

    #[test]
    fn serde() {
        assert_eq!(
            serde_json::to_string(&money("500.00")).unwrap(),
            "\"500\"",
        );
        assert_eq!(
            serde_json::from_str::<Money>("\"450\"").unwrap(),
            money("450"),
        );
        assert_eq!(
            serde_json::from_str::<Money>("12.5").unwrap(),
            money("12.5"),
        );
        assert_eq!(
            serde_json::from_str::<Money>("\"on request\"").unwrap(),
            Money::ZERO,
        );
        assert!(serde_json::from_str::<Money>("-3").is_err());
    }
}
