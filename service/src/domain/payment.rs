//! [`Payment`] definitions.

use std::{fmt, str::FromStr, sync::LazyLock};

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf, Money};
use derive_more::{AsRef, Display};
use regex::Regex;
use secrecy::{zeroize::Zeroize, CloneableSecret, SecretBox};

use crate::domain::user;

use super::define_text;

/// Card payment of an order amount.
#[derive(Clone, Debug)]
pub struct Payment {
    /// Contact [`user::Email`] of the payer.
    pub email: user::Email,

    /// Contact [`Phone`] of the payer.
    pub phone: Phone,

    /// [`Card`] being charged.
    pub card: Card,

    /// Charged amount.
    pub amount: Money,

    /// [`DateTime`] when this [`Payment`] was made.
    pub paid_at: PaymentDateTime,
}

/// Payment card details.
#[derive(Clone, Debug)]
pub struct Card {
    /// [`CardHolder`] name as printed on the card.
    pub holder: CardHolder,

    /// [`CardNumber`] of the card.
    pub number: SecretBox<CardNumber>,

    /// [`Expiry`] of the card.
    pub expiry: Expiry,

    /// [`Cvv`] of the card.
    pub cvv: SecretBox<Cvv>,
}

/// Phone number of a payer.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Phone(String);

impl Phone {
    /// Creates a new [`Phone`] if the given `number` is valid.
    #[must_use]
    pub fn new(number: impl Into<String>) -> Option<Self> {
        let number = number.into();
        Self::check(&number).then_some(Self(number))
    }

    /// Checks whether the given `number` is a valid [`Phone`].
    fn check(number: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Phone`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[+]?\d[\d\s-]{8,}\d$").expect("valid regex")
        });

        let number = number.as_ref();
        let digits = number.chars().filter(char::is_ascii_digit).count();
        REGEX.is_match(number) && (10..=15).contains(&digits)
    }
}

impl FromStr for Phone {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.trim()).ok_or("invalid `Phone`")
    }
}

define_text! {
    /// Name of a [`Card`] holder.
    pub struct CardHolder(max = 128);
}

/// Number of a payment [`Card`], digits only.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CardNumber(String);

impl CardNumber {
    /// Creates a new [`CardNumber`] out of the given `number`, ignoring any
    /// whitespace in it.
    #[must_use]
    pub fn new(number: impl AsRef<str>) -> Option<Self> {
        let digits = number
            .as_ref()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>();
        Self::check(&digits).then_some(Self(digits))
    }

    /// Checks whether the given `digits` form a valid [`CardNumber`].
    fn check(digits: &str) -> bool {
        (13..=19).contains(&digits.len())
            && digits.chars().all(|c| c.is_ascii_digit())
    }

    /// Returns this [`CardNumber`] split into groups of four digits.
    #[must_use]
    pub fn grouped(&self) -> String {
        self.0
            .as_bytes()
            .chunks(4)
            .map(String::from_utf8_lossy)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Returns the last four digits of this [`CardNumber`].
    #[must_use]
    pub fn last_four(&self) -> &str {
        &self.0[self.0.len() - 4..]
    }
}

impl FromStr for CardNumber {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `CardNumber`")
    }
}

impl CloneableSecret for CardNumber {}
impl Zeroize for CardNumber {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

/// Expiry month of a payment [`Card`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Expiry {
    /// Month, `1..=12`.
    month: u8,

    /// Last two digits of the year.
    year: u8,
}

impl Expiry {
    /// Creates a new [`Expiry`] if the given `month` is valid.
    #[must_use]
    pub const fn new(month: u8, year: u8) -> Option<Self> {
        if month >= 1 && month <= 12 && year < 100 {
            Some(Self { month, year })
        } else {
            None
        }
    }
}

impl fmt::Display for Expiry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}", self.month, self.year)
    }
}

impl FromStr for Expiry {
    type Err = &'static str;

    /// Parses `MM/YY`, ignoring any non-digit separators.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.chars().filter(char::is_ascii_digit).collect::<String>();
        if digits.len() != 4 {
            return Err("invalid `Expiry`");
        }
        let (month, year) = digits.split_at(2);
        month
            .parse()
            .ok()
            .zip(year.parse().ok())
            .and_then(|(m, y)| Self::new(m, y))
            .ok_or("invalid `Expiry`")
    }
}

/// Verification code of a payment [`Card`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Cvv(String);

impl Cvv {
    /// Creates a new [`Cvv`] if the given `code` is valid.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Option<Self> {
        let code = code.into();
        Self::check(&code).then_some(Self(code))
    }

    /// Checks whether the given `code` is a valid [`Cvv`].
    fn check(code: &str) -> bool {
        (3..=4).contains(&code.len())
            && code.chars().all(|c| c.is_ascii_digit())
    }
}

impl AsRef<str> for Cvv {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Cvv {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.trim()).ok_or("invalid `Cvv`")
    }
}

impl CloneableSecret for Cvv {}
impl Zeroize for Cvv {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

/// [`DateTime`] when a [`Payment`] was made.
pub type PaymentDateTime = DateTimeOf<(Payment, unit::Creation)>;

#[cfg(test)]
mod spec {
    use super::{CardNumber, Cvv, Expiry, Phone};

    #[test]
    fn card_number() {
        let number = CardNumber::new("4111 1111 1111 1111").unwrap();

        assert_eq!(number.grouped(), "4111 1111 1111 1111");
        assert_eq!(number.last_four(), "1111");
        assert!(CardNumber::new("4111 1111 111").is_none());
        assert!(CardNumber::new("4111-1111-1111-1111").is_none());
        assert_eq!(
            CardNumber::new("4000056655665").unwrap().grouped(),
            "4000 0566 5566 5",
        );
    }

    #[test]
    fn expiry() {
        assert_eq!("07/27".parse::<Expiry>().unwrap().to_string(), "07/27");
        assert_eq!("0727".parse::<Expiry>().unwrap().to_string(), "07/27");
        assert!("13/27".parse::<Expiry>().is_err());
        assert!("00/27".parse::<Expiry>().is_err());
        assert!("7/27".parse::<Expiry>().is_err());
    }

    #[test]
    fn cvv() {
        assert!(Cvv::new("123").is_some());
        assert!(Cvv::new("1234").is_some());
        assert!(Cvv::new("12").is_none());
        assert!(Cvv::new("12a").is_none());
    }

    #[test]
    fn phone() {
        assert!(Phone::new("0771234567").is_some());
        assert!(Phone::new("+94 77 123 4567").is_some());
        assert!(Phone::new("077-123-4567").is_some());
        assert!(Phone::new("12345").is_none());
        assert!(Phone::new("call me").is_none());
    }
}
