//! [`Quantity`] definitions.

use std::{num::NonZeroU32, str::FromStr};

use derive_more::Display;

/// Number of units of a single food item, never less than one.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Quantity(NonZeroU32);

impl Quantity {
    /// A single unit.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Creates a new [`Quantity`] if the given `count` is not zero.
    #[must_use]
    pub const fn new(count: u32) -> Option<Self> {
        match NonZeroU32::new(count) {
            Some(count) => Some(Self(count)),
            None => None,
        }
    }

    /// Creates a new [`Quantity`] out of any signed `count`, clamping it to
    /// at least one.
    #[must_use]
    pub fn clamped(count: i64) -> Self {
        u32::try_from(count.max(1))
            .ok()
            .and_then(Self::new)
            .unwrap_or(Self(NonZeroU32::MAX))
    }

    /// Returns the numeric value of this [`Quantity`].
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Adds the `other` [`Quantity`] to this one, saturating at the numeric
    /// bound.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.get()))
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl FromStr for Quantity {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self::clamped)
            .map_err(|_| "invalid `Quantity`")
    }
}

#[cfg(test)]
mod spec {
    use super::Quantity;

    #[test]
    fn clamps_to_one() {
        assert_eq!(Quantity::clamped(0), Quantity::ONE);
        assert_eq!(Quantity::clamped(-5), Quantity::ONE);
        assert_eq!(Quantity::clamped(7).get(), 7);
        assert_eq!(Quantity::clamped(i64::MAX).get(), u32::MAX);
    }

    #[test]
    fn parses_clamped() {
        assert_eq!("3".parse::<Quantity>().unwrap().get(), 3);
        assert_eq!("0".parse::<Quantity>(), Ok(Quantity::ONE));
        assert_eq!(" -2 ".parse::<Quantity>(), Ok(Quantity::ONE));
        assert!("two".parse::<Quantity>().is_err());
    }

    #[test]
    fn adds_saturating() {
        let max = Quantity::clamped(i64::MAX);

        assert_eq!(Quantity::ONE.saturating_add(Quantity::ONE).get(), 2);
        assert_eq!(max.saturating_add(Quantity::ONE), max);
    }
}
