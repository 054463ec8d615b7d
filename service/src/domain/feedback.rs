//! [`Feedback`] definitions.

use std::str::FromStr;

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{AsRef, Display};

use crate::domain::user;

use super::define_text;

/// Feedback left by a customer.
#[derive(Clone, Debug)]
pub struct Feedback {
    /// ID of this [`Feedback`].
    pub id: Id,

    /// [`Draft`] this [`Feedback`] was submitted with.
    pub content: Draft,

    /// [`DateTime`] when this [`Feedback`] was created.
    pub created_at: CreationDateTime,
}

/// [`Feedback`] contents submitted by a customer.
#[derive(Clone, Debug)]
pub struct Draft {
    /// [`CustomerName`] of the author.
    pub customer_name: CustomerName,

    /// [`user::Email`] of the author.
    pub email: user::Email,

    /// [`Rating`] given.
    pub rating: Rating,

    /// Free-form [`Text`].
    pub text: Text,
}

/// ID of a [`Feedback`], opaque to the client.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
pub struct Id(String);

impl Id {
    /// Creates a new [`Id`] if the given `id` is not blank.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        (!id.trim().is_empty()).then_some(Self(id))
    }
}

define_text! {
    /// Name a customer signs a [`Feedback`] with.
    pub struct CustomerName(max = 200);
}

define_text! {
    /// Text of a [`Feedback`].
    pub struct Text(max = 4096);
}

impl Text {
    /// Returns this [`Text`] cut to at most `max` characters, with an
    /// ellipsis appended if anything was cut.
    #[must_use]
    pub fn excerpt(&self, max: usize) -> String {
        if self.0.chars().count() <= max {
            return self.0.clone();
        }
        let mut cut = self.0.chars().take(max).collect::<String>();
        cut.push_str("...");
        cut
    }
}

/// Star rating of a [`Feedback`], from 1 to 5.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Rating(u8);

impl Rating {
    /// Highest possible [`Rating`].
    pub const MAX: u8 = 5;

    /// Creates a new [`Rating`] if the given `stars` are within `1..=5`.
    #[must_use]
    pub const fn new(stars: u8) -> Option<Self> {
        if stars >= 1 && stars <= Self::MAX {
            Some(Self(stars))
        } else {
            None
        }
    }

    /// Returns the number of stars of this [`Rating`].
    #[must_use]
    pub const fn stars(self) -> u8 {
        self.0
    }
}

impl FromStr for Rating {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse()
            .ok()
            .and_then(Self::new)
            .ok_or("invalid `Rating`")
    }
}

/// [`DateTime`] when a [`Feedback`] was created.
pub type CreationDateTime = DateTimeOf<(Feedback, unit::Creation)>;
