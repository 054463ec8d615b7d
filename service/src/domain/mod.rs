//! Domain definitions.

/// Defines a trimmed non-empty text newtype with the given maximum length.
macro_rules! define_text {
    (
        $(#[$attr:meta])*
        pub struct $name:ident(max = $max:literal);
    ) => {
        $(#[$attr])*
        #[derive(
            ::derive_more::AsRef,
            Clone,
            ::core::fmt::Debug,
            ::derive_more::Display,
            Eq,
            Hash,
            PartialEq,
        )]
        #[as_ref(str, String)]
        pub struct $name(String);

        impl $name {
            #[doc = concat!("Creates a new [`", stringify!($name), "`] if ")]
            #[doc = "the given `value` is valid."]
            #[must_use]
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let value = value.into();
                Self::check(&value).then_some(Self(value))
            }

            #[doc = concat!("Checks whether the given `value` is a valid [`")]
            #[doc = concat!(stringify!($name), "`].")]
            fn check(value: impl AsRef<str>) -> bool {
                let value = value.as_ref();
                value.trim() == value
                    && !value.is_empty()
                    && value.chars().count() <= $max
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = &'static str;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
                    .ok_or(concat!("invalid `", stringify!($name), "`"))
            }
        }
    };
}
pub(crate) use define_text;

pub mod feedback;
pub mod menu;
pub mod order;
pub mod payment;
pub mod quantity;
pub mod user;

pub use self::{
    feedback::Feedback, menu::Food, order::Order, payment::Payment,
    quantity::Quantity, user::User,
};
