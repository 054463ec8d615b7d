//! [`Session`] definitions.

use derive_more::{AsRef, Display};
use secrecy::{zeroize::Zeroize, CloneableSecret, SecretBox};

#[cfg(doc)]
use crate::domain::User;
use crate::domain::user;

/// Authenticated session of a [`User`].
#[derive(Clone, Debug)]
pub struct Session {
    /// [`Token`] authorizing requests of this [`Session`].
    pub token: SecretBox<Token>,
}

/// Credentials exchanged for a [`Session`].
#[derive(Clone, Debug)]
pub struct Credentials {
    /// [`user::Email`] of a [`User`].
    pub email: user::Email,

    /// [`user::Password`] of a [`User`].
    pub password: SecretBox<user::Password>,
}

/// Marker selecting the [`User`] of the current [`Session`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Current;

/// Access token of a [`Session`].
#[derive(AsRef, Clone, Debug, Display)]
#[as_ref(str)]
pub struct Token(String);

impl Token {
    /// Creates a new [`Token`] if the given `token` is not blank.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        (!token.trim().is_empty()).then_some(Self(token))
    }
}

impl CloneableSecret for Token {}
impl Zeroize for Token {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}
