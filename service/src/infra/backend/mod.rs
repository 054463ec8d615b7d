//! [`Backend`]-related implementations.

#[cfg(all(test, feature = "http"))]
pub(crate) mod fake;
#[cfg(feature = "http")]
pub mod http;

use derive_more::{Display, Error as StdError, From};

#[cfg(feature = "http")]
pub use self::http::Http;

/// Remote operation.
pub use common::Handler as Backend;

/// [`Backend`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    #[cfg(feature = "http")]
    /// [`Http`] error.
    Http(http::Error),
}

impl Error {
    /// Returns the message the [`Backend`] rejected the operation with, if
    /// it did so on business grounds.
    #[must_use]
    pub fn rejection(&self) -> Option<&str> {
        match *self {
            #[cfg(feature = "http")]
            Self::Http(ref e) => e.rejection(),
        }
    }

    /// Indicates whether the [`Backend`] refused the operation for lack of
    /// authorization.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        match *self {
            #[cfg(feature = "http")]
            Self::Http(ref e) => e.is_unauthorized(),
        }
    }
}
