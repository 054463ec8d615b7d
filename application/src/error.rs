//! [`Error`]-related definitions.

use std::fmt;

use derive_more::Error as StdError;
use itertools::Itertools as _;
use service::{command, infra::backend, list};
use tracerr::{Trace, Traced};

/// Defines a new error type.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_error {
    (
        enum $name:ident {
            $(
                #[code = $code:literal]
                #[message = $message:literal]
                $variant:ident
            ),* $(,)?
        }
    ) => {
        /// Error type.
        #[derive(
            Clone,
            Copy,
            Debug,
            ::derive_more::Display,
            ::derive_more::Error
        )]
        #[repr(u16)]
        pub enum $name {
            $(
                #[display($message)]
                #[doc = $message]
                $variant,
            )*
        }

        impl From<$name> for $crate::Error {
            fn from(err: $name) -> Self {
                match err {
                    $(
                        $name::$variant => Self {
                            code: $code,
                            message: $message.to_string(),
                            backtrace: None,
                        },
                    )*
                }
            }
        }
    };
}

/// User-facing [`Error`] shown as a notice in the shell.
#[derive(Clone, Debug, StdError)]
pub struct Error {
    /// [`Error`] code.
    pub code: Code,

    /// Backtrace of this [`Error`].
    #[error(not(backtrace))]
    pub backtrace: Option<Trace>,

    /// [`Error`] message.
    pub message: String,
}

impl Error {
    /// Create a new [`Error`] representing an unexpected failure.
    #[must_use]
    pub fn internal(msg: &impl ToString) -> Self {
        Self {
            code: "INTERNAL_ERROR",
            message: msg.to_string(),
            backtrace: None,
        }
    }

    /// Create a new [`Error`] representing malformed user input.
    #[must_use]
    pub fn invalid_input(msg: &impl ToString) -> Self {
        Self {
            code: "INVALID_INPUT",
            message: msg.to_string(),
            backtrace: None,
        }
    }

    /// Returns this [`Error`] without its backtrace.
    #[must_use]
    pub fn concise(self) -> Self {
        Self {
            backtrace: None,
            ..self
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            code,
            backtrace,
            message,
        } = self;

        write!(
            f,
            "[{code}]: {message}{}",
            backtrace
                .iter()
                .format_with("\n", |trace, f| f(&format_args!("\n{trace}"))),
        )
    }
}

/// [`Error`] code.
pub type Code = &'static str;

/// Helper trait for converting types into [`Error`]s.
pub trait AsError {
    /// Tries to convert the type into an [`Error`].
    ///
    /// [`None`] is returned if the type cannot be converted into an [`Error`].
    fn try_as_error(&self) -> Option<Error>;

    /// Converts the type into an [`Error`].
    fn as_error(&self) -> Error
    where
        Self: fmt::Display,
    {
        self.try_as_error()
            .unwrap_or_else(|| Error::internal(&self))
    }

    /// Converts the type into an [`Error`] by consuming it.
    fn into_error(self) -> Error
    where
        Self: fmt::Display + Sized,
    {
        self.as_error()
    }
}

impl<E: AsError> AsError for Traced<E> {
    fn try_as_error(&self) -> Option<Error> {
        let mut error = self.as_ref().try_as_error()?;
        error.backtrace = Some(self.trace().clone());
        Some(error)
    }
}

impl AsError for backend::Error {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "UNAUTHORIZED"]
                #[message = "Please log in to continue"]
                Unauthorized,
            }
        }

        if let Some(message) = self.rejection() {
            return Some(crate::Error {
                code: "REJECTED",
                message: message.to_owned(),
                backtrace: None,
            });
        }
        self.is_unauthorized().then(|| Error::Unauthorized.into())
    }
}

impl AsError for list::OutOfRange {
    fn try_as_error(&self) -> Option<Error> {
        Some(Error {
            code: "PAGE_OUT_OF_RANGE",
            message: self.to_string(),
            backtrace: None,
        })
    }
}

impl AsError for command::log_in::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "WRONG_CREDENTIALS"]
                #[message = "Invalid email or password"]
                WrongCredentials,
            }
        }

        match self {
            Self::Backend(e) => e.try_as_error(),
            Self::WrongCredentials => Some(Error::WrongCredentials.into()),
        }
    }
}

impl AsError for command::register_user::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "PASSWORD_MISMATCH"]
                #[message = "Passwords do not match"]
                PasswordMismatch,
            }
        }

        match self {
            Self::Backend(e) => e.try_as_error(),
            Self::PasswordMismatch => Some(Error::PasswordMismatch.into()),
        }
    }
}

define_error! {
    enum FoodError {
        #[code = "ZERO_PRICE"]
        #[message = "Price must be greater than zero"]
        ZeroPrice,
    }
}

impl AsError for command::create_food::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Backend(e) => e.try_as_error(),
            Self::ZeroPrice => Some(FoodError::ZeroPrice.into()),
        }
    }
}

impl AsError for command::update_food::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Backend(e) => e.try_as_error(),
            Self::ZeroPrice => Some(FoodError::ZeroPrice.into()),
        }
    }
}

impl AsError for command::place_order::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Backend(e) => e.try_as_error(),
            Self::PaymentMethodNotAllowed { .. } => Some(Error {
                code: "PAYMENT_METHOD_NOT_ALLOWED",
                message: self.to_string(),
                backtrace: None,
            }),
        }
    }
}

impl AsError for command::checkout::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "EMPTY_CART"]
                #[message = "Your cart is empty"]
                EmptyCart,
            }
        }

        match self {
            Self::EmptyCart => Some(Error::EmptyCart.into()),
            Self::PlaceOrder { source, .. } => source.try_as_error(),
        }
    }
}

impl AsError for command::make_payment::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "NOTHING_TO_PAY"]
                #[message = "There is nothing to pay"]
                NothingToPay,
            }
        }

        match self {
            Self::Backend(e) => e.try_as_error(),
            Self::NothingToPay => Some(Error::NothingToPay.into()),
        }
    }
}
