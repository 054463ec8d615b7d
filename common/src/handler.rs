//! [`Handler`] abstractions.

use std::future::Future;

/// Executable handler.
///
/// Implemented once per argument type, so the same executor (a service or a
/// backend client) may handle any number of distinct operations.
pub trait Handler<Args = ()> {
    /// Type of successful [`Handler`] result.
    type Ok;

    /// Type of this [`Handler`] error.
    type Err;

    /// Executes this [`Handler`] with the provided arguments.
    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>>;
}
