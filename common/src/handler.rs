//! [`Handler`] abstractions.

use std::future::Future;

/// Executable handler of `Args`.
///
/// Commands, queries, background tasks and database operations are all
/// expressed as [`Handler`] implementations over their argument types, so
/// callers stay generic over the concrete infrastructure.
pub trait Handler<Args = ()> {
    /// Type of the value produced by a successful execution.
    type Ok;

    /// Type of the error produced by a failed execution.
    type Err;

    /// Executes this [`Handler`] with the provided arguments.
    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>>;
}
