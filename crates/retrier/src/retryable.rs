// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

/// A fallible action that can be executed repeatedly by a [`Retrier`][crate::Retrier].
///
/// The action takes no input and produces no value. It either succeeds or fails with an error
/// that is forwarded to the failure observer.
///
/// Any `FnMut() -> Result<(), E>` closure is retryable:
///
/// ```
/// use retrier::Retryable;
///
/// let mut calls = 0;
/// let mut operation = move || {
///     calls += 1;
///     if calls < 2 { Err("not yet") } else { Ok(()) }
/// };
///
/// assert_eq!(operation.exec(), Err("not yet"));
/// assert_eq!(operation.exec(), Ok(()));
/// ```
///
/// Stateful operations can implement the trait directly:
///
/// ```
/// use retrier::Retryable;
///
/// struct Ping {
///     remaining_failures: u32,
/// }
///
/// impl Retryable for Ping {
///     type Error = String;
///
///     fn exec(&mut self) -> Result<(), Self::Error> {
///         if self.remaining_failures == 0 {
///             return Ok(());
///         }
///
///         self.remaining_failures -= 1;
///         Err("host unreachable".to_string())
///     }
/// }
/// ```
pub trait Retryable {
    /// The error produced by a failed attempt.
    type Error;

    /// Executes a single attempt.
    ///
    /// # Errors
    ///
    /// Returns the error of the failed attempt. The retrier treats every error as retryable.
    fn exec(&mut self) -> Result<(), Self::Error>;
}

impl<F, E> Retryable for F
where
    F: FnMut() -> Result<(), E>,
{
    type Error = E;

    fn exec(&mut self) -> Result<(), Self::Error> {
        self()
    }
}
