// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use thiserror::Error;

/// A specialized `Result` type for retrier operations that return an [`Error`][enum@Error] on failure.
pub type Result<T> = std::result::Result<T, Error>;

/// An error returned while constructing or launching a [`Retrier`][crate::Retrier].
///
/// Failures of the retried operation itself are never reported through this type. Those go to the
/// failure observer and to [`Outcome::Exhausted`][crate::Outcome::Exhausted].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The attempt ceiling must allow at least one attempt.
    #[error("max attempts must be greater than zero, got {max_attempts}")]
    InvalidAttemptCeiling {
        /// The rejected attempt ceiling.
        max_attempts: u32,
    },

    /// No operation was supplied to retry.
    #[error("retryable operation must be provided")]
    MissingOperation,

    /// The retry loop name cannot be used as a thread name because it contains a NUL byte.
    #[error("retrier name must not contain NUL bytes, got {name:?}")]
    InvalidName {
        /// The rejected name.
        name: String,
    },

    /// The operating system refused to create the thread that runs the retry loop.
    #[error("failed to spawn retry loop thread")]
    Spawn(#[from] std::io::Error),
}
