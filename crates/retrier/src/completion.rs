// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Completion signal of a started retry loop.

use std::fmt::Debug;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_channel::oneshot;

/// Read-only snapshot of a retry loop's progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    attempts: u32,
    completed: bool,
}

impl Progress {
    pub(crate) fn new(attempts: u32, completed: bool) -> Self {
        Self { attempts, completed }
    }

    /// Returns the number of times the operation was executed.
    #[must_use]
    pub fn attempts(self) -> u32 {
        self.attempts
    }

    /// Returns true if an attempt succeeded.
    #[must_use]
    pub fn completed(self) -> bool {
        self.completed
    }
}

/// Final state of a retry loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<E> {
    /// An attempt succeeded.
    Succeeded {
        /// Number of executions, including the successful one.
        attempts: u32,
    },

    /// The attempt ceiling was reached without a successful attempt.
    Exhausted {
        /// Number of executions.
        attempts: u32,

        /// Error of the final failed attempt. `None` when the loop executed nothing.
        last_error: Option<E>,
    },
}

impl<E> Outcome<E> {
    /// Returns the number of times the operation was executed.
    #[must_use]
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Succeeded { attempts } | Self::Exhausted { attempts, .. } => *attempts,
        }
    }

    /// Returns true if an attempt succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }

    /// Returns the error of the final failed attempt when the loop gave up.
    #[must_use]
    pub fn last_error(&self) -> Option<&E> {
        match self {
            Self::Succeeded { .. } => None,
            Self::Exhausted { last_error, .. } => last_error.as_ref(),
        }
    }

    /// Returns the progress snapshot matching this outcome.
    #[must_use]
    pub fn progress(&self) -> Progress {
        Progress::new(self.attempts(), self.is_success())
    }

    /// Converts the outcome into a `Result` carrying the attempt count on success.
    ///
    /// # Errors
    ///
    /// Returns the last error (if any attempt ran) when the attempt ceiling was exhausted.
    pub fn into_result(self) -> Result<u32, Option<E>> {
        match self {
            Self::Succeeded { attempts } => Ok(attempts),
            Self::Exhausted { last_error, .. } => Err(last_error),
        }
    }
}

/// A handle to a started retry loop that resolves to its [`Outcome`].
///
/// This is returned by [`Retrier::start`][crate::Retrier::start]. It implements [`Future`], so it
/// can be awaited on any async runtime, or the calling thread can block on it with
/// [`wait`][Self::wait]. Dropping the handle does not stop the loop.
///
/// # Panics
///
/// Awaiting or waiting on a `Completion` panics if the operation or the failure observer
/// panicked on the retry loop thread.
pub struct Completion<E> {
    receiver: oneshot::Receiver<Outcome<E>>,
}

impl<E> Completion<E> {
    pub(crate) fn new(receiver: oneshot::Receiver<Outcome<E>>) -> Self {
        Self { receiver }
    }

    /// Blocks the current thread until the retry loop finishes.
    ///
    /// # Panics
    ///
    /// Panics if the retry loop thread panicked.
    #[must_use]
    pub fn wait(self) -> Outcome<E> {
        futures::executor::block_on(self)
    }
}

impl<E> Future for Completion<E> {
    type Output = Outcome<E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.get_mut().receiver)
            .poll(cx)
            .map(|res| res.expect("retry loop thread panicked"))
    }
}

impl<E> Debug for Completion<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Completion").finish_non_exhaustive()
    }
}
