// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::borrow::Cow;
use std::fmt::Debug;
use std::thread;

use futures_channel::oneshot;

use crate::{Attempt, Completion, Error, OnFailure, Outcome, Progress, Result, Retryable};

/// Name given to the retry loop thread unless configured otherwise.
pub(crate) const DEFAULT_NAME: &str = "retrier";

/// Executes a fallible operation until it succeeds or the attempt ceiling is reached.
///
/// A `Retrier` owns the operation, the attempt ceiling and an optional [`OnFailure`] observer.
/// Calling [`start`][Self::start] moves the retrier onto a dedicated thread and returns
/// immediately. Attempts run back to back, one at a time, with no delay between them. Once started,
/// the loop cannot be cancelled; it ends at the first success or after `max_attempts` executions.
///
/// Every failed attempt is reported to the observer and otherwise discarded, except for the final
/// one, which is available through [`Outcome::Exhausted`] when the ceiling is reached.
///
/// # Examples
///
/// ```
/// use retrier::{OnFailure, Outcome, Retrier};
///
/// let mut calls = 0;
/// let operation = move || {
///     calls += 1;
///     if calls < 3 { Err(format!("call {calls} failed")) } else { Ok(()) }
/// };
///
/// let retrier = Retrier::new(
///     Some(operation),
///     5,
///     Some(OnFailure::new(|error: &String| eprintln!("{error}"))),
/// )?;
///
/// let outcome = retrier.start()?.wait();
/// assert_eq!(outcome, Outcome::Succeeded { attempts: 3 });
/// # Ok::<(), retrier::Error>(())
/// ```
pub struct Retrier<R: Retryable> {
    max_attempts: u32,
    attempts: u32,
    completed: bool,
    operation: R,
    on_failure: Option<OnFailure<R::Error>>,
    name: Cow<'static, str>,
}

impl<R: Retryable> Retrier<R> {
    /// Creates a retrier for `operation` that executes it at most `max_attempts` times.
    ///
    /// The attempt ceiling is validated before the operation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAttemptCeiling`] if `max_attempts` is zero, or
    /// [`Error::MissingOperation`] if `operation` is `None`.
    pub fn new(operation: Option<R>, max_attempts: u32, on_failure: Option<OnFailure<R::Error>>) -> Result<Self> {
        validate_max_attempts(max_attempts)?;
        let operation = operation.ok_or(Error::MissingOperation)?;

        Ok(Self::from_parts(operation, max_attempts, on_failure, Cow::Borrowed(DEFAULT_NAME)))
    }

    pub(crate) fn from_parts(
        operation: R,
        max_attempts: u32,
        on_failure: Option<OnFailure<R::Error>>,
        name: Cow<'static, str>,
    ) -> Self {
        Self {
            max_attempts,
            attempts: 0,
            completed: false,
            operation,
            on_failure,
            name,
        }
    }

    /// Returns the maximum number of times the operation is executed.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Returns the name used for the retry loop thread and in log events.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns a snapshot of the attempts made so far and whether one of them succeeded.
    #[must_use]
    pub fn progress(&self) -> Progress {
        Progress::new(self.attempts, self.completed)
    }

    /// Launches the retry loop on a dedicated thread and returns without waiting for it.
    ///
    /// The returned [`Completion`] resolves to the loop's [`Outcome`]. It may be dropped to run the
    /// loop in fire-and-forget mode.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Spawn`] if the operating system fails to create the thread.
    pub fn start(self) -> Result<Completion<R::Error>>
    where
        R: Send + 'static,
        R::Error: Send + 'static,
    {
        let (sender, receiver) = oneshot::channel();

        thread::Builder::new().name(self.name.to_string()).spawn(move || {
            let mut retrier = self;
            let outcome = retrier.run();

            // The caller may have dropped the completion handle; nobody is left to tell.
            let _ = sender.send(outcome);
        })?;

        Ok(Completion::new(receiver))
    }

    /// Runs the retry loop to its end on the current thread.
    ///
    /// This is the loop that [`start`][Self::start] runs on its own thread. The loop performs no
    /// executions if the retrier already reached its terminal state.
    pub fn run(&mut self) -> Outcome<R::Error> {
        let mut last_error = None;

        while !self.is_done() {
            match self.execute() {
                Ok(()) => self.completed = true,
                Err(error) => {
                    let attempt = Attempt::executed(self.attempts, self.max_attempts);
                    self.emit_failure(attempt);

                    if let Some(on_failure) = &self.on_failure {
                        on_failure.call(&error, attempt);
                    }

                    last_error = Some(error);
                }
            }
        }

        self.finish(last_error)
    }

    fn execute(&mut self) -> std::result::Result<(), R::Error> {
        self.attempts = self.attempts.saturating_add(1);
        self.operation.exec()
    }

    pub(crate) fn is_done(&self) -> bool {
        self.attempts >= self.max_attempts || self.completed
    }

    fn finish(&self, last_error: Option<R::Error>) -> Outcome<R::Error> {
        let outcome = if self.completed {
            Outcome::Succeeded { attempts: self.attempts }
        } else {
            Outcome::Exhausted {
                attempts: self.attempts,
                last_error,
            }
        };

        self.emit_finished(&outcome);
        outcome
    }

    #[cfg_attr(
        not(any(feature = "logs", test)),
        expect(unused_variables, clippy::unused_self, reason = "unused when logs feature not used")
    )]
    fn emit_failure(&self, attempt: Attempt) {
        #[cfg(any(feature = "logs", test))]
        tracing::event!(
            name: "retrier.attempt_failed",
            tracing::Level::WARN,
            retrier.name = %self.name,
            attempt.index = attempt.index(),
            attempt.is_last = attempt.is_last(),
            "attempt failed",
        );
    }

    #[cfg_attr(
        not(any(feature = "logs", test)),
        expect(unused_variables, clippy::unused_self, reason = "unused when logs feature not used")
    )]
    fn emit_finished(&self, outcome: &Outcome<R::Error>) {
        #[cfg(any(feature = "logs", test))]
        if outcome.is_success() {
            tracing::event!(
                name: "retrier.succeeded",
                tracing::Level::DEBUG,
                retrier.name = %self.name,
                attempts = outcome.attempts(),
                "operation succeeded",
            );
        } else {
            tracing::event!(
                name: "retrier.exhausted",
                tracing::Level::WARN,
                retrier.name = %self.name,
                attempts = outcome.attempts(),
                "attempt ceiling reached without success",
            );
        }
    }
}

pub(crate) fn validate_name(name: &str) -> Result<()> {
    if name.contains('\0') {
        return Err(Error::InvalidName { name: name.to_string() });
    }

    Ok(())
}

pub(crate) fn validate_max_attempts(max_attempts: u32) -> Result<()> {
    if max_attempts < 1 {
        return Err(Error::InvalidAttemptCeiling { max_attempts });
    }

    Ok(())
}

impl<R: Retryable> Debug for Retrier<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Retrier")
            .field("name", &self.name)
            .field("max_attempts", &self.max_attempts)
            .field("attempts", &self.attempts)
            .field("completed", &self.completed)
            .field("on_failure", &self.on_failure)
            .finish_non_exhaustive()
    }
}
