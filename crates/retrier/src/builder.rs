// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::borrow::Cow;

use crate::retrier::{DEFAULT_NAME, validate_max_attempts, validate_name};
use crate::{Attempt, OnFailure, Result, Retrier, Retryable};

/// Builder for [`Retrier`].
///
/// Created by [`RetrierBuilder::new`]. The operation is supplied last, in
/// [`build`][Self::build], which also validates the attempt ceiling.
///
/// # Examples
///
/// ```
/// use retrier::RetrierBuilder;
///
/// let retrier = RetrierBuilder::new(3)
///     .name("refresh_token")
///     .on_failure_with(|error: &String, attempt| {
///         eprintln!("attempt {} failed: {error}", attempt.number());
///     })
///     .build(|| Err::<(), _>("token endpoint down".to_string()))?;
///
/// assert_eq!(retrier.name(), "refresh_token");
/// assert_eq!(retrier.max_attempts(), 3);
/// # Ok::<(), retrier::Error>(())
/// ```
#[derive(Debug)]
#[must_use]
pub struct RetrierBuilder<E> {
    max_attempts: u32,
    on_failure: Option<OnFailure<E>>,
    name: Cow<'static, str>,
}

impl<E> RetrierBuilder<E> {
    /// Creates a builder for a retrier that executes its operation at most `max_attempts` times.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            on_failure: None,
            name: Cow::Borrowed(DEFAULT_NAME),
        }
    }

    /// Sets the observer that receives the error of every failed attempt.
    pub fn on_failure(mut self, observer: impl Fn(&E) + Send + Sync + 'static) -> Self {
        self.on_failure = Some(OnFailure::new(observer));
        self
    }

    /// Sets the observer that receives the error and the [`Attempt`] of every failed attempt.
    pub fn on_failure_with(mut self, observer: impl Fn(&E, Attempt) + Send + Sync + 'static) -> Self {
        self.on_failure = Some(OnFailure::with_attempt(observer));
        self
    }

    /// Sets the name of the retry loop thread, also reported in log events.
    ///
    /// Defaults to `retrier`. The name must not contain NUL bytes.
    pub fn name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    /// Builds the retrier for `operation`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAttemptCeiling`][crate::Error::InvalidAttemptCeiling] if the attempt
    /// ceiling is zero, or [`Error::InvalidName`][crate::Error::InvalidName] if the name contains a
    /// NUL byte.
    pub fn build<R>(self, operation: R) -> Result<Retrier<R>>
    where
        R: Retryable<Error = E>,
    {
        validate_max_attempts(self.max_attempts)?;
        validate_name(&self.name)?;

        Ok(Retrier::from_parts(operation, self.max_attempts, self.on_failure, self.name))
    }
}
