// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::sync::Arc;

use crate::Attempt;

type FailureFn<E> = dyn Fn(&E, Attempt) + Send + Sync;

/// Observer that is notified of every failed attempt.
///
/// The observer runs synchronously on the retry loop thread, once per failure, before the next
/// attempt starts. It must not block indefinitely: the retrier enforces no timeout.
///
/// The wrapped function is stored behind an `Arc`, so cloning an observer is cheap and the clones
/// share the same function.
///
/// # Examples
///
/// ```
/// use retrier::OnFailure;
///
/// let observer = OnFailure::new(|error: &String| eprintln!("attempt failed: {error}"));
///
/// let verbose = OnFailure::with_attempt(|error: &String, attempt| {
///     eprintln!("attempt {} failed: {error}", attempt.number());
/// });
/// # let _ = (observer, verbose);
/// ```
pub struct OnFailure<E>(Arc<FailureFn<E>>);

impl<E> OnFailure<E> {
    /// Creates an observer that receives the error of each failed attempt.
    pub fn new<F>(observer: F) -> Self
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        Self(Arc::new(move |error, _attempt| observer(error)))
    }

    /// Creates an observer that receives the error together with the attempt that produced it.
    pub fn with_attempt<F>(observer: F) -> Self
    where
        F: Fn(&E, Attempt) + Send + Sync + 'static,
    {
        Self(Arc::new(observer))
    }

    pub(crate) fn call(&self, error: &E, attempt: Attempt) {
        (self.0)(error, attempt);
    }
}

impl<E> Clone for OnFailure<E> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<E> std::fmt::Debug for OnFailure<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnFailure").finish()
    }
}
