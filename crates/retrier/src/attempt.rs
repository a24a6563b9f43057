// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt::Display;

/// Describes a single executed attempt of a retry loop.
///
/// The index is 0-based: the first execution of the operation has index 0. The last flag is set
/// when the attempt used up the final slot of the attempt ceiling, meaning no further attempt
/// follows a failure.
///
/// # Examples
///
/// ```
/// use retrier::Attempt;
///
/// let attempt = Attempt::new(0, false);
/// assert!(attempt.is_first());
/// assert!(!attempt.is_last());
/// assert_eq!(attempt.number(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attempt {
    index: u32,
    is_last: bool,
}

impl Attempt {
    /// Creates a new attempt with the given 0-based index.
    #[must_use]
    pub fn new(index: u32, is_last: bool) -> Self {
        Self { index, is_last }
    }

    /// Builds the attempt that corresponds to `attempts` executions made out of `max_attempts`.
    pub(crate) fn executed(attempts: u32, max_attempts: u32) -> Self {
        Self::new(attempts.saturating_sub(1), attempts >= max_attempts)
    }

    /// Returns true if this is the first attempt (index 0).
    #[must_use]
    pub fn is_first(self) -> bool {
        self.index == 0
    }

    /// Returns true if no further attempt follows a failure of this one.
    #[must_use]
    pub fn is_last(self) -> bool {
        self.is_last
    }

    /// Returns the attempt index (0-based).
    #[must_use]
    pub fn index(self) -> u32 {
        self.index
    }

    /// Returns the attempt number (1-based), matching the number of executions made so far.
    #[must_use]
    pub fn number(self) -> u32 {
        self.index.saturating_add(1)
    }
}

impl Display for Attempt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.index.fmt(f)
    }
}
