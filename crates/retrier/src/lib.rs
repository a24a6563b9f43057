// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Fire-and-forget retry loop for fallible operations.
//!
//! A [`Retrier`] executes an operation until it succeeds or until an attempt ceiling is reached,
//! optionally reporting each failure to an [`OnFailure`] observer. The loop runs on its own thread,
//! detached from the caller.
//!
//! # Core Types
//!
//! - [`Retryable`]: the operation contract. Any `FnMut() -> Result<(), E>` closure qualifies.
//! - [`Retrier`]: the retry loop controller, created by [`Retrier::new`] or [`RetrierBuilder`].
//! - [`Completion`]: returned by [`Retrier::start`], resolves to the loop's [`Outcome`].
//!
//! # Quick Start
//!
//! ```rust
//! use retrier::{OnFailure, Retrier};
//!
//! let mut connected = false;
//! let connect = move || {
//!     if connected {
//!         return Ok(());
//!     }
//!     connected = true;
//!     Err("connection refused".to_string())
//! };
//!
//! let retrier = Retrier::new(
//!     Some(connect),
//!     3,
//!     Some(OnFailure::new(|error: &String| eprintln!("connect failed: {error}"))),
//! )?;
//!
//! // Returns immediately, the loop runs on a dedicated thread.
//! let completion = retrier.start()?;
//!
//! // Optionally, wait for the loop to finish. Dropping `completion` instead is fine too.
//! let outcome = completion.wait();
//! assert!(outcome.is_success());
//! assert_eq!(outcome.attempts(), 2);
//! # Ok::<(), retrier::Error>(())
//! ```
//!
//! # Retry Semantics
//!
//! - Attempts run strictly one after another, with no delay, backoff or jitter between them.
//! - Every error is retryable; there is no classification of errors.
//! - A started loop cannot be cancelled. It ends at the first success or after `max_attempts`
//!   executions.
//! - The observer runs synchronously on the loop thread, once per failed attempt, in order.
//! - When the ceiling is reached, [`Outcome::Exhausted`] carries the error of the final attempt.
//!
//! # Errors
//!
//! Construction fails with [`Error::InvalidAttemptCeiling`] when the attempt ceiling is zero, and
//! with [`Error::MissingOperation`] when no operation is given. The ceiling is checked first.
//! [`RetrierBuilder::build`] also rejects a loop name containing a NUL byte with
//! [`Error::InvalidName`], since the name becomes the thread name.
//!
//! # Features
//!
//! - `logs`: emits `tracing` events for failed attempts and for the final outcome.

mod attempt;
mod builder;
mod callbacks;
mod completion;
mod error;
mod retrier;
mod retryable;

#[cfg(test)]
pub(crate) mod testing;

pub use attempt::Attempt;
pub use builder::RetrierBuilder;
pub use callbacks::OnFailure;
pub use completion::{Completion, Outcome, Progress};
pub use error::{Error, Result};
pub use retrier::Retrier;
pub use retryable::Retryable;
