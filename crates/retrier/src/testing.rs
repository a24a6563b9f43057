// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Test utilities shared by the unit tests of this crate.

use std::io::Write;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use crate::{OnFailure, Retryable};

/// Operation that fails a configured number of times before succeeding.
///
/// Failure `n` (1-based) is reported as the error `"failure n"`.
#[derive(Debug)]
pub(crate) struct FlakyOperation {
    failures: Option<u32>,
    calls: Arc<AtomicU32>,
}

impl FlakyOperation {
    pub fn succeeding_after(failures: u32) -> Self {
        Self {
            failures: Some(failures),
            calls: Arc::new(AtomicU32::new(0)),
        }
    }

    pub fn always_failing() -> Self {
        Self {
            failures: None,
            calls: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Shared counter of executions, readable after the operation moved into a retrier.
    pub fn calls(&self) -> Arc<AtomicU32> {
        Arc::clone(&self.calls)
    }
}

impl Retryable for FlakyOperation {
    type Error = String;

    fn exec(&mut self) -> Result<(), String> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;

        match self.failures {
            Some(failures) if call > failures => Ok(()),
            _ => Err(format!("failure {call}")),
        }
    }
}

/// Collects the errors passed to a failure observer.
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordedFailures {
    errors: Arc<Mutex<Vec<String>>>,
}

impl RecordedFailures {
    pub fn observer(&self) -> OnFailure<String> {
        let errors = Arc::clone(&self.errors);
        OnFailure::new(move |error: &String| errors.lock().unwrap().push(error.clone()))
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

/// Collects the formatted output of `tracing` events.
///
/// Clones share one buffer, so events written by the retry loop thread show up in the capture held
/// by the test thread, as long as both run under [`LogCapture::subscriber`].
#[derive(Debug, Clone, Default)]
pub(crate) struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    /// A plain-text subscriber that records events of every level into this capture.
    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync + use<> {
        let capture = self.clone();

        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || capture.clone())
            .finish()
    }

    pub fn assert_contains(&self, expected: &str) {
        let output = String::from_utf8_lossy(&self.buffer.lock().unwrap()).into_owned();

        assert!(output.contains(expected), "missing {expected:?} in captured logs:\n{output}");
    }
}

impl Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
