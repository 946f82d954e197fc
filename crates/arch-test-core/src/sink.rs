//! The reporting seam: where violations and errors end up.

use std::sync::{Mutex, PoisonError};

/// Receives failure messages from a running check.
///
/// Invoked once per violation and once per resolution or expansion error.
/// Implementations must tolerate multiple calls per check and must not
/// assume a call halts execution; the check always runs to completion.
/// Typical implementations forward to an assertion framework's failure
/// mechanism.
pub trait ReportSink {
    /// Records one failure message.
    fn report(&self, message: &str);
}

/// A sink that records every message, for tests and custom bindings.
#[derive(Debug, Default)]
pub struct CollectingSink {
    messages: Mutex<Vec<String>>,
}

impl CollectingSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every message reported so far.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.lock().clone()
    }

    /// Removes and returns every message reported so far.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lock())
    }

    /// Whether nothing has been reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        self.messages.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ReportSink for CollectingSink {
    fn report(&self, message: &str) {
        self.lock().push(message.to_string());
    }
}
