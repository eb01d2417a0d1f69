//! In-memory reporter.

use std::sync::{Mutex, MutexGuard, PoisonError};

use vouch_application::Reporter;
use vouch_domain::Failure;

/// Collects every reported failure, in order.
///
/// Safe to share between agents running on different threads.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    failures: Mutex<Vec<Failure>>,
}

impl RecordingReporter {
    /// Creates an empty reporter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Failure>> {
        self.failures.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a copy of the recorded failures.
    #[must_use]
    pub fn failures(&self) -> Vec<Failure> {
        self.lock().clone()
    }

    /// Returns the recorded failure messages.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.lock().iter().map(ToString::to_string).collect()
    }

    /// Returns the number of recorded failures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Removes and returns the recorded failures.
    pub fn take(&self) -> Vec<Failure> {
        std::mem::take(&mut *self.lock())
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, failure: &Failure) {
        self.lock().push(failure.clone());
    }
}
