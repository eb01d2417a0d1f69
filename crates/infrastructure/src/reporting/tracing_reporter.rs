//! Reporter that logs failures.

use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::error;
use vouch_application::Reporter;
use vouch_domain::Failure;

/// Emits each failure as a `tracing` error event and counts them.
#[derive(Debug, Default)]
pub struct TracingReporter {
    count: AtomicUsize,
}

impl TracingReporter {
    /// Creates a reporter with a zero count.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how many failures were reported.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }
}

impl Reporter for TracingReporter {
    fn report(&self, failure: &Failure) {
        let seq = self.count.fetch_add(1, Ordering::Relaxed) + 1;
        error!(seq, kind = ?failure.kind(), "{failure}");
    }
}
