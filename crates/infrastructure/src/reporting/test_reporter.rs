//! Reporter that fails the surrounding test.

use vouch_application::Reporter;
use vouch_domain::Failure;

use super::RecordingReporter;

/// Records failures without stopping, then panics when dropped if any were
/// recorded.
///
/// Lets a test see every failed expectation at once instead of only the first.
///
/// ```ignore
/// let reporter = Arc::new(TestReporter::new());
/// vouch::request_with_reporter(&base, reporter.clone())
///     .get("/")
///     .expect(200)
///     .expect("ok")
///     .end()
///     .await;
/// // reporter drops at the end of the test and panics with both failures
/// ```
#[derive(Debug, Default)]
pub struct TestReporter {
    inner: RecordingReporter,
}

impl TestReporter {
    /// Creates an empty reporter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded failure messages.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.inner.messages()
    }

    /// Discards recorded failures so that dropping does not panic.
    pub fn clear(&self) -> Vec<Failure> {
        self.inner.take()
    }
}

impl Reporter for TestReporter {
    fn report(&self, failure: &Failure) {
        self.inner.report(failure);
    }
}

impl Drop for TestReporter {
    #[allow(clippy::panic)]
    fn drop(&mut self) {
        // A second panic while unwinding would abort the test binary.
        if std::thread::panicking() {
            return;
        }
        let messages = self.inner.messages();
        if !messages.is_empty() {
            panic!(
                "{} expectation(s) failed:\n{}",
                messages.len(),
                messages.join("\n")
            );
        }
    }
}
