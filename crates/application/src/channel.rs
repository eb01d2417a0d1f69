//! Failure channel.
//!
//! Every failure an agent finds goes through exactly one channel, chosen when
//! the agent is built.

use std::fmt;
use std::sync::Arc;

use vouch_domain::Failure;

use crate::ports::Reporter;

/// Where failures go.
#[derive(Clone, Default)]
pub enum FailureChannel {
    /// Forward each failure to a reporter and keep evaluating.
    Report(Arc<dyn Reporter>),
    /// Panic with the failure message.
    #[default]
    Abort,
}

impl FailureChannel {
    /// Creates a reporting channel.
    #[must_use]
    pub fn report(reporter: Arc<dyn Reporter>) -> Self {
        Self::Report(reporter)
    }

    /// Routes one failure.
    ///
    /// # Panics
    ///
    /// Panics with the failure message on the `Abort` channel.
    #[allow(clippy::panic)]
    pub fn raise(&self, failure: &Failure) {
        match self {
            Self::Report(reporter) => reporter.report(failure),
            Self::Abort => panic!("{failure}"),
        }
    }
}

impl fmt::Debug for FailureChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Report(_) => f.write_str("FailureChannel::Report"),
            Self::Abort => f.write_str("FailureChannel::Abort"),
        }
    }
}
