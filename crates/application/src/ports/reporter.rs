//! Reporter port

use vouch_domain::Failure;

/// Receives failures without halting the caller.
///
/// Implementations record, log or forward each failure. They are shared across
/// agents, so they must be thread-safe.
pub trait Reporter: Send + Sync {
    /// Records one failure.
    fn report(&self, failure: &Failure);
}
