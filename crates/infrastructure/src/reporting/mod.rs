//! Reporter implementations for the failure channel.

mod recording;
mod test_reporter;
mod tracing_reporter;

pub use recording::RecordingReporter;
pub use test_reporter::TestReporter;
pub use tracing_reporter::TracingReporter;
