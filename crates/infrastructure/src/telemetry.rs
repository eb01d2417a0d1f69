//! Tracing subscriber setup.
//!
//! Agents and the reqwest transport emit `tracing` events but never install a
//! subscriber. Test suites that want to see them call [`init_tracing`] once.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `level`. With `json` set, events are written
/// as newline-delimited JSON. Output goes through the test writer so that
/// `cargo test` captures it per test.
///
/// Returns false if a global subscriber was already installed; later calls are
/// otherwise ignored.
pub fn init_tracing(json: bool, level: Level) -> bool {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_test_writer().json())
            .try_init()
            .is_ok()
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_test_writer().with_target(false))
            .try_init()
            .is_ok()
    }
}
