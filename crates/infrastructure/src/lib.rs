//! Vouch Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus configuration and telemetry setup.

pub mod adapters;
pub mod config;
pub mod reporting;
pub mod telemetry;

pub use adapters::ReqwestTransport;
pub use config::{ConfigError, TransportConfig};
pub use reporting::{RecordingReporter, TestReporter, TracingReporter};
pub use telemetry::init_tracing;
