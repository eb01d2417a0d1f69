//! Vouch Application - Ports and evaluation driver
//!
//! This crate defines the application layer with:
//! - Port traits for sending requests and reporting failures
//! - The failure channel that routes assertion failures
//! - The `Agent`, which builds a request and evaluates its expectations

pub mod agent;
pub mod channel;
pub mod error;
pub mod ports;

pub use agent::Agent;
pub use channel::FailureChannel;
pub use error::{ApplicationError, ApplicationResult};
pub use ports::{Reporter, Transport, TransportError};
