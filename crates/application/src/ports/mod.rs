//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the evaluation driver and the outside
//! world. Each port is a trait implemented by adapters in the infrastructure layer.

mod reporter;
mod transport;

pub use reporter::Reporter;
pub use transport::{Transport, TransportError};
