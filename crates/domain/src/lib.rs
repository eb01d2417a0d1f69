//! Vouch Domain - Core types for HTTP expectations
//!
//! This crate defines the request model an agent sends, the response snapshot
//! it receives, and the expectation model that is checked against it.
//! All types here are pure Rust with no I/O dependencies.

pub mod cookie;
pub mod error;
pub mod expectation;
pub mod request;
pub mod response;

pub use cookie::Cookie;
pub use error::{DomainError, DomainResult};
pub use expectation::{
    ClassifiedExpectation, DeclarationError, EvaluationReport, ExpectValue, Expectation, Failure,
    FailureKind, Matcher, ResponseChecker, Verdict, classify, normalize,
};
pub use request::{HttpMethod, RequestBody, RequestSpec, SendBody};
pub use response::ResponseSnapshot;
