//! Response expectations.
//!
//! An expectation is declared as one or two untyped values, classified by the
//! shape of those values when the response arrives, and checked by the
//! [`ResponseChecker`].

mod canonical;
mod check;
mod classify;
mod failure;
mod matcher;
mod value;
mod verdict;

pub use canonical::to_canonical_value;
pub use check::{ResponseChecker, normalize};
pub use classify::{ClassifiedExpectation, classify};
pub use failure::{DeclarationError, Failure, FailureKind};
pub use matcher::Matcher;
pub use value::{ExpectValue, Expectation};
pub use verdict::{EvaluationReport, Verdict};
