//! Expectation classifier.

use super::{DeclarationError, ExpectValue, Expectation, Matcher};

/// What a declared expectation checks, decided from the shape of its values.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifiedExpectation {
    /// `expect(200)`
    Status(i64),
    /// `expect(("Content-Type", "application/json"))`
    Header {
        /// Header name, looked up case-insensitively.
        name: String,
        /// Expected value.
        value: String,
    },
    /// `expect("body")` or `expect(json!({..}))`
    Body(Matcher),
    /// `expect((200, "body"))`: status first, then body.
    StatusAndBody {
        /// Expected status code.
        status: i64,
        /// Expected body.
        body: Matcher,
    },
    /// A malformed declaration.
    Invalid(DeclarationError),
}

/// Classifies the values of one expectation.
///
/// One value: an integer is a status check, anything else a body check. Two
/// values: an integer first means status and body, text first means a header
/// check. Every other shape is invalid.
#[must_use]
pub fn classify(args: Vec<ExpectValue>) -> ClassifiedExpectation {
    let arity = args.len();
    let mut values = args.into_iter();

    match (values.next(), values.next(), arity) {
        (Some(ExpectValue::Int(status)), None, 1) => ClassifiedExpectation::Status(status),
        (Some(matcher), None, 1) => ClassifiedExpectation::Body(Matcher::from(matcher)),
        (Some(ExpectValue::Int(status)), Some(body), 2) => ClassifiedExpectation::StatusAndBody {
            status,
            body: Matcher::from(body),
        },
        (Some(ExpectValue::Text(name)), Some(ExpectValue::Text(value)), 2) => {
            ClassifiedExpectation::Header { name, value }
        }
        (_, _, 2) => ClassifiedExpectation::Invalid(DeclarationError::UnknownBehavior),
        _ => ClassifiedExpectation::Invalid(DeclarationError::WrongArity(arity)),
    }
}

impl Expectation {
    /// Consumes the expectation and classifies it.
    #[must_use]
    pub fn classify(self) -> ClassifiedExpectation {
        classify(self.into_args())
    }
}
