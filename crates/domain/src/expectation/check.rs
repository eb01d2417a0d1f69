//! Matcher engine.
//!
//! Checks classified expectations against a response snapshot. Body checks
//! dispatch on the response content type: `text/*` bodies compare exactly,
//! `application/json` bodies compare after whitespace normalization, anything
//! else is unsupported.

use super::{ClassifiedExpectation, DeclarationError, Failure, Matcher, Verdict};
use crate::response::ResponseSnapshot;

const JSON_PREFIX: &str = "application/json";
const TEXT_PREFIX: &str = "text/";

/// Removes every space, tab and newline.
///
/// JSON comparison stays textual: field order still matters after normalization.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, ' ' | '\t' | '\n'))
        .collect()
}

/// Checks expectations against responses.
#[derive(Debug, Default, Clone, Copy)]
pub struct ResponseChecker;

impl ResponseChecker {
    /// Create a new checker.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Checks one classified expectation.
    ///
    /// Returns one verdict per check; a combined status and body expectation
    /// yields the status verdict before the body verdict.
    #[must_use]
    pub fn check(
        &self,
        expectation: &ClassifiedExpectation,
        response: &ResponseSnapshot,
    ) -> Vec<Verdict> {
        match expectation {
            ClassifiedExpectation::Status(expected) => vec![self.check_status(*expected, response)],
            ClassifiedExpectation::Header { name, value } => {
                vec![self.check_header(name, value, response)]
            }
            ClassifiedExpectation::Body(matcher) => vec![self.check_body(matcher, response)],
            ClassifiedExpectation::StatusAndBody { status, body } => vec![
                self.check_status(*status, response),
                self.check_body(body, response),
            ],
            ClassifiedExpectation::Invalid(error) => vec![Verdict::fail(
                "Expectation is well-formed",
                Failure::Declaration(error.clone()),
            )],
        }
    }

    /// Checks the status code for exact equality.
    #[must_use]
    pub fn check_status(&self, expected: i64, response: &ResponseSnapshot) -> Verdict {
        let description = format!("Status code = {expected}");
        let actual = response.status();

        if i64::from(actual) == expected {
            Verdict::pass(description)
        } else {
            Verdict::fail(description, Failure::Status { expected, actual })
        }
    }

    /// Checks a header value for exact equality; an absent header reads as empty.
    #[must_use]
    pub fn check_header(&self, name: &str, expected: &str, response: &ResponseSnapshot) -> Verdict {
        let description = format!("Header '{name}' equals '{expected}'");
        let actual = response.header(name).unwrap_or_default();

        if actual == expected {
            Verdict::pass(description)
        } else {
            Verdict::fail(
                description,
                Failure::Header {
                    name: name.to_string(),
                    expected: expected.to_string(),
                    actual: actual.to_string(),
                },
            )
        }
    }

    /// Checks the body according to the response content type.
    #[must_use]
    pub fn check_body(&self, matcher: &Matcher, response: &ResponseSnapshot) -> Verdict {
        let content_type = response.content_type();

        if content_type.starts_with(JSON_PREFIX) {
            Self::check_json_body(matcher, response)
        } else if content_type.starts_with(TEXT_PREFIX) {
            Self::check_text_body(matcher, response)
        } else {
            Verdict::fail(
                "Body equals expected",
                Failure::UnsupportedContentType(content_type.to_string()),
            )
        }
    }

    fn check_json_body(matcher: &Matcher, response: &ResponseSnapshot) -> Verdict {
        let description = "Body equals expected JSON";
        let expected = match matcher.json_text() {
            Ok(text) => normalize(&text),
            Err(error) => return Verdict::fail(description, Failure::Serialization(error)),
        };
        let actual = normalize(response.body());

        if expected == actual {
            Verdict::pass(description)
        } else {
            Verdict::fail(description, Failure::Body { expected, actual })
        }
    }

    fn check_text_body(matcher: &Matcher, response: &ResponseSnapshot) -> Verdict {
        let description = "Body equals expected text";
        let Some(expected) = matcher.as_literal() else {
            return Verdict::fail(
                description,
                Failure::Declaration(DeclarationError::NonLiteralTextMatcher),
            );
        };

        if response.body_bytes() == expected.as_bytes() {
            Verdict::pass(description)
        } else {
            Verdict::fail(
                description,
                Failure::Body {
                    expected: expected.to_string(),
                    actual: response.body().to_string(),
                },
            )
        }
    }
}
