//! Failures routed through the failure channel.

use thiserror::Error;

/// A malformed expectation declaration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeclarationError {
    /// Two values whose first is neither an integer nor text, or a header
    /// expectation whose value is not text.
    #[error("Unknown Expect behavior")]
    UnknownBehavior,

    /// Zero, or three or more, values.
    #[error("Expect only accepts one or two args")]
    WrongArity(usize),

    /// A structured matcher checked against a `text/*` body.
    #[error("Text body expectations require a literal string matcher")]
    NonLiteralTextMatcher,
}

/// The four kinds of failure an evaluation can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The expectation itself was malformed.
    Declaration,
    /// The response did not match the expectation.
    Assertion,
    /// The response could not be obtained.
    Transport,
    /// The body has a content type with no comparison rule.
    UnsupportedFormat,
}

/// A single failure, carrying the message shown to the reporter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Failure {
    /// Status code mismatch.
    #[error("Expected status: [{expected}], but got: [{actual}]")]
    Status {
        /// Declared status code.
        expected: i64,
        /// Status code received.
        actual: u16,
    },

    /// Header value mismatch; `actual` is empty when the header is absent.
    #[error("Expected header [{name}] to equal: [{expected}], but got: [{actual}]")]
    Header {
        /// Header name as declared.
        name: String,
        /// Declared value.
        expected: String,
        /// Value received.
        actual: String,
    },

    /// Body mismatch. JSON bodies are shown normalized.
    #[error("Expected body:\n{expected}\nbut got:\n{actual}")]
    Body {
        /// Expected body text.
        expected: String,
        /// Body text received.
        actual: String,
    },

    /// The response content type has no comparison rule.
    #[error("content-type: {0} not supported")]
    UnsupportedContentType(String),

    /// A structured matcher could not be serialized to JSON.
    #[error("{0}")]
    Serialization(String),

    /// A malformed expectation.
    #[error(transparent)]
    Declaration(#[from] DeclarationError),

    /// The transport failed to produce a response.
    #[error("{0}")]
    Transport(String),
}

impl Failure {
    /// Returns which kind of failure this is.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Status { .. } | Self::Header { .. } | Self::Body { .. } => FailureKind::Assertion,
            Self::UnsupportedContentType(_) => FailureKind::UnsupportedFormat,
            Self::Serialization(_) | Self::Declaration(_) => FailureKind::Declaration,
            Self::Transport(_) => FailureKind::Transport,
        }
    }
}
