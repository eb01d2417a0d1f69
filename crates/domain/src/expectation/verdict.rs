//! Verdicts and evaluation reports.

use super::Failure;

/// The outcome of one check against a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// What was checked, e.g. "Status code = 200".
    pub description: String,
    /// Whether the check passed.
    pub passed: bool,
    /// Why the check failed.
    pub failure: Option<Failure>,
}

impl Verdict {
    /// Create a passed verdict.
    #[must_use]
    pub fn pass(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            passed: true,
            failure: None,
        }
    }

    /// Create a failed verdict.
    #[must_use]
    pub fn fail(description: impl Into<String>, failure: Failure) -> Self {
        Self {
            description: description.into(),
            passed: false,
            failure: Some(failure),
        }
    }
}

/// Everything one evaluation produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvaluationReport {
    /// Verdicts in evaluation order.
    pub verdicts: Vec<Verdict>,
    /// Transport failures; when present no verdicts were produced.
    pub transport_failures: Vec<Failure>,
    /// Number of verdicts.
    pub total: usize,
    /// Number of passed verdicts.
    pub passed: usize,
    /// Number of failed verdicts.
    pub failed: usize,
}

impl EvaluationReport {
    /// Builds a report from the verdicts of a completed evaluation.
    #[must_use]
    pub fn new(verdicts: Vec<Verdict>) -> Self {
        let total = verdicts.len();
        let passed = verdicts.iter().filter(|v| v.passed).count();

        Self {
            verdicts,
            transport_failures: Vec::new(),
            total,
            passed,
            failed: total - passed,
        }
    }

    /// Builds a report for an evaluation that never got a response.
    #[must_use]
    pub fn transport_failed(failures: Vec<Failure>) -> Self {
        Self {
            transport_failures: failures,
            ..Self::default()
        }
    }

    /// Returns true if every check passed and the transport succeeded.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.transport_failures.is_empty()
    }

    /// Returns every failure, transport failures first.
    pub fn failures(&self) -> impl Iterator<Item = &Failure> {
        self.transport_failures
            .iter()
            .chain(self.verdicts.iter().filter_map(|v| v.failure.as_ref()))
    }
}
