//! # Error Types — Structured Validation Failures
//!
//! Analysis validation is a trust boundary: the candidate value comes from
//! a non-deterministic generator and must be rejected with structured error
//! information naming the violating field, the expected shape, and the
//! value actually found. A failure never carries a partially-valid result.

use std::fmt;

use thiserror::Error;

/// Top-level error type for the analysis validation crate.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The candidate did not conform to the analysis result schema.
    #[error("analysis result failed structural validation:\n{violations}")]
    ValidationFailed {
        /// Structured list of individual violations.
        violations: ValidationViolations,
    },

    /// No JSON value could be extracted from a raw generator reply.
    #[error("response parse error: {0}")]
    ResponseParse(String),

    /// A confidence level string outside the closed enumeration.
    #[error("unknown confidence level: {0:?}")]
    UnknownConfidence(String),
}

impl AnalysisError {
    /// Returns the violations if this is a validation failure.
    pub fn violations(&self) -> Option<&ValidationViolations> {
        match self {
            AnalysisError::ValidationFailed { violations } => Some(violations),
            _ => None,
        }
    }
}

/// A single structural violation with the context a caller needs to
/// re-prompt the generator or report the defect.
#[derive(Debug, Clone)]
pub struct Violation {
    /// Dotted field path to the violating value in the candidate,
    /// e.g. `techStack.confidence` or `buildSystem.runCommands[0]`.
    /// Empty for the candidate root.
    pub path: String,
    /// Description of the shape the schema required at this path.
    pub expected: String,
    /// Short rendering of the value actually found (`missing` when the
    /// required key was absent).
    pub actual: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "  (root): expected {}, found {}", self.expected, self.actual)
        } else {
            write!(
                f,
                "  {}: expected {}, found {}",
                self.path, self.expected, self.actual
            )
        }
    }
}

/// Collection of every violation found in one validation pass.
///
/// All violations are gathered before the call fails — a caller asking the
/// generator to retry can name every defective field at once instead of
/// discovering them one call at a time.
#[derive(Debug, Clone)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    pub(crate) fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }

    /// Returns true if some violation is attributed to the given path.
    pub fn mentions_path(&self, path: &str) -> bool {
        self.violations.iter().any(|v| v.path == path)
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}
