//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// invariants, configuration). Soft advisories are values, not errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// One or more structural problems with the input, in detection order.
    ///
    /// The display form is every problem joined by `"; "`.
    #[error("{}", .0.join("; "))]
    Validation(Vec<String>),

    /// A domain invariant was violated (e.g. an amount out of range).
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// Static configuration could not be loaded or is inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl DomainError {
    pub fn validation<I, S>(problems: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Validation(problems.into_iter().map(Into::into).collect())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Problems carried by a validation failure (empty for other variants).
    pub fn problems(&self) -> &[String] {
        match self {
            DomainError::Validation(problems) => problems,
            DomainError::InvariantViolation(_) | DomainError::InvalidConfig(_) => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_joins_problems_in_order() {
        let err = DomainError::validation(["Missing invoice_id", "Invalid qty for B1"]);
        assert_eq!(err.to_string(), "Missing invoice_id; Invalid qty for B1");
        assert_eq!(err.problems().len(), 2);
    }

    #[test]
    fn single_problem_has_no_separator() {
        let err = DomainError::validation(["Invoice is missing"]);
        assert_eq!(err.to_string(), "Invoice is missing");
    }

    #[test]
    fn invariant_violation_names_the_invariant() {
        let err = DomainError::invariant("subtotal overflow");
        assert!(err.problems().is_empty());
        assert_eq!(err.to_string(), "invariant violated: subtotal overflow");
    }

    #[test]
    fn config_error_has_no_problems() {
        let err = DomainError::invalid_config("tax table has no OTHER entry");
        assert!(err.problems().is_empty());
        assert_eq!(
            err.to_string(),
            "invalid configuration: tax table has no OTHER entry"
        );
    }
}
