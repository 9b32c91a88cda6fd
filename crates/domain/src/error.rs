//! Error types shared by every fallible computation in the workspace.

use thiserror::Error;

/// Typed failure of a domain computation.
///
/// Calls either produce a complete, valid result or one of these; NaN is
/// never handed back in place of an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// An input is outside the domain of the formula (non-positive ratio or
    /// price, non-numeric percentage, empty grid, ...).
    #[error("invalid argument `{field}`: {reason}")]
    InvalidArgument { field: &'static str, reason: String },

    /// A -100% return collapsed a ratio denominator to zero.
    #[error("division by zero: `{field}` collapses the ratio denominator to zero")]
    DivisionByZero { field: &'static str },
}

impl DomainError {
    /// Builds an [`DomainError::InvalidArgument`].
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field,
            reason: reason.into(),
        }
    }

    /// Returns `true` for [`DomainError::InvalidArgument`].
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// Returns `true` for [`DomainError::DivisionByZero`].
    #[must_use]
    pub fn is_division_by_zero(&self) -> bool {
        matches!(self, Self::DivisionByZero { .. })
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

/// Rejects NaN and infinities.
pub fn ensure_finite(field: &'static str, value: f64) -> DomainResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DomainError::invalid(field, format!("{value} is not a finite number")))
    }
}

/// Rejects anything that is not a finite, strictly positive number.
pub fn ensure_positive(field: &'static str, value: f64) -> DomainResult<f64> {
    let value = ensure_finite(field, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(DomainError::invalid(field, format!("{value} must be greater than zero")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_positive() {
        assert_eq!(ensure_positive("price", 2.5), Ok(2.5));
        assert!(ensure_positive("price", 0.0).unwrap_err().is_invalid_argument());
        assert!(ensure_positive("price", -1.0).unwrap_err().is_invalid_argument());
        assert!(ensure_positive("price", f64::NAN).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_error_messages_name_the_field() {
        let err = DomainError::invalid("ratio", "must be greater than zero");
        assert_eq!(
            err.to_string(),
            "invalid argument `ratio`: must be greater than zero"
        );

        let err = DomainError::DivisionByZero { field: "var_b" };
        assert!(err.is_division_by_zero());
        assert!(err.to_string().contains("var_b"));
    }
}
