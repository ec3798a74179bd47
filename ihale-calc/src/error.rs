//! Calculator error types.
//!
//! Every failure mode has a named variant. All of them are recoverable by
//! the caller; none is retried because there is nothing transient here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CalcError {
    #[error("Insufficient data: need at least {required} valid bids, got {found}")]
    InsufficientData { required: usize, found: usize },

    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// Only reachable when a caller bypasses the bid-count precondition.
    #[error("Division by zero while computing {0}")]
    DivisionByZero(&'static str),

    #[error("No tariff table for year {0}")]
    UnknownTariffYear(i32),

    #[error("Tariff parse error: {0}")]
    TariffParse(#[from] serde_json::Error),
}

impl CalcError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

/// Result type alias for calculator operations.
pub type CalcResult<T> = Result<T, CalcError>;

/// Fail with `InvalidInput` unless `value` is finite and strictly positive.
pub(crate) fn require_positive(field: &'static str, value: f64) -> CalcResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(CalcError::invalid(field, format!("must be positive, got {}", value)))
    }
}

/// Fail with `InvalidInput` unless `value` is finite and not negative.
pub(crate) fn require_non_negative(field: &'static str, value: f64) -> CalcResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(CalcError::invalid(field, format!("must not be negative, got {}", value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_check_rejects_zero_and_nan() {
        assert!(require_positive("x", 0.0).is_err());
        assert!(require_positive("x", -1.0).is_err());
        assert!(require_positive("x", f64::NAN).is_err());
        assert_eq!(require_positive("x", 2.5).unwrap(), 2.5);
    }

    #[test]
    fn non_negative_check_accepts_zero() {
        assert_eq!(require_non_negative("x", 0.0).unwrap(), 0.0);
        assert!(require_non_negative("x", -0.01).is_err());
    }

    #[test]
    fn messages_name_the_field() {
        let err = CalcError::invalid("total_bid", "must be positive, got 0");
        assert_eq!(
            err.to_string(),
            "Invalid input for total_bid: must be positive, got 0"
        );
        let err = CalcError::InsufficientData { required: 2, found: 1 };
        assert!(err.to_string().contains("at least 2"));
    }
}
