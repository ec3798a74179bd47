//! Shared numeric helpers for the calculators.

use crate::error::{CalcError, CalcResult};

/// Arithmetic mean. Fails on an empty slice.
pub fn mean(values: &[f64]) -> CalcResult<f64> {
    if values.is_empty() {
        return Err(CalcError::DivisionByZero("mean of an empty set"));
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Bessel-corrected sample variance around a precomputed mean.
///
/// The denominator is `n - 1`, so fewer than two values is a division by zero.
pub fn sample_variance(values: &[f64], mean: f64) -> CalcResult<f64> {
    let n = values.len();
    if n < 2 {
        return Err(CalcError::DivisionByZero("sample variance (n - 1 = 0)"));
    }
    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Ok(sum_sq / (n - 1) as f64)
}

/// Round to two decimal places (kuruş precision).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_three() {
        let m = mean(&[100_000.0, 120_000.0, 110_000.0]).unwrap();
        assert!((m - 110_000.0).abs() < 1e-9);
    }

    #[test]
    fn mean_of_empty_fails() {
        assert!(matches!(mean(&[]), Err(CalcError::DivisionByZero(_))));
    }

    #[test]
    fn variance_uses_n_minus_one() {
        let values = [100_000.0, 120_000.0, 110_000.0];
        let v = sample_variance(&values, 110_000.0).unwrap();
        assert!((v - 1e8).abs() < 1e-6, "variance was {}", v);
    }

    #[test]
    fn variance_of_single_value_is_division_by_zero() {
        let result = sample_variance(&[5.0], 5.0);
        assert!(matches!(result, Err(CalcError::DivisionByZero(_))));
    }

    #[test]
    fn round2_keeps_kurus() {
        assert_eq!(round2(1234.5678), 1234.57);
        assert_eq!(round2(0.004), 0.0);
    }
}
