//! Curve error type.

use thiserror::Error;

/// Errors raised by the curve math.
///
/// Every failure is an input error detected before any computation runs;
/// nothing here is transient.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    #[error("invalid {field}: {reason}")]
    InvalidInput {
        field: &'static str,
        reason: String,
    },
}

impl CurveError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        CurveError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the offending input.
    pub fn field(&self) -> &'static str {
        match self {
            CurveError::InvalidInput { field, .. } => field,
        }
    }
}

/// Require a finite, strictly positive value.
pub(crate) fn ensure_positive(field: &'static str, value: f64) -> Result<f64, CurveError> {
    if !value.is_finite() {
        return Err(CurveError::invalid(field, format!("must be finite, got {value}")));
    }
    if value <= 0.0 {
        return Err(CurveError::invalid(field, format!("must be positive, got {value}")));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_field_and_reason() {
        let err = CurveError::invalid("reserve_ratio", "must be in (0, 1), got 0");
        assert_eq!(err.to_string(), "invalid reserve_ratio: must be in (0, 1), got 0");
        assert_eq!(err.field(), "reserve_ratio");
    }

    #[test]
    fn ensure_positive_rejects_zero_negative_and_nan() {
        assert!(ensure_positive("x", 1.5).is_ok());
        assert!(ensure_positive("x", 0.0).is_err());
        assert!(ensure_positive("x", -2.0).is_err());
        assert!(ensure_positive("x", f64::NAN).is_err());
        assert!(ensure_positive("x", f64::INFINITY).is_err());
    }
}
