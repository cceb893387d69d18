//! Domain checks for numeric inputs.

use super::PricingError;

/// Unwraps a required field.
pub(crate) fn required<T>(field: &'static str, value: Option<T>) -> Result<T, PricingError> {
    value.ok_or(PricingError::MissingField(field))
}

pub(crate) fn finite(field: &'static str, value: f64) -> Result<f64, PricingError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PricingError::invalid(field, "must be a finite number"))
    }
}

pub(crate) fn positive(field: &'static str, value: f64) -> Result<f64, PricingError> {
    if finite(field, value)? > 0.0 {
        Ok(value)
    } else {
        Err(PricingError::invalid(field, "must be greater than 0"))
    }
}

pub(crate) fn non_negative(field: &'static str, value: f64) -> Result<f64, PricingError> {
    if finite(field, value)? >= 0.0 {
        Ok(value)
    } else {
        Err(PricingError::invalid(field, "must not be negative"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required() {
        assert_eq!(required("steps", Some(3)), Ok(3));
        assert_eq!(
            required::<u32>("steps", None),
            Err(PricingError::MissingField("steps"))
        );
    }

    #[test]
    fn test_positive_and_non_negative() {
        assert!(positive("x", 1e-12).is_ok());
        assert!(positive("x", 0.0).is_err());
        assert!(non_negative("x", 0.0).is_ok());
        assert!(non_negative("x", -1e-12).is_err());
        assert!(finite("x", f64::NEG_INFINITY).is_err());
    }
}
