//! Validation errors raised before any pricing computation runs.

use thiserror::Error;

/// Pricing input error.
///
/// Pricing itself cannot fail; every variant describes a request that never
/// reached the model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    /// A required field was absent from the request.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// A field was present but outside its valid domain.
    #[error("Invalid field {field}: {reason}")]
    InvalidField {
        /// Wire name of the offending field.
        field: &'static str,
        /// Human-readable constraint that was violated.
        reason: String,
    },
}

impl PricingError {
    /// Wire name of the field this error refers to.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField(field) => field,
            Self::InvalidField { field, .. } => field,
        }
    }

    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}
