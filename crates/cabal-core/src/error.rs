//! Error types for the Cabal model.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("invalid parameter `{name}`: {reason}")] InvalidParameter { name: &'static str, reason: String },
    #[error("target exposure probability {target} is unreachable")] UnreachableTarget { target: f64 },
}

impl ModelError {
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter { name, reason: reason.into() }
    }

    /// Reject values that are NaN or infinite.
    pub fn require_finite(name: &'static str, value: f64) -> Result<f64, Self> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(Self::invalid(name, format!("must be finite, got {value}")))
        }
    }

    /// Require `value > 0`.
    pub fn require_positive(name: &'static str, value: f64) -> Result<f64, Self> {
        let value = Self::require_finite(name, value)?;
        if value > 0.0 {
            Ok(value)
        } else {
            Err(Self::invalid(name, format!("must be positive, got {value}")))
        }
    }

    /// Require `value >= 0`.
    pub fn require_non_negative(name: &'static str, value: f64) -> Result<f64, Self> {
        let value = Self::require_finite(name, value)?;
        if value >= 0.0 {
            Ok(value)
        } else {
            Err(Self::invalid(name, format!("must not be negative, got {value}")))
        }
    }

    /// Require `value` in the closed unit interval.
    pub fn require_probability(name: &'static str, value: f64) -> Result<f64, Self> {
        let value = Self::require_finite(name, value)?;
        if (0.0..=1.0).contains(&value) {
            Ok(value)
        } else {
            Err(Self::invalid(name, format!("must lie in [0, 1], got {value}")))
        }
    }
}
