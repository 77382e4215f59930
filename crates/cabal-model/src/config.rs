//! Model and search configuration.
//!
//! [`ModelConfig`] is the serializable form of a model's parameters, with the
//! decay mode given by name so it can come from scenario files and CLI flags.
//! [`SearchConfig`] controls the time-to-target search.

use serde::{Deserialize, Serialize};

use cabal_core::constants::{
    DEFAULT_ALPHA, DEFAULT_AVERAGE_AGE, DEFAULT_BETA, DEFAULT_LEAK_PROBABILITY,
    DEFAULT_MAX_HORIZON_YEARS, DEFAULT_PRECISION, DEFAULT_TARGET_PROBABILITY, MAX_PRECISION,
};
use cabal_core::error::ModelError;
use cabal_core::types::{DecayKind, DecayMode};

/// Parameters of a single conspiracy model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Conspirators at time zero.
    pub population: f64,
    #[serde(default = "default_leak_probability")]
    pub leak_probability: f64,
    /// `"constant"` or `"gompertzian"`.
    #[serde(default = "default_decay")]
    pub decay: String,
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    #[serde(default = "default_beta")]
    pub beta: f64,
    #[serde(default = "default_average_age")]
    pub average_age: f64,
}

fn default_leak_probability() -> f64 {
    DEFAULT_LEAK_PROBABILITY
}

fn default_decay() -> String {
    DecayKind::default().name().to_string()
}

fn default_alpha() -> f64 {
    DEFAULT_ALPHA
}

fn default_beta() -> f64 {
    DEFAULT_BETA
}

fn default_average_age() -> f64 {
    DEFAULT_AVERAGE_AGE
}

impl ModelConfig {
    /// Default parameters for `population` members.
    pub fn new(population: f64) -> Self {
        Self {
            population,
            leak_probability: DEFAULT_LEAK_PROBABILITY,
            decay: default_decay(),
            alpha: DEFAULT_ALPHA,
            beta: DEFAULT_BETA,
            average_age: DEFAULT_AVERAGE_AGE,
        }
    }

    /// Same parameters with a constant population.
    pub fn constant(population: f64) -> Self {
        Self {
            decay: DecayKind::Constant.name().to_string(),
            ..Self::new(population)
        }
    }

    /// Resolve the decay name into a validated [`DecayMode`].
    pub fn decay_mode(&self) -> Result<DecayMode, ModelError> {
        let kind: DecayKind = self.decay.parse()?;
        kind.with_shape(self.alpha, self.beta, self.average_age)
            .validate()
    }
}

/// Settings for [`crate::search::search`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    /// Exposure probability to reach, in `(0, 1]`.
    pub target_probability: f64,
    /// Decimal digits used for probability comparisons and the answer.
    pub precision: u32,
    /// Give up once the search clock passes this many years.
    pub max_horizon_years: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            target_probability: DEFAULT_TARGET_PROBABILITY,
            precision: DEFAULT_PRECISION,
            max_horizon_years: DEFAULT_MAX_HORIZON_YEARS,
        }
    }
}

impl SearchConfig {
    pub fn new(target_probability: f64, precision: u32) -> Self {
        Self {
            target_probability,
            precision,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        let target =
            ModelError::require_positive("target_probability", self.target_probability)?;
        if target > 1.0 {
            return Err(ModelError::invalid(
                "target_probability",
                format!("must not exceed 1, got {target}"),
            ));
        }
        if self.precision > MAX_PRECISION {
            return Err(ModelError::invalid(
                "precision",
                format!("at most {MAX_PRECISION} digits, got {}", self.precision),
            ));
        }
        ModelError::require_positive("max_horizon_years", self.max_horizon_years)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_config_defaults() {
        let cfg = ModelConfig::new(1000.0);
        assert_eq!(cfg.population, 1000.0);
        assert_eq!(cfg.leak_probability, DEFAULT_LEAK_PROBABILITY);
        assert_eq!(cfg.decay, "gompertzian");
        assert_eq!(cfg.decay_mode().unwrap(), DecayMode::default());
    }

    #[test]
    fn constant_config_resolves_constant_mode() {
        let cfg = ModelConfig::constant(1000.0);
        assert_eq!(cfg.decay_mode().unwrap(), DecayMode::Constant);
    }

    #[test]
    fn unknown_decay_name_rejected() {
        let cfg = ModelConfig {
            decay: "linear".to_string(),
            ..ModelConfig::new(1000.0)
        };
        assert!(matches!(
            cfg.decay_mode(),
            Err(ModelError::InvalidParameter { name: "decay", .. })
        ));
    }

    #[test]
    fn deserialize_fills_defaults() {
        let cfg: ModelConfig = serde_json::from_str(r#"{"population": 22000}"#).unwrap();
        assert_eq!(cfg, ModelConfig::new(22_000.0));
    }

    #[test]
    fn deserialize_requires_population() {
        let res: Result<ModelConfig, _> = serde_json::from_str(r#"{"decay": "constant"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn search_defaults() {
        let cfg = SearchConfig::default();
        assert_eq!(cfg.target_probability, 0.95);
        assert_eq!(cfg.precision, 3);
        assert_eq!(cfg.max_horizon_years, DEFAULT_MAX_HORIZON_YEARS);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn search_target_bounds() {
        assert!(SearchConfig::new(0.0, 3).validate().is_err());
        assert!(SearchConfig::new(-0.5, 3).validate().is_err());
        assert!(SearchConfig::new(1.01, 3).validate().is_err());
        assert!(SearchConfig::new(f64::NAN, 3).validate().is_err());
        assert!(SearchConfig::new(1.0, 3).validate().is_ok());
    }

    #[test]
    fn search_precision_bound() {
        assert!(SearchConfig::new(0.95, MAX_PRECISION).validate().is_ok());
        assert!(SearchConfig::new(0.95, MAX_PRECISION + 1).validate().is_err());
    }

    #[test]
    fn search_horizon_must_be_positive() {
        let cfg = SearchConfig {
            max_horizon_years: 0.0,
            ..SearchConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
