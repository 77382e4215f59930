//! The conspiracy model: fixed parameters plus a simulation clock.

use cabal_core::constants::DEFAULT_LEAK_PROBABILITY;
use cabal_core::error::ModelError;
use cabal_core::types::DecayMode;

use crate::config::{ModelConfig, SearchConfig};
use crate::decay;
use crate::probability::{cumulative_leak_probability, exposure_probability};
use crate::search;

/// A conspiracy of `initial_population` members, each leaking independently.
///
/// Parameters are fixed at construction. Only the elapsed-time clock changes,
/// through [`advance_time`](Self::advance_time) and [`set_time`](Self::set_time).
///
/// # Examples
///
/// ```
/// use cabal_model::ConspiracyModel;
/// let model = ConspiracyModel::constant(411_000.0).unwrap();
/// let years = model.time_to_target(0.95, 3).unwrap();
/// assert!((years - 3.669).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ConspiracyModel {
    initial_population: f64,
    leak_probability: f64,
    decay: DecayMode,
    elapsed: f64,
}

impl ConspiracyModel {
    /// Default leak probability and Gompertzian decay.
    pub fn new(initial_population: f64) -> Result<Self, ModelError> {
        Self::with_params(
            initial_population,
            DEFAULT_LEAK_PROBABILITY,
            DecayMode::default(),
        )
    }

    /// Default leak probability, population never decays.
    pub fn constant(initial_population: f64) -> Result<Self, ModelError> {
        Self::with_params(
            initial_population,
            DEFAULT_LEAK_PROBABILITY,
            DecayMode::Constant,
        )
    }

    pub fn with_params(
        initial_population: f64,
        leak_probability: f64,
        decay: DecayMode,
    ) -> Result<Self, ModelError> {
        let initial_population =
            ModelError::require_positive("initial_population", initial_population)?;
        let leak_probability =
            ModelError::require_probability("leak_probability", leak_probability)?;
        let decay = decay.validate()?;

        Ok(Self {
            initial_population,
            leak_probability,
            decay,
            elapsed: 0.0,
        })
    }

    pub fn from_config(config: &ModelConfig) -> Result<Self, ModelError> {
        Self::with_params(
            config.population,
            config.leak_probability,
            config.decay_mode()?,
        )
    }

    pub fn initial_population(&self) -> f64 {
        self.initial_population
    }

    pub fn leak_probability(&self) -> f64 {
        self.leak_probability
    }

    pub fn decay(&self) -> &DecayMode {
        &self.decay
    }

    /// Simulation clock, in years.
    pub fn elapsed_time(&self) -> f64 {
        self.elapsed
    }

    /// Move the clock by `delta` years. Negative deltas move it back.
    pub fn advance_time(&mut self, delta: f64) {
        self.elapsed += delta;
    }

    pub fn advance_year(&mut self) {
        self.advance_time(1.0);
    }

    pub fn set_time(&mut self, elapsed: f64) {
        self.elapsed = elapsed;
    }

    /// Conspirators at the current clock.
    pub fn population(&self) -> f64 {
        self.population_at(self.elapsed)
    }

    pub fn population_at(&self, elapsed: f64) -> f64 {
        decay::population_at(&self.decay, self.initial_population, elapsed)
    }

    /// Yearly probability that at least one current member leaks (φ).
    pub fn cumulative_leak_probability(&self) -> f64 {
        self.cumulative_leak_probability_at(self.elapsed)
    }

    pub fn cumulative_leak_probability_at(&self, elapsed: f64) -> f64 {
        cumulative_leak_probability(self.leak_probability, self.population_at(elapsed))
    }

    /// Exposure probability with the clock as the horizon.
    ///
    /// φ comes from the population at the clock, so the clock doubles as the
    /// exposure horizon here. Prefer [`exposure_probability_at`](Self::exposure_probability_at).
    pub fn exposure_probability(&self) -> f64 {
        self.exposure_probability_at(self.elapsed)
    }

    /// Probability the secret is out after `horizon` years, with φ taken at
    /// the current clock.
    pub fn exposure_probability_at(&self, horizon: f64) -> f64 {
        exposure_probability(horizon, self.cumulative_leak_probability())
    }

    /// Exposure as if the clock were set to `elapsed`, without touching it.
    pub fn exposure_at_elapsed(&self, elapsed: f64) -> f64 {
        exposure_probability(elapsed, self.cumulative_leak_probability_at(elapsed))
    }

    /// Years until the exposure probability first reaches `target`.
    ///
    /// The answer is accurate to `precision` decimal digits, down to the
    /// finest search step (a sixtieth of an hour). The clock is not changed.
    pub fn time_to_target(&self, target: f64, precision: u32) -> Result<f64, ModelError> {
        self.time_to_target_with(&SearchConfig::new(target, precision))
    }

    pub fn time_to_target_with(&self, config: &SearchConfig) -> Result<f64, ModelError> {
        config.validate()?;
        // No member ever leaks: exposure stays at zero forever.
        if self.leak_probability == 0.0 {
            return Err(ModelError::UnreachableTarget {
                target: config.target_probability,
            });
        }
        search::search(config, |t| self.exposure_at_elapsed(t))
    }

    /// Years until exposure reaches 95%, to three digits.
    pub fn time_to_fail(&self) -> Result<f64, ModelError> {
        self.time_to_target_with(&SearchConfig::default())
    }
}
