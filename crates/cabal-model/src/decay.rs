//! Population curves implementing [`PopulationCurve`].
//!
//! Two curves exist, matching the two [`DecayMode`] variants:
//! - [`ConstantCurve`]: membership never changes.
//! - [`GompertzCurve`]: members die off at roughly the natural death rate,
//!   `N(t) = N₀ · exp((α/β)(1 - e^(β(t + t_e))))`, where `t_e` is the average
//!   member age when the conspiracy formed.

use cabal_core::traits::PopulationCurve;
use cabal_core::types::DecayMode;

/// A population that stays at its initial size forever.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstantCurve;

impl PopulationCurve for ConstantCurve {
    fn population_at(&self, initial_population: f64, _elapsed: f64) -> f64 {
        initial_population
    }
}

/// Gompertz attrition of the founding members.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GompertzCurve {
    pub alpha: f64,
    pub beta: f64,
    pub average_age: f64,
}

impl GompertzCurve {
    pub fn new(alpha: f64, beta: f64, average_age: f64) -> Self {
        Self {
            alpha,
            beta,
            average_age,
        }
    }

    /// Fraction of the founding members still alive after `elapsed` years.
    ///
    /// In `(0, 1]` while representable; underflows to exactly `0.0` once the
    /// inner exponential grows past ~700.
    pub fn survival(&self, elapsed: f64) -> f64 {
        let ratio = self.alpha / self.beta;
        let q = ratio * (1.0 - (self.beta * (elapsed + self.average_age)).exp());
        q.exp()
    }
}

impl PopulationCurve for GompertzCurve {
    fn population_at(&self, initial_population: f64, elapsed: f64) -> f64 {
        initial_population * self.survival(elapsed)
    }
}

/// Evaluate the curve selected by `mode`.
pub fn population_at(mode: &DecayMode, initial_population: f64, elapsed: f64) -> f64 {
    match *mode {
        DecayMode::Constant => ConstantCurve.population_at(initial_population, elapsed),
        DecayMode::Gompertzian {
            alpha,
            beta,
            average_age,
        } => GompertzCurve::new(alpha, beta, average_age).population_at(initial_population, elapsed),
    }
}
