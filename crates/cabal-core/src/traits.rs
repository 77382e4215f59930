//! Trait interfaces for the Cabal model.
//!
//! - [`PopulationCurve`] — conspirator count over time (cabal-model implements)

/// Number of active conspirators as a function of elapsed time.
///
/// Implementations must be pure: the same inputs always give the same count,
/// and the count never exceeds `initial_population` for `elapsed >= 0`.
pub trait PopulationCurve: Send + Sync {
    /// Conspirators remaining `elapsed` years after the conspiracy formed.
    fn population_at(&self, initial_population: f64, elapsed: f64) -> f64;
}
