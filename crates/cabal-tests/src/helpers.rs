//! Shared test helpers.

use cabal_model::{ConspiracyModel, SearchConfig};

/// Absolute tolerance for comparing search results against reference values.
pub const YEARS_EPSILON: f64 = 1e-9;

/// Constant-population model at the default leak rate.
pub fn constant(population: f64) -> ConspiracyModel {
    ConspiracyModel::constant(population).expect("valid population")
}

/// Gompertzian model with default shape constants.
pub fn decaying(population: f64) -> ConspiracyModel {
    ConspiracyModel::new(population).expect("valid population")
}

/// Search settings with a custom target and the default precision.
pub fn target(probability: f64) -> SearchConfig {
    SearchConfig {
        target_probability: probability,
        ..SearchConfig::default()
    }
}

pub fn assert_years(got: f64, want: f64) {
    assert!(
        (got - want).abs() < YEARS_EPSILON,
        "expected {want} years, got {got}"
    );
}
