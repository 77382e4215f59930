//! Leak and exposure probability functions.
//!
//! All functions are pure `f64` arithmetic over already-validated inputs.

/// Probability that at least one of `population` members leaks in a year.
///
/// `φ = 1 - (1 - p)^N`, treating each member as an independent Bernoulli trial.
pub fn cumulative_leak_probability(leak_probability: f64, population: f64) -> f64 {
    1.0 - (1.0 - leak_probability).powf(population)
}

/// Probability the secret is out after `horizon` years at yearly leak rate `phi`.
///
/// Poisson survival: `L = 1 - e^(-tφ)`.
pub fn exposure_probability(horizon: f64, phi: f64) -> f64 {
    1.0 - (-horizon * phi).exp()
}

/// Round `value` to `digits` decimal places (ties away from zero).
pub fn round_to(value: f64, digits: u32) -> f64 {
    let scale = 10f64.powi(digits as i32);
    (value * scale).round() / scale
}
