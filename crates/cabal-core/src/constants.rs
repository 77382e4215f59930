//! Model constants. All times are in years.

/// Per-conspirator, per-year probability of an intentional or accidental leak.
///
/// Estimated from historical leaks (PRISM, Tuskegee, FBI forensic scandal).
pub const DEFAULT_LEAK_PROBABILITY: f64 = 4.09e-6;

/// Gompertz `alpha`: initial acceleration of the attrition curve.
pub const DEFAULT_ALPHA: f64 = 1.0e-4;

/// Gompertz `beta`: displacement of the attrition curve.
pub const DEFAULT_BETA: f64 = 0.085;

/// Mean age of a conspirator when the conspiracy forms.
pub const DEFAULT_AVERAGE_AGE: f64 = 45.0;

/// Exposure probability treated as "the conspiracy has failed".
pub const DEFAULT_TARGET_PROBABILITY: f64 = 0.95;

/// Decimal digits kept when comparing probabilities and reporting times.
pub const DEFAULT_PRECISION: u32 = 3;

/// Largest precision accepted by the search.
///
/// The finest search step is a sixtieth of an hour (~1.9e-6 years), so more
/// digits than this cannot change the answer.
pub const MAX_PRECISION: u32 = 12;

/// Search stops as unreachable once the clock passes this horizon.
pub const DEFAULT_MAX_HORIZON_YEARS: f64 = 10_000.0;

/// Length of the coarsest search step.
pub const YEAR: f64 = 1.0;

/// Days per year used by the refinement ladder (no leap days).
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Hours per day.
pub const HOURS_PER_DAY: f64 = 24.0;

/// Subdivisions of an hour at the finest rung.
pub const SUBDIVISIONS_PER_HOUR: f64 = 60.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leak_probability_is_a_probability() {
        assert!(DEFAULT_LEAK_PROBABILITY > 0.0 && DEFAULT_LEAK_PROBABILITY < 1.0);
    }

    #[test]
    fn target_probability_is_a_probability() {
        assert!(DEFAULT_TARGET_PROBABILITY > 0.0 && DEFAULT_TARGET_PROBABILITY <= 1.0);
    }

    #[test]
    fn default_precision_within_bounds() {
        assert!(DEFAULT_PRECISION <= MAX_PRECISION);
    }

    #[test]
    fn gompertz_defaults_positive() {
        assert!(DEFAULT_ALPHA > 0.0);
        assert!(DEFAULT_BETA > 0.0);
        assert!(DEFAULT_AVERAGE_AGE >= 0.0);
    }
}
