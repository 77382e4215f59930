//! Coarse-to-fine search for the time an exposure target is first reached.
//!
//! The search is a pure state machine. [`step`] takes the current
//! [`SearchState`] and an exposure probe and returns the next state, so the
//! algorithm can be driven and inspected without a model instance.
//!
//! Each rung of the ladder scans forward in steps of one [`Granularity`]:
//! 1. Probe the exposure at the current time, then advance one step.
//! 2. When the last probe met the target, back up two steps (one step short
//!    of the crossing), drop to the next finer rung and probe again.
//! 3. When the last probe on the finest rung met the target, the current
//!    time, rounded to the configured precision, is the answer.
//!
//! Targets are compared against probes rounded to the configured precision.
//! Past the coarsest rung, a raw probe of zero at a positive time means no
//! one is left to leak and the target cannot be reached.

use cabal_core::error::ModelError;
use cabal_core::types::Granularity;
use tracing::{debug, warn};

use crate::config::SearchConfig;
use crate::probability::round_to;

/// Explicit search state threaded through [`step`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchState {
    /// Search clock, in years.
    pub time: f64,
    /// Current rung of the refinement ladder.
    pub granularity: Granularity,
    /// Last probed exposure, unrounded.
    pub exposure: f64,
    /// Time the last probe was taken at.
    pub probed_at: f64,
}

impl Default for SearchState {
    fn default() -> Self {
        Self::start()
    }
}

impl SearchState {
    /// Clock at zero on the coarsest rung, nothing probed yet.
    pub fn start() -> Self {
        Self {
            time: 0.0,
            granularity: Granularity::Year,
            exposure: 0.0,
            probed_at: 0.0,
        }
    }

    /// Step length of the current rung, in years.
    pub fn step_years(&self) -> f64 {
        self.granularity.step_years()
    }
}

/// Outcome of one [`step`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchStep {
    Continue(SearchState),
    /// Years until the target is reached, rounded to the search precision.
    Found(f64),
    Unreachable,
}

/// Advance the search by one transition.
///
/// `probe` maps an elapsed time in years to the exposure probability at that
/// time.
pub fn step<F>(state: SearchState, config: &SearchConfig, probe: F) -> SearchStep
where
    F: Fn(f64) -> f64,
{
    let reached = round_to(state.exposure, config.precision) >= config.target_probability;

    if reached && state.granularity.is_finest() {
        return SearchStep::Found(round_to(state.time, config.precision));
    }

    if !state.granularity.is_coarsest() && state.exposure <= 0.0 && state.probed_at > 0.0 {
        return SearchStep::Unreachable;
    }

    match (reached, state.granularity.finer()) {
        (true, Some(finer)) => {
            let time = state.time - state.step_years() * 2.0;
            SearchStep::Continue(SearchState {
                time,
                granularity: finer,
                exposure: probe(time),
                probed_at: time,
            })
        }
        _ => SearchStep::Continue(SearchState {
            time: state.time + state.step_years(),
            granularity: state.granularity,
            exposure: probe(state.time),
            probed_at: state.time,
        }),
    }
}

/// Run [`step`] from [`SearchState::start`] until it settles.
///
/// Fails with [`ModelError::UnreachableTarget`] when the state machine reports
/// the target unreachable or the clock passes `max_horizon_years`.
pub fn search<F>(config: &SearchConfig, probe: F) -> Result<f64, ModelError>
where
    F: Fn(f64) -> f64,
{
    config.validate()?;

    let target = config.target_probability;
    let mut state = SearchState::start();
    let mut transitions: u64 = 0;

    loop {
        if state.time > config.max_horizon_years {
            warn!(
                target,
                horizon = config.max_horizon_years,
                "search: horizon passed without reaching target"
            );
            return Err(ModelError::UnreachableTarget { target });
        }

        transitions += 1;
        match step(state, config, &probe) {
            SearchStep::Continue(next) => {
                if next.granularity != state.granularity {
                    debug!(
                        granularity = ?next.granularity,
                        time = next.time,
                        exposure = next.exposure,
                        "search: refining"
                    );
                }
                state = next;
            }
            SearchStep::Found(years) => {
                debug!(years, transitions, "search: target reached");
                return Ok(years);
            }
            SearchStep::Unreachable => {
                warn!(
                    target,
                    time = state.probed_at,
                    granularity = ?state.granularity,
                    "search: exposure vanished after refinement"
                );
                return Err(ModelError::UnreachableTarget { target });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probability::exposure_probability;

    fn linear(t: f64) -> f64 {
        (t / 10.0).min(1.0)
    }

    fn cfg(target: f64) -> SearchConfig {
        SearchConfig::new(target, 3)
    }

    // --- step ---

    #[test]
    fn first_step_probes_origin_and_advances() {
        let next = step(SearchState::start(), &cfg(0.5), linear);
        assert_eq!(
            next,
            SearchStep::Continue(SearchState {
                time: 1.0,
                granularity: Granularity::Year,
                exposure: 0.0,
                probed_at: 0.0,
            })
        );
    }

    #[test]
    fn crossing_backs_up_two_steps_and_refines() {
        let state = SearchState {
            time: 6.0,
            granularity: Granularity::Year,
            exposure: 0.5,
            probed_at: 5.0,
        };
        match step(state, &cfg(0.5), linear) {
            SearchStep::Continue(next) => {
                assert_eq!(next.time, 4.0);
                assert_eq!(next.granularity, Granularity::Day);
                assert_eq!(next.exposure, 0.4);
                assert_eq!(next.probed_at, 4.0);
            }
            other => panic!("expected refinement, got {other:?}"),
        }
    }

    #[test]
    fn crossing_on_finest_rung_finishes() {
        let state = SearchState {
            time: 5.00049,
            granularity: Granularity::Second,
            exposure: 0.5,
            probed_at: 5.0,
        };
        assert_eq!(step(state, &cfg(0.5), linear), SearchStep::Found(5.0));
    }

    #[test]
    fn vanished_exposure_after_refinement_is_unreachable() {
        let state = SearchState {
            time: 2.0,
            granularity: Granularity::Day,
            exposure: 0.0,
            probed_at: 1.5,
        };
        assert_eq!(step(state, &cfg(0.5), linear), SearchStep::Unreachable);
    }

    #[test]
    fn zero_probe_at_origin_is_not_unreachable() {
        // Refining from the first year lands on t = 0, where exposure is 0 by definition.
        let state = SearchState {
            time: 0.0,
            granularity: Granularity::Day,
            exposure: 0.0,
            probed_at: 0.0,
        };
        assert!(matches!(
            step(state, &cfg(0.5), linear),
            SearchStep::Continue(_)
        ));
    }

    #[test]
    fn small_probe_rounding_to_zero_is_not_unreachable() {
        let state = SearchState {
            time: 2.0,
            granularity: Granularity::Day,
            exposure: 0.0004,
            probed_at: 1.5,
        };
        match step(state, &cfg(0.5), linear) {
            SearchStep::Continue(next) => {
                assert_eq!(next.granularity, Granularity::Day);
                assert_eq!(next.exposure, 0.2);
                assert_eq!(next.probed_at, 2.0);
            }
            other => panic!("expected scan to continue, got {other:?}"),
        }
    }

    #[test]
    fn zero_probe_on_coarsest_rung_keeps_scanning() {
        let state = SearchState {
            time: 3.0,
            granularity: Granularity::Year,
            exposure: 0.0,
            probed_at: 2.0,
        };
        assert!(matches!(
            step(state, &cfg(0.5), |_| 0.0),
            SearchStep::Continue(_)
        ));
    }

    // --- search ---

    #[test]
    fn linear_probe_converges_near_crossing() {
        // Probes are rounded to 3 digits, so 0.4995 at t = 4.995 already counts as 0.5.
        let years = search(&cfg(0.5), linear).unwrap();
        assert!((years - 4.995).abs() < 1e-9, "years = {years}");
    }

    #[test]
    fn reference_constant_population() {
        // phi for 411000 members at the default leak rate.
        let phi = 0.813_811_082_945_800_8;
        let years = search(&SearchConfig::default(), |t| exposure_probability(t, phi)).unwrap();
        assert!((years - 3.669).abs() < 1e-9, "years = {years}");
    }

    #[test]
    fn never_rising_probe_hits_horizon() {
        let config = SearchConfig {
            max_horizon_years: 50.0,
            ..SearchConfig::default()
        };
        assert_eq!(
            search(&config, |_| 0.0),
            Err(ModelError::UnreachableTarget { target: 0.95 })
        );
    }

    #[test]
    fn probe_collapsing_after_refinement_is_unreachable() {
        // Crosses in year 3, then reads zero everywhere the finer rungs look.
        let probe = |t: f64| if (2.5..3.5).contains(&t) { 1.0 } else { 0.0 };
        assert_eq!(
            search(&cfg(0.9), probe),
            Err(ModelError::UnreachableTarget { target: 0.9 })
        );
    }

    #[test]
    fn low_target_with_slow_leak_resolves() {
        // Early day-rung probes round to 0.000 but are not zero.
        let phi = 0.145;
        let years = search(&cfg(0.08), |t| exposure_probability(t, phi)).unwrap();
        assert!(years > 0.0 && years < 1.0, "years = {years}");
    }

    #[test]
    fn invalid_config_rejected_before_searching() {
        assert!(matches!(
            search(&cfg(1.5), linear),
            Err(ModelError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn higher_target_takes_longer() {
        let phi = 0.5;
        let probe = |t: f64| exposure_probability(t, phi);
        let mut last = 0.0;
        for target in [0.1, 0.3, 0.5, 0.7, 0.9, 0.95, 0.99] {
            let years = search(&cfg(target), probe).unwrap();
            assert!(years >= last, "target {target}: {years} < {last}");
            last = years;
        }
    }
}
