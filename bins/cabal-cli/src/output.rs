//! Text and JSON rendering of model results.

use std::fmt::Write;

use anyhow::{bail, Result};
use cabal_model::{ConspiracyModel, ScenarioOutcome};

/// Years as the shortest round-trip decimal, or `unreachable`.
pub fn format_years(years: Option<f64>) -> String {
    match years {
        Some(y) => format!("{y}"),
        None => "unreachable".to_string(),
    }
}

/// Group outcomes under their headings, in input order.
///
/// ```text
/// Moon landings:
///     sustained: 3.669
///     decaying: 3.778
/// ```
pub fn render_outcomes_text(outcomes: &[ScenarioOutcome]) -> String {
    let mut out = String::new();
    let mut current_group: Option<&str> = None;

    for outcome in outcomes {
        if current_group != Some(outcome.group.as_str()) {
            let _ = writeln!(out, "{}:", outcome.group);
            current_group = Some(outcome.group.as_str());
        }
        let _ = writeln!(out, "\t{}: {}", outcome.label, format_years(outcome.years));
    }
    out
}

pub fn render_outcomes_json(outcomes: &[ScenarioOutcome]) -> Result<String> {
    Ok(serde_json::to_string_pretty(outcomes)?)
}

/// Most rows a curve table may hold.
pub const MAX_CURVE_SAMPLES: u64 = 1_000_000;

/// Number of sampling intervals in `[0, years]` at `step`, bounded by
/// [`MAX_CURVE_SAMPLES`].
pub fn curve_samples(years: f64, step: f64) -> Result<u64> {
    if !(step > 0.0 && step.is_finite()) {
        bail!("--step must be a positive number of years, got {step}");
    }
    if !(years >= 0.0 && years.is_finite()) {
        bail!("--years must be a non-negative number, got {years}");
    }
    let samples = (years / step).floor();
    if !(samples < MAX_CURVE_SAMPLES as f64) {
        bail!("--years {years} at --step {step} exceeds {MAX_CURVE_SAMPLES} samples");
    }
    Ok(samples as u64)
}

/// One row per sample: elapsed years, population, φ and exposure.
pub fn render_curve(model: &ConspiracyModel, samples: u64, step: f64) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>10}  {:>14}  {:>10}  {:>10}",
        "years", "population", "phi", "exposure"
    );

    for i in 0..=samples {
        let t = i as f64 * step;
        let _ = writeln!(
            out,
            "{:>10.3}  {:>14.1}  {:>10.6}  {:>10.6}",
            t,
            model.population_at(t),
            model.cumulative_leak_probability_at(t),
            model.exposure_at_elapsed(t),
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use cabal_core::types::DecayKind;

    fn outcome(group: &str, label: &str, years: Option<f64>) -> ScenarioOutcome {
        ScenarioOutcome {
            group: group.into(),
            label: label.into(),
            population: 1000.0,
            decay: DecayKind::Constant,
            years,
        }
    }

    #[test]
    fn years_formatting() {
        assert_eq!(format_years(Some(3.69)), "3.69");
        assert_eq!(format_years(Some(26.624)), "26.624");
        assert_eq!(format_years(None), "unreachable");
    }

    #[test]
    fn text_groups_consecutive_outcomes() {
        let text = render_outcomes_text(&[
            outcome("Moon landings", "sustained", Some(3.669)),
            outcome("Moon landings", "decaying", Some(3.778)),
            outcome("Cancer", "all", None),
        ]);
        assert_eq!(
            text,
            "Moon landings:\n\tsustained: 3.669\n\tdecaying: 3.778\nCancer:\n\tall: unreachable\n"
        );
    }

    #[test]
    fn json_is_an_array() {
        let json = render_outcomes_json(&[outcome("Cancer", "all", Some(3.156))]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 1);
        assert_eq!(value[0]["label"], "all");
    }

    #[test]
    fn curve_has_header_and_samples() {
        let model = ConspiracyModel::constant(1000.0).unwrap();
        let table = render_curve(&model, curve_samples(5.0, 1.0).unwrap(), 1.0);
        // Header plus t = 0..=5.
        assert_eq!(table.lines().count(), 7);
        assert!(table.lines().next().unwrap().contains("exposure"));
    }

    #[test]
    fn curve_sample_count() {
        assert_eq!(curve_samples(50.0, 1.0).unwrap(), 50);
        assert_eq!(curve_samples(1.0, 0.3).unwrap(), 3);
        assert_eq!(curve_samples(0.0, 1.0).unwrap(), 0);
    }

    #[test]
    fn curve_rejects_bad_ranges() {
        assert!(curve_samples(10.0, 0.0).is_err());
        assert!(curve_samples(10.0, -1.0).is_err());
        assert!(curve_samples(f64::INFINITY, 1.0).is_err());
        assert!(curve_samples(-1.0, 1.0).is_err());
    }

    #[test]
    fn curve_rejects_runaway_sample_counts() {
        assert!(curve_samples(1e300, 1e-300).is_err());
        assert!(curve_samples(1e6, 1.0).is_err());
        assert_eq!(curve_samples(999_999.0, 1.0).unwrap(), 999_999);
    }
}
