//! Named scenarios: the built-in demonstration set and JSON scenario files.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use cabal_core::error::ModelError;
use cabal_core::types::DecayKind;

use crate::config::{ModelConfig, SearchConfig};
use crate::model::ConspiracyModel;

#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("reading scenario file: {0}")] Io(#[from] std::io::Error),
    #[error("parsing scenario file: {0}")] Parse(#[from] serde_json::Error),
    #[error("scenario '{group} / {label}': {source}")] Model { group: String, label: String, source: ModelError },
}

/// A labelled model configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSpec {
    /// Heading the scenario is reported under, e.g. "Moon landings".
    pub group: String,
    pub label: String,
    #[serde(flatten)]
    pub config: ModelConfig,
}

impl ScenarioSpec {
    pub fn new(group: &str, label: &str, config: ModelConfig) -> Self {
        Self {
            group: group.to_string(),
            label: label.to_string(),
            config,
        }
    }
}

/// Result of running one scenario. `years` is `None` when the target is unreachable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioOutcome {
    pub group: String,
    pub label: String,
    pub population: f64,
    pub decay: DecayKind,
    pub years: Option<f64>,
}

/// The seven scenarios from Grimes' paper.
pub fn builtin_scenarios() -> Vec<ScenarioSpec> {
    vec![
        ScenarioSpec::new("Moon landings", "sustained", ModelConfig::constant(411_000.0)),
        ScenarioSpec::new("Moon landings", "decaying", ModelConfig::new(411_000.0)),
        ScenarioSpec::new("Climate change", "scientists", ModelConfig::constant(29_083.0)),
        ScenarioSpec::new("Climate change", "including bodies", ModelConfig::constant(405_000.0)),
        ScenarioSpec::new("Vaccines", "agencies", ModelConfig::constant(22_000.0)),
        ScenarioSpec::new("Vaccines", "agencies and companies", ModelConfig::constant(726_000.0)),
        ScenarioSpec::new("Cancer", "all", ModelConfig::constant(714_000.0)),
    ]
}

pub fn parse_scenarios(json: &str) -> Result<Vec<ScenarioSpec>, ScenarioError> {
    Ok(serde_json::from_str(json)?)
}

/// Read a JSON array of scenarios from `path`.
pub fn load_scenarios(path: &Path) -> Result<Vec<ScenarioSpec>, ScenarioError> {
    let json = std::fs::read_to_string(path)?;
    let specs = parse_scenarios(&json)?;
    debug!(path = %path.display(), count = specs.len(), "scenarios: loaded");
    Ok(specs)
}

/// Build the model for `spec` and search for its time to target.
///
/// Invalid parameters are errors; an unreachable target is reported as
/// `years: None`.
pub fn run_scenario(
    spec: &ScenarioSpec,
    search: &SearchConfig,
) -> Result<ScenarioOutcome, ScenarioError> {
    let wrap = |source: ModelError| ScenarioError::Model {
        group: spec.group.clone(),
        label: spec.label.clone(),
        source,
    };

    let model = ConspiracyModel::from_config(&spec.config).map_err(wrap)?;
    let years = match model.time_to_target_with(search) {
        Ok(years) => Some(years),
        Err(ModelError::UnreachableTarget { .. }) => None,
        Err(e) => return Err(wrap(e)),
    };

    Ok(ScenarioOutcome {
        group: spec.group.clone(),
        label: spec.label.clone(),
        population: model.initial_population(),
        decay: model.decay().kind(),
        years,
    })
}

pub fn run_all(
    specs: &[ScenarioSpec],
    search: &SearchConfig,
) -> Result<Vec<ScenarioOutcome>, ScenarioError> {
    specs.iter().map(|spec| run_scenario(spec, search)).collect()
}
