//! # cabal-model — Conspiracy exposure model.
//!
//! Estimates how long a secret shared by many people survives, following
//! Grimes' model of conspiratorial viability:
//! - **Population curves**: members either stay constant or die off along a
//!   Gompertz curve shifted by their average age at formation.
//! - **Leak probability**: the chance that at least one member leaks per year,
//!   `φ = 1 - (1 - p)^N`.
//! - **Exposure**: a Poisson survival function, `L(t) = 1 - e^(-tφ)`.
//! - **Time search**: a pure stepping state machine that walks years, then
//!   days, hours and sixtieths of an hour until `L` first reaches a target.

pub mod config;
pub mod decay;
pub mod model;
pub mod probability;
pub mod scenarios;
pub mod search;

pub use config::{ModelConfig, SearchConfig};
pub use decay::{ConstantCurve, GompertzCurve};
pub use model::ConspiracyModel;
pub use scenarios::{ScenarioOutcome, ScenarioSpec};
pub use search::{SearchState, SearchStep};
