//! Core model types: decay modes and the search refinement ladder.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DAYS_PER_YEAR, DEFAULT_ALPHA, DEFAULT_AVERAGE_AGE, DEFAULT_BETA, HOURS_PER_DAY,
    SUBDIVISIONS_PER_HOUR, YEAR,
};
use crate::error::ModelError;

/// How the conspirator population changes with elapsed time.
///
/// Each variant carries only the parameters it needs.
///
/// # Examples
///
/// ```
/// use cabal_core::types::DecayMode;
/// let mode = DecayMode::default();
/// assert_eq!(mode.kind().name(), "gompertzian");
/// assert_eq!(DecayMode::Constant.kind().name(), "constant");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum DecayMode {
    /// Population never changes.
    Constant,
    /// Gompertz attrition of the original members.
    Gompertzian {
        /// Initial acceleration of the attrition curve.
        alpha: f64,
        /// Displacement of the attrition curve.
        beta: f64,
        /// Mean member age at formation, in years.
        average_age: f64,
    },
}

impl Default for DecayMode {
    fn default() -> Self {
        Self::Gompertzian {
            alpha: DEFAULT_ALPHA,
            beta: DEFAULT_BETA,
            average_age: DEFAULT_AVERAGE_AGE,
        }
    }
}

impl DecayMode {
    /// The parameterless tag for this mode.
    pub fn kind(&self) -> DecayKind {
        match self {
            Self::Constant => DecayKind::Constant,
            Self::Gompertzian { .. } => DecayKind::Gompertzian,
        }
    }

    /// Check shape constants: `alpha > 0`, `beta > 0`, `average_age >= 0`.
    pub fn validate(self) -> Result<Self, ModelError> {
        if let Self::Gompertzian {
            alpha,
            beta,
            average_age,
        } = self
        {
            ModelError::require_positive("alpha", alpha)?;
            ModelError::require_positive("beta", beta)?;
            ModelError::require_non_negative("average_age", average_age)?;
        }
        Ok(self)
    }
}

/// Decay mode tag without parameters, parsed from user-facing names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecayKind {
    Constant,
    #[default]
    Gompertzian,
}

impl DecayKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Constant => "constant",
            Self::Gompertzian => "gompertzian",
        }
    }

    /// Attach shape constants. They are dropped for [`DecayKind::Constant`].
    pub fn with_shape(self, alpha: f64, beta: f64, average_age: f64) -> DecayMode {
        match self {
            Self::Constant => DecayMode::Constant,
            Self::Gompertzian => DecayMode::Gompertzian {
                alpha,
                beta,
                average_age,
            },
        }
    }
}

impl fmt::Display for DecayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DecayKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "constant" => Ok(Self::Constant),
            "gompertzian" => Ok(Self::Gompertzian),
            other => Err(ModelError::invalid(
                "decay",
                format!("unknown decay mode '{other}' (expected 'constant' or 'gompertzian')"),
            )),
        }
    }
}

/// Rungs of the time-search refinement ladder, coarsest first.
///
/// [`Granularity::Second`] is one sixtieth of an hour; the ladder stops there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Granularity {
    Year,
    Day,
    Hour,
    Second,
}

impl Granularity {
    /// All rungs in refinement order.
    pub const LADDER: [Granularity; 4] = [Self::Year, Self::Day, Self::Hour, Self::Second];

    /// Step length in years.
    pub fn step_years(self) -> f64 {
        let day = YEAR / DAYS_PER_YEAR;
        let hour = day / HOURS_PER_DAY;
        match self {
            Self::Year => YEAR,
            Self::Day => day,
            Self::Hour => hour,
            Self::Second => hour / SUBDIVISIONS_PER_HOUR,
        }
    }

    /// Next finer rung, or `None` at the bottom of the ladder.
    pub fn finer(self) -> Option<Self> {
        match self {
            Self::Year => Some(Self::Day),
            Self::Day => Some(Self::Hour),
            Self::Hour => Some(Self::Second),
            Self::Second => None,
        }
    }

    pub fn is_coarsest(self) -> bool {
        self == Self::Year
    }

    pub fn is_finest(self) -> bool {
        self.finer().is_none()
    }
}
