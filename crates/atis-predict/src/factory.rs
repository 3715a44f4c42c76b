//! Selecting and building the predictor for a run.

use std::str::FromStr;
use std::sync::Arc;

use atis_core::MultimodalDistribution;

use crate::{AdherenceAtis, CurrentAtis, PredictError, PredictResult, PrevisionAtis, RoutePredictor};

/// Run-level inputs a predictor may need.
#[derive(Clone, Debug)]
pub struct PredictorSetup {
    /// Departure-time distribution of the whole population.
    pub distribution: MultimodalDistribution,
    /// Number of actors created over the run.
    pub population:   usize,
    /// Fraction of actors that are guided.
    pub adoption:     f64,
}

/// Builds the single predictor shared by the guided actors of a run.
///
/// Called once per run, after the configuration is validated.
pub trait PredictorFactory: Send + Sync {
    fn create(&self, setup: &PredictorSetup) -> PredictResult<Arc<dyn RoutePredictor>>;
}

/// The built-in predictor strategies.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PredictorKind {
    /// [`CurrentAtis`].
    #[default]
    Current,
    /// [`PrevisionAtis`].
    Prevision,
    /// [`AdherenceAtis`].
    Adherence,
}

impl PredictorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PredictorKind::Current   => "current",
            PredictorKind::Prevision => "prevision",
            PredictorKind::Adherence => "adherence",
        }
    }
}

impl FromStr for PredictorKind {
    type Err = PredictError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "current" | "real" => Ok(PredictorKind::Current),
            "prevision"        => Ok(PredictorKind::Prevision),
            "adherence"        => Ok(PredictorKind::Adherence),
            other              => Err(PredictError::UnknownKind(other.to_string())),
        }
    }
}

impl std::fmt::Display for PredictorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PredictorFactory for PredictorKind {
    fn create(&self, setup: &PredictorSetup) -> PredictResult<Arc<dyn RoutePredictor>> {
        if !(0.0..=1.0).contains(&setup.adoption) {
            return Err(PredictError::Config(format!(
                "adoption fraction must be in [0, 1], got {}",
                setup.adoption
            )));
        }
        Ok(match self {
            PredictorKind::Current   => Arc::new(CurrentAtis),
            PredictorKind::Prevision => {
                Arc::new(PrevisionAtis::new(setup.distribution.clone(), setup.population))
            }
            PredictorKind::Adherence => Arc::new(AdherenceAtis::new(setup.adoption)),
        })
    }
}
