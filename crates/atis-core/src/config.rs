//! Run configuration.

use crate::{CoreError, CoreResult, SimTime};

/// Top-level simulation configuration.
///
/// Typically built from CLI flags or loaded from a JSON file by the driver
/// and handed to the simulation builder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Number of actors created per run.
    pub actor_count: usize,

    /// Observation window in hours.  Events at or after this time are never
    /// enqueued; unfinished trips are truncated to it.  Default: 48.
    pub horizon_hours: f64,

    /// Fraction of actors that receive ATIS guidance, in `[0, 1]`.
    pub adoption: f64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,
}

impl SimConfig {
    /// The horizon as a timestamp (exclusive upper bound for events).
    #[inline]
    pub fn horizon(&self) -> SimTime {
        SimTime(self.horizon_hours)
    }

    /// Reject values the event loop cannot work with.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.horizon_hours.is_finite() || self.horizon_hours <= 0.0 {
            return Err(CoreError::Config(format!(
                "horizon must be a positive number of hours, got {}",
                self.horizon_hours
            )));
        }
        if !(0.0..=1.0).contains(&self.adoption) {
            return Err(CoreError::Config(format!(
                "ATIS adoption must be within [0, 1], got {}",
                self.adoption
            )));
        }
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            actor_count:   500,
            horizon_hours: 48.0,
            adoption:      0.0,
            seed:          42,
        }
    }
}
